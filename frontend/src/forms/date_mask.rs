//! Conversions between the `DD/MM/YYYY` text people type and the ISO
//! `YYYY-MM-DD` value a native date input holds.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

const MAX_DIGITS: usize = 8;

static DAY_MONTH_YEAR: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^\s*(\d{1,2})([/-])(\d{1,2})([/-])(\d{2,4})\s*$").ok());

/// Live mask applied while typing: digits only, at most eight, with a `/`
/// after the day and the month once more digits follow.
pub fn mask(input: &str) -> String {
    let digits: Vec<char> = input
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DIGITS)
        .collect();
    let mut masked = String::with_capacity(MAX_DIGITS + 2);
    for (i, digit) in digits.iter().enumerate() {
        if i == 2 || i == 4 {
            masked.push('/');
        }
        masked.push(*digit);
    }
    masked
}

/// Parses `D/M/Y` or `D-M-Y`. Two digit years are read as 20xx. Returns
/// `None` for anything that is not a real calendar date.
pub fn parse(text: &str) -> Option<NaiveDate> {
    let caps = (*DAY_MONTH_YEAR).as_ref()?.captures(text)?;
    if caps[2] != caps[4] {
        return None;
    }
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[3].parse().ok()?;
    let year_digits = &caps[5];
    let mut year: i32 = year_digits.parse().ok()?;
    if year_digits.len() == 2 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn to_display(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Display text for a native input value; `None` if the value is not an ISO
/// date (an empty value included).
pub fn display_from_iso(iso: &str) -> Option<String> {
    NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d")
        .ok()
        .map(to_display)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_pattern_compiles() {
        assert!(DAY_MONTH_YEAR.is_some());
    }

    #[test]
    fn masks_digits_as_typed() {
        assert_eq!(mask(""), "");
        assert_eq!(mask("2"), "2");
        assert_eq!(mask("25"), "25");
        assert_eq!(mask("251"), "25/1");
        assert_eq!(mask("2512"), "25/12");
        assert_eq!(mask("25122"), "25/12/2");
        assert_eq!(mask("25122024"), "25/12/2024");
    }

    #[test]
    fn mask_drops_noise_and_extra_digits() {
        assert_eq!(mask("25/12/2024"), "25/12/2024");
        assert_eq!(mask("25-12-2024"), "25/12/2024");
        assert_eq!(mask("ab25.12x202499"), "25/12/2024");
    }

    #[test]
    fn round_trips_through_native_value() {
        let display = mask("25122024");
        assert_eq!(display, "25/12/2024");
        let date = parse(&display).unwrap();
        let iso = to_iso(date);
        assert_eq!(iso, "2024-12-25");
        assert_eq!(display_from_iso(&iso).as_deref(), Some("25/12/2024"));
    }

    #[test]
    fn pads_short_day_and_month() {
        let date = parse("5/3/2025").unwrap();
        assert_eq!(to_iso(date), "2025-03-05");
        assert_eq!(to_display(date), "05/03/2025");
    }

    #[test]
    fn accepts_dashes_and_two_digit_years() {
        assert_eq!(to_iso(parse("1-2-24").unwrap()), "2024-02-01");
        assert_eq!(to_iso(parse(" 31/12/99 ").unwrap()), "2099-12-31");
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(parse("31/02/2024"), None);
        assert_eq!(parse("29/02/2023"), None);
        assert_eq!(parse("00/01/2024"), None);
        assert_eq!(parse("12/13/2024"), None);
        assert!(parse("29/02/2024").is_some());
    }

    #[test]
    fn rejects_malformed_text() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("25/12"), None);
        assert_eq!(parse("25/12/2"), None);
        assert_eq!(parse("25/12-2024"), None);
        assert_eq!(parse("25/12/20245"), None);
        assert_eq!(parse("tomorrow"), None);
    }

    #[test]
    fn empty_native_value_has_no_display() {
        assert_eq!(display_from_iso(""), None);
        assert_eq!(display_from_iso("2024-13-01"), None);
    }
}
