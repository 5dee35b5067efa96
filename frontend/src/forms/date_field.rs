use web_sys::{Document, Element, HtmlInputElement, KeyboardEvent};

use super::date_mask;
use crate::error::UiResult;
use crate::utils::dom;

const FIELD_SELECTOR: &str = ".date-field";
const DISPLAY_SELECTOR: &str = ".date-display";
const NATIVE_SELECTOR: &str = ".date-native";

/// A typed `DD/MM/YYYY` text box paired with a hidden native date input that
/// carries the real `YYYY-MM-DD` value.
#[derive(Clone)]
struct DateField {
    display: HtmlInputElement,
    native: HtmlInputElement,
}

impl DateField {
    /// Masks whatever was typed so far.
    fn on_input(&self) {
        let value = self.display.value();
        let masked = date_mask::mask(&value);
        if masked != value {
            self.display.set_value(&masked);
        }
    }

    /// Writes a valid typed date through to the native input. Anything else
    /// leaves the native value as it was.
    fn commit(&self) {
        if let Some(date) = date_mask::parse(&self.display.value()) {
            self.native.set_value(&date_mask::to_iso(date));
            self.display.set_value(&date_mask::to_display(date));
        }
    }

    /// Mirrors a value picked in the native control.
    fn sync_from_native(&self) {
        let display = date_mask::display_from_iso(&self.native.value()).unwrap_or_default();
        self.display.set_value(&display);
    }
}

/// What the picker fallback needs from the native date input.
trait PickerHost {
    fn show_picker(&self) -> UiResult<()>;
    fn reveal(&self) -> UiResult<()>;
    fn conceal(&self) -> UiResult<()>;
    fn focus(&self) -> UiResult<()>;
    fn click(&self);
}

impl PickerHost for DateField {
    fn show_picker(&self) -> UiResult<()> {
        Ok(self.native.show_picker()?)
    }

    fn reveal(&self) -> UiResult<()> {
        dom::set_style(&self.native, "visibility", "visible")?;
        dom::set_style(&self.native, "pointer-events", "auto")
    }

    fn conceal(&self) -> UiResult<()> {
        dom::clear_style(&self.native, "visibility")?;
        dom::clear_style(&self.native, "pointer-events")
    }

    fn focus(&self) -> UiResult<()> {
        Ok(self.native.focus()?)
    }

    fn click(&self) {
        self.native.click();
    }
}

/// Opens the browser's date picker. Without `showPicker` (or when it
/// refuses), the native input is briefly exposed and given focus plus a
/// click; its blur hides it again. An input that never got focus never
/// blurs, so it is hidden right away instead.
fn open_picker(host: &impl PickerHost) {
    if host.show_picker().is_ok() {
        return;
    }
    let exposed = host.reveal().and_then(|()| host.focus());
    match exposed {
        Ok(()) => host.click(),
        Err(e) => {
            log::debug!("Date picker fallback failed: {}", e);
            if let Err(e) = host.conceal() {
                log::debug!("Could not hide native date input: {}", e);
            }
        }
    }
}

/// Wires every `.date-field` that has both a display and a native input.
/// Returns the number of fields wired.
pub fn mount(document: &Document) -> UiResult<usize> {
    let wrappers = dom::query_all::<Element>(document, FIELD_SELECTOR)?;
    let mut mounted = 0;
    for wrapper in &wrappers {
        let display = dom::query_within::<HtmlInputElement>(wrapper, DISPLAY_SELECTOR)?;
        let native = dom::query_within::<HtmlInputElement>(wrapper, NATIVE_SELECTOR)?;
        let (Some(display), Some(native)) = (display, native) else {
            log::debug!("Date field without display/native pair skipped");
            continue;
        };
        bind(wrapper, DateField { display, native })?;
        mounted += 1;
    }
    Ok(mounted)
}

fn bind(wrapper: &Element, field: DateField) -> UiResult<()> {
    if !field.native.value().is_empty() {
        field.sync_from_native();
    }

    let f = field.clone();
    dom::listen::<web_sys::Event, _>(&field.display, "input", move |_| f.on_input())?;

    let f = field.clone();
    dom::listen::<web_sys::Event, _>(&field.display, "blur", move |_| f.commit())?;

    let f = field.clone();
    dom::listen::<KeyboardEvent, _>(&field.display, "keydown", move |event| {
        if event.key() == "Enter" {
            event.prevent_default();
            f.commit();
        }
    })?;

    let f = field.clone();
    dom::listen::<web_sys::Event, _>(&field.native, "change", move |_| f.sync_from_native())?;

    let f = field.clone();
    dom::listen::<web_sys::Event, _>(&field.native, "blur", move |_| {
        if let Err(e) = f.conceal() {
            log::debug!("Could not hide native date input: {}", e);
        }
    })?;

    let f = field;
    dom::listen::<web_sys::Event, _>(wrapper, "click", move |event| {
        // Clicks on the text itself are for typing; clicks on the native input
        // include the synthetic one sent by the picker fallback.
        if dom::targets(&event, &f.display) || dom::targets(&event, &f.native) {
            return;
        }
        open_picker(&f);
    })?;
    Ok(())
}
