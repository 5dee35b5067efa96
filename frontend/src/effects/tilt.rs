use web_sys::{Document, HtmlElement, MouseEvent};

use crate::config::TiltConfig;
use crate::error::UiResult;
use crate::utils::dom;

const TILT_SELECTOR: &str = ".service-item, .quote-card, .mv-card";

/// Rotation in degrees about the X and Y axes for a pointer at `(x, y)`
/// relative to the top-left corner of a `width` by `height` box.
///
/// The pointer's distance from the center, as a fraction of the half-size,
/// scales `max_degrees`. Pointer below center tips the top edge towards the
/// viewer, pointer right of center turns the right edge away.
pub fn angles(x: f64, y: f64, width: f64, height: f64, max_degrees: f64) -> (f64, f64) {
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    let (center_x, center_y) = (width / 2.0, height / 2.0);
    let rotate_x = ((y - center_y) / center_y * -max_degrees).clamp(-max_degrees, max_degrees);
    let rotate_y = ((x - center_x) / center_x * max_degrees).clamp(-max_degrees, max_degrees);
    // `+ 0.0` turns a negative zero into a plain zero.
    (rotate_x + 0.0, rotate_y + 0.0)
}

pub fn hover_transform(rotate_x: f64, rotate_y: f64, config: &TiltConfig) -> String {
    format!(
        "perspective({}px) rotateX({}deg) rotateY({}deg) scale({})",
        config.perspective_px, rotate_x, rotate_y, config.hover_scale
    )
}

pub fn rest_transform(config: &TiltConfig) -> String {
    format!(
        "perspective({}px) rotateX(0) rotateY(0) scale(1)",
        config.perspective_px
    )
}

/// Tilts cards towards the pointer and eases them back when it leaves.
pub fn mount(document: &Document, config: &TiltConfig) -> UiResult<usize> {
    let cards = dom::query_all::<HtmlElement>(document, TILT_SELECTOR)?;
    for card in &cards {
        let target = card.clone();
        let tilt = config.clone();
        dom::listen::<MouseEvent, _>(card, "mousemove", move |event| {
            let rect = target.get_bounding_client_rect();
            let x = f64::from(event.client_x()) - rect.left();
            let y = f64::from(event.client_y()) - rect.top();
            let (rotate_x, rotate_y) = angles(x, y, rect.width(), rect.height(), tilt.max_degrees);
            let transform = hover_transform(rotate_x, rotate_y, &tilt);
            if let Err(e) = apply(&target, &transform, &tilt.track_transition) {
                log::warn!("Tilt update failed: {}", e);
            }
        })?;

        let target = card.clone();
        let rest = rest_transform(config);
        let transition = config.reset_transition.clone();
        dom::listen::<MouseEvent, _>(card, "mouseleave", move |_| {
            if let Err(e) = apply(&target, &rest, &transition) {
                log::warn!("Tilt reset failed: {}", e);
            }
        })?;
    }
    log::debug!("Tilt bound to {} cards", cards.len());
    Ok(cards.len())
}

fn apply(card: &HtmlElement, transform: &str, transition: &str) -> UiResult<()> {
    dom::set_style(card, "transform", transform)?;
    dom::set_style(card, "transition", transition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_flat() {
        assert_eq!(angles(100.0, 50.0, 200.0, 100.0, 5.0), (0.0, 0.0));
    }

    #[test]
    fn corners_reach_the_limit() {
        assert_eq!(angles(0.0, 0.0, 200.0, 100.0, 5.0), (5.0, -5.0));
        assert_eq!(angles(200.0, 100.0, 200.0, 100.0, 5.0), (-5.0, 5.0));
    }

    #[test]
    fn pointer_outside_the_box_is_clamped() {
        assert_eq!(angles(-50.0, 300.0, 200.0, 100.0, 5.0), (-5.0, -5.0));
    }

    #[test]
    fn empty_box_stays_flat() {
        assert_eq!(angles(10.0, 10.0, 0.0, 0.0, 5.0), (0.0, 0.0));
    }

    #[test]
    fn formats_transforms() {
        let config = TiltConfig::default();
        assert_eq!(
            hover_transform(2.5, -1.25, &config),
            "perspective(1000px) rotateX(2.5deg) rotateY(-1.25deg) scale(1.02)"
        );
        assert_eq!(
            rest_transform(&config),
            "perspective(1000px) rotateX(0) rotateY(0) scale(1)"
        );
        let (x, y) = angles(100.0, 50.0, 200.0, 100.0, 5.0);
        assert_eq!(
            hover_transform(x, y, &config),
            "perspective(1000px) rotateX(0deg) rotateY(0deg) scale(1.02)"
        );
    }
}
