use log::info;
use web_sys::{Document, Event, HtmlElement, MouseEvent, Window};

use crate::config::Config;
use crate::dom::{self, set_style};
use crate::error::SiteError;
use crate::timing::throttle;

/// Pointer offset from the element centre, scaled by `strength`.
pub fn magnetic_offset(client_x: f64, client_y: f64, left: f64, top: f64, width: f64, height: f64, strength: f64) -> (f64, f64) {
    let x = client_x - left - width / 2.0;
    let y = client_y - top - height / 2.0;
    (x * strength, y * strength)
}

/// Hero shift for the current scroll, or `None` once the hero has scrolled out.
pub fn parallax_shift(scroll_y: f64, viewport_height: f64, factor: f64) -> Option<f64> {
    (scroll_y < viewport_height).then(|| scroll_y * factor)
}

/// Buttons drift toward the pointer while it hovers over them.
pub fn bind_magnetic_buttons(document: &Document, config: &Config) -> Result<usize, SiteError> {
    let buttons = dom::query_all::<HtmlElement>(document, ".btn-primary, .btn-circle")?;

    for button in &buttons {
        let strength = config.magnetic_strength;
        let target = button.clone();
        dom::listen(button, "mousemove", move |e: MouseEvent| {
            let rect = target.get_bounding_client_rect();
            let (x, y) = magnetic_offset(
                e.client_x() as f64,
                e.client_y() as f64,
                rect.left(),
                rect.top(),
                rect.width(),
                rect.height(),
                strength,
            );
            dom::log_failure(
                "magnetic button",
                set_style(&target, "transform", &format!("translate({}px, {}px)", x, y)),
            );
        })?;

        let target = button.clone();
        dom::listen(button, "mouseleave", move |_: MouseEvent| {
            dom::log_failure("magnetic button", set_style(&target, "transform", ""));
        })?;
    }

    info!("Magnetic effect bound to {} buttons", buttons.len());
    Ok(buttons.len())
}

/// Throttled scroll handler that drifts `.hero-visual` downward.
pub fn bind_hero_parallax(window: &Window, document: &Document, config: &Config) -> Result<(), SiteError> {
    let factor = config.parallax_factor;
    let scroll_window = window.clone();
    let document = document.clone();

    let mut on_scroll = throttle(config.parallax_throttle_ms, move |_: Event| {
        let Ok(Some(hero)) = dom::query::<HtmlElement>(&document, ".hero-visual") else {
            return;
        };
        let shift = parallax_shift(
            dom::scroll_y(&scroll_window),
            dom::inner_height(&scroll_window),
            factor,
        );
        if let Some(shift) = shift {
            dom::log_failure("hero parallax", set_style(&hero, "transform", &format!("translateY({}px)", shift)));
        }
    });

    dom::listen(window, "scroll", move |e: Event| on_scroll(e))?;
    info!("Hero parallax bound");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_at_centre_has_no_offset() {
        assert_eq!(magnetic_offset(150.0, 70.0, 100.0, 50.0, 100.0, 40.0, 0.1), (0.0, 0.0));
    }

    #[test]
    fn pointer_offset_is_scaled() {
        let (x, y) = magnetic_offset(200.0, 50.0, 100.0, 50.0, 100.0, 40.0, 0.1);
        assert!((x - 5.0).abs() < 1e-9);
        assert!((y + 2.0).abs() < 1e-9);
    }

    #[test]
    fn parallax_stops_below_the_fold() {
        assert_eq!(parallax_shift(100.0, 800.0, 0.1), Some(10.0));
        assert_eq!(parallax_shift(800.0, 800.0, 0.1), None);
    }
}
