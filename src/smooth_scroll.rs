use log::info;
use web_sys::{Document, Element, HtmlElement, MouseEvent, ScrollBehavior, ScrollToOptions, Window};

use crate::dom;
use crate::error::SiteError;

/// Document offset that brings `target_top` (viewport-relative) just below
/// the fixed header.
pub fn scroll_target(target_top: f64, scroll_y: f64, header_height: f64) -> f64 {
    target_top + scroll_y - header_height
}

/// Attaches smooth scrolling to every in-page anchor. Returns how many
/// anchors were bound.
pub fn bind(window: &Window, document: &Document) -> Result<usize, SiteError> {
    let anchors = dom::query_all::<Element>(document, "a[href^=\"#\"]")?;

    for anchor in &anchors {
        let window = window.clone();
        let document = document.clone();
        let href_source = anchor.clone();
        dom::listen(anchor, "click", move |e: MouseEvent| {
            e.prevent_default();
            let Some(href) = href_source.get_attribute("href") else {
                return;
            };
            scroll_to_fragment(&window, &document, &href);
        })?;
    }

    info!("Smooth scroll bound to {} anchors", anchors.len());
    Ok(anchors.len())
}

pub fn scroll_to_fragment(window: &Window, document: &Document, href: &str) {
    // A bare "#" is a placeholder link.
    if href == "#" {
        return;
    }

    // Fragments that are not valid selectors resolve to nothing.
    let Ok(Some(target)) = dom::query::<Element>(document, href) else {
        return;
    };

    let header_height = dom::by_id::<HtmlElement>(document, "header")
        .map(|header| header.offset_height() as f64)
        .unwrap_or(0.0);
    let top = scroll_target(
        target.get_bounding_client_rect().top(),
        dom::scroll_y(window),
        header_height,
    );

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}
