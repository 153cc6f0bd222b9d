//! Page behaviour for the AmplifyX marketing site: loader overlay, sticky
//! header, mobile navigation, reveal-on-scroll, smooth anchors, the contact
//! and newsletter forms, and the two carousels.
//!
//! Every controller binds to markup that is already on the page and skips
//! itself when its elements are missing.

pub mod config;
pub mod cursor;
pub mod dom;
pub mod effects;
pub mod error;
pub mod forms;
pub mod header;
pub mod loader;
pub mod navigation;
pub mod process_carousel;
pub mod reveal;
pub mod slideshow;
pub mod smooth_scroll;
pub mod timing;

use log::{info, warn};
use web_sys::{Document, Event, Window};

use crate::config::Config;
use crate::error::SiteError;

/// Binds every controller once the document is parsed.
pub fn run() -> Result<(), SiteError> {
    let window = dom::window()?;
    let document = dom::document(&window)?;

    if document.ready_state() == "loading" {
        let (ready_window, ready_document) = (window.clone(), document.clone());
        dom::listen(&document, "DOMContentLoaded", move |_: Event| {
            bind_all(&ready_window, &ready_document);
        })?;
    } else {
        bind_all(&window, &document);
    }
    Ok(())
}

fn bind_all(window: &Window, document: &Document) {
    let config = Config::default();

    report("loader", loader::Loader::bind(window, document, &config));
    report("header", header::Header::bind(window, document, &config));
    report("navigation", navigation::Navigation::bind(document));
    report("scroll animations", reveal::bind(document, &config));
    report("smooth scroll", smooth_scroll::bind(window, document));
    report("forms", forms::bind(document, &config));
    report("slideshow", slideshow::Slideshow::bind(document, &config));
    report("magnetic buttons", effects::bind_magnetic_buttons(document, &config));
    report("hero parallax", effects::bind_hero_parallax(window, document, &config));
    report(
        "process carousel",
        process_carousel::ProcessCarousel::bind(window, document, &config),
    );

    info!("Site scripts ready");
}

/// A component that fails to bind stays inert; the rest of the page carries on.
fn report<T>(component: &str, result: Result<T, SiteError>) {
    if let Err(e) = result {
        warn!("Could not bind {}: {}", component, e);
    }
}
