use log::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::config::Config;
use crate::dom::{self, set_style};
use crate::error::SiteError;

pub const FADE_IN_UP: &str = "fade-in-up";
pub const STAGGER: &str = "stagger";
pub const VISIBLE: &str = "visible";

const OBSERVED: &str = ".fade-in-up, .stagger, .text-reveal";

/// `transition-delay` value for the `index`-th item of a staggered group.
pub fn stagger_delay(index: usize, step_s: f64) -> String {
    let seconds = (index as f64 * step_s * 1000.0).round() / 1000.0;
    format!("{}s", seconds)
}

/// Marks the page's reveal targets with their animation classes.
pub fn tag_elements(document: &Document, config: &Config) -> Result<(), SiteError> {
    for header in dom::query_all::<Element>(document, ".section-header")? {
        header.class_list().add_1(FADE_IN_UP)?;
    }

    for (index, item) in dom::query_all::<HtmlElement>(document, ".service-item")?
        .into_iter()
        .enumerate()
    {
        item.class_list().add_1(FADE_IN_UP)?;
        set_style(&item, "transition-delay", &stagger_delay(index, config.stagger_step_s))?;
    }

    let singles = [
        (".about-quote", FADE_IN_UP),
        (".process-grid", STAGGER),
        (".slideshow-container", FADE_IN_UP),
        (".pricing-grid", STAGGER),
        (".cta-content", FADE_IN_UP),
    ];
    for (selector, class) in singles {
        if let Some(element) = dom::query::<Element>(document, selector)? {
            element.class_list().add_1(class)?;
        }
    }
    Ok(())
}

/// Adds `visible` and, for stagger containers, spreads the children's delays.
pub fn reveal(target: &Element, step_s: f64) -> Result<(), SiteError> {
    target.class_list().add_1(VISIBLE)?;

    if target.class_list().contains(STAGGER) {
        let children = target.children();
        for index in 0..children.length() {
            let Some(child) = children
                .item(index)
                .and_then(|child| child.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            set_style(&child, "transition-delay", &stagger_delay(index as usize, step_s))?;
        }
    }
    Ok(())
}

/// Tags the page and starts watching the tagged elements. Reveals are
/// one-way: nothing is unobserved and `visible` is never removed.
pub fn bind(document: &Document, config: &Config) -> Result<usize, SiteError> {
    tag_elements(document, config)?;

    let step_s = config.stagger_step_s;
    let callback = Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if entry.is_intersecting() {
                dom::log_failure("revealing element", reveal(&entry.target(), step_s));
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_root_margin("0px");
    options.set_threshold(&JsValue::from_f64(config.reveal_threshold));

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    let targets = dom::query_all::<Element>(document, OBSERVED)?;
    for target in &targets {
        observer.observe(target);
    }
    debug!("Observing {} reveal targets", targets.len());

    info!("Scroll animations bound");
    Ok(targets.len())
}
