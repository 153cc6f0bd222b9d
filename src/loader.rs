use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info};
use web_sys::{Document, Element, Event, HtmlElement, Window};

use crate::config::Config;
use crate::dom::{self, set_style};
use crate::error::SiteError;

const HIDDEN_CLASS: &str = "hidden";
const LOADING_CLASS: &str = "loading";

/// Hero elements in entrance order with their starting offset.
const HERO_ELEMENTS: [(&str, &str, &str); 3] = [
    (".hero-title", "translateY(40px)", "translateY(0)"),
    (".hero-info", "translateY(40px)", "translateY(0)"),
    (".hero-visual", "translateX(40px)", "translateX(0)"),
];

pub struct Loader {
    overlay: Element,
    body: Option<HtmlElement>,
    document: Document,
    config: Config,
}

impl Loader {
    pub fn bind(window: &Window, document: &Document, config: &Config) -> Result<Option<Rc<Self>>, SiteError> {
        let Some(loader) = Self::new(document, config) else {
            debug!("No #loader on this page");
            return Ok(None);
        };
        let loader = Rc::new(loader);

        if let Some(body) = &loader.body {
            body.class_list().add_1(LOADING_CLASS)?;
        }

        // The module can start after `load` has already fired.
        if document.ready_state() == "complete" {
            loader.schedule_hide();
        } else {
            let loader = loader.clone();
            dom::listen(window, "load", move |_: Event| loader.schedule_hide())?;
        }

        info!("Loader bound");
        Ok(Some(loader))
    }

    /// `None` when the page has no `#loader` overlay.
    pub fn new(document: &Document, config: &Config) -> Option<Self> {
        let overlay = document.get_element_by_id("loader")?;
        Some(Self {
            overlay,
            body: document.body(),
            document: document.clone(),
            config: config.clone(),
        })
    }

    fn schedule_hide(self: &Rc<Self>) {
        let loader = self.clone();
        Timeout::new(self.config.loader_delay_ms, move || {
            dom::log_failure("hiding loader", loader.hide());
        })
        .forget();
    }

    pub fn hide(&self) -> Result<(), SiteError> {
        self.overlay.class_list().add_1(HIDDEN_CLASS)?;
        if let Some(body) = &self.body {
            body.class_list().remove_1(LOADING_CLASS)?;
        }
        self.animate_hero()
    }

    fn animate_hero(&self) -> Result<(), SiteError> {
        let transition = format!(
            "opacity {s}s ease, transform {s}s ease",
            s = self.config.hero_transition_s
        );

        for ((selector, from, to), delay) in HERO_ELEMENTS.iter().zip(self.config.hero_delays_ms) {
            let Some(element) = dom::query::<HtmlElement>(&self.document, selector)? else {
                continue;
            };
            set_style(&element, "opacity", "0")?;
            set_style(&element, "transform", from)?;

            let transition = transition.clone();
            let to = *to;
            Timeout::new(delay, move || {
                let settle = || -> Result<(), SiteError> {
                    set_style(&element, "transition", &transition)?;
                    set_style(&element, "opacity", "1")?;
                    set_style(&element, "transform", to)
                };
                dom::log_failure("hero entrance", settle());
            })
            .forget();
        }
        Ok(())
    }
}
