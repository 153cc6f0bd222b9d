use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info};
use web_sys::{Document, Element, Event, HtmlElement, Window};

use crate::config::Config;
use crate::dom;
use crate::error::SiteError;

const SCROLLED_CLASS: &str = "scrolled";
const ACTIVE_CLASS: &str = "active";

pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// The section whose `[top, top + height)` holds `position`. Overlapping
/// sections resolve to the last match in document order.
pub fn active_section(sections: &[SectionBounds], position: f64) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|section| section.contains(position))
        .map(|section| section.id.as_str())
}

pub struct Header {
    header: HtmlElement,
    window: Window,
    document: Document,
    last_scroll_y: Cell<f64>,
    scrolled_threshold: f64,
    lookahead: f64,
}

impl Header {
    pub fn bind(window: &Window, document: &Document, config: &Config) -> Result<Option<Rc<Self>>, SiteError> {
        let Some(header) = dom::by_id::<HtmlElement>(document, "header") else {
            debug!("No #header on this page");
            return Ok(None);
        };

        let controller = Rc::new(Self {
            header,
            window: window.clone(),
            document: document.clone(),
            last_scroll_y: Cell::new(0.0),
            scrolled_threshold: config.scrolled_threshold_px,
            lookahead: config.nav_lookahead_px,
        });

        controller.handle_scroll()?;
        {
            let controller = controller.clone();
            dom::listen_passive(window, "scroll", move |_: Event| {
                dom::log_failure("header scroll", controller.handle_scroll());
            })?;
        }

        info!("Header bound");
        Ok(Some(controller))
    }

    pub fn last_scroll_y(&self) -> f64 {
        self.last_scroll_y.get()
    }

    pub fn handle_scroll(&self) -> Result<(), SiteError> {
        let scroll_y = dom::scroll_y(&self.window);

        self.header
            .class_list()
            .toggle_with_force(SCROLLED_CLASS, is_scrolled(scroll_y, self.scrolled_threshold))?;
        self.update_active_nav(scroll_y)?;

        self.last_scroll_y.set(scroll_y);
        Ok(())
    }

    fn update_active_nav(&self, scroll_y: f64) -> Result<(), SiteError> {
        let sections: Vec<SectionBounds> = dom::query_all::<HtmlElement>(&self.document, "section[id]")?
            .into_iter()
            .map(|section| SectionBounds {
                id: section.id(),
                top: section.offset_top() as f64,
                height: section.offset_height() as f64,
            })
            .collect();

        let Some(active) = active_section(&sections, scroll_y + self.lookahead) else {
            return Ok(());
        };

        let target = format!("#{}", active);
        for link in dom::query_all::<Element>(&self.document, ".nav-link")? {
            let is_target = link.get_attribute("href").as_deref() == Some(target.as_str());
            link.class_list().toggle_with_force(ACTIVE_CLASS, is_target)?;
        }
        Ok(())
    }
}
