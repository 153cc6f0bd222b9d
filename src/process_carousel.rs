use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info};
use web_sys::{Document, HtmlElement, MouseEvent, Window};

use crate::config::Config;
use crate::cursor::ClampedCursor;
use crate::dom::{self, set_style};
use crate::error::SiteError;

const DIMMED: &str = "0.3";
const ENABLED: &str = "1";

/// One process card at a time, stepping with prev/next buttons. Mobile only.
pub struct ProcessCarousel {
    cards: Vec<HtmlElement>,
    prev_button: HtmlElement,
    next_button: HtmlElement,
    cursor: Cell<ClampedCursor>,
}

impl ProcessCarousel {
    /// The viewport width is checked once here; resizing later does not
    /// enable or disable the carousel.
    pub fn bind(window: &Window, document: &Document, config: &Config) -> Result<Option<Rc<Self>>, SiteError> {
        if dom::inner_width(window) > config.mobile_breakpoint_px {
            debug!("Viewport wider than {}px, process carousel stays off", config.mobile_breakpoint_px);
            return Ok(None);
        }

        let cards = dom::query_all::<HtmlElement>(document, ".process-card")?;
        let prev_button = dom::query::<HtmlElement>(document, ".process-prev")?;
        let next_button = dom::query::<HtmlElement>(document, ".process-next")?;
        let (Some(prev_button), Some(next_button)) = (prev_button, next_button) else {
            debug!("Process carousel controls missing");
            return Ok(None);
        };

        let Some(carousel) = Self::new(cards, prev_button, next_button)? else {
            return Ok(None);
        };

        {
            let target = carousel.prev_button.clone();
            let carousel = carousel.clone();
            dom::listen(&target, "click", move |_: MouseEvent| {
                dom::log_failure("process carousel", carousel.prev());
            })?;
        }
        {
            let target = carousel.next_button.clone();
            let carousel = carousel.clone();
            dom::listen(&target, "click", move |_: MouseEvent| {
                dom::log_failure("process carousel", carousel.next());
            })?;
        }

        info!("Process carousel bound with {} cards", carousel.cards.len());
        Ok(Some(carousel))
    }

    /// Builds the carousel over existing elements and renders the first card.
    /// `None` when there are no cards.
    pub fn new(cards: Vec<HtmlElement>, prev_button: HtmlElement, next_button: HtmlElement) -> Result<Option<Rc<Self>>, SiteError> {
        if cards.is_empty() {
            return Ok(None);
        }

        let carousel = Rc::new(Self {
            cursor: Cell::new(ClampedCursor::new(cards.len())),
            cards,
            prev_button,
            next_button,
        });
        carousel.update_view()?;
        Ok(Some(carousel))
    }

    pub fn index(&self) -> usize {
        self.cursor.get().index()
    }

    pub fn prev(&self) -> Result<(), SiteError> {
        let mut cursor = self.cursor.get();
        cursor.prev();
        self.cursor.set(cursor);
        self.update_view()
    }

    pub fn next(&self) -> Result<(), SiteError> {
        let mut cursor = self.cursor.get();
        cursor.next();
        self.cursor.set(cursor);
        self.update_view()
    }

    fn update_view(&self) -> Result<(), SiteError> {
        let cursor = self.cursor.get();
        for (index, card) in self.cards.iter().enumerate() {
            set_style(card, "display", if index == cursor.index() { "block" } else { "none" })?;
        }

        // End buttons stay clickable; clamping turns the click into a no-op.
        set_style(&self.prev_button, "opacity", if cursor.at_start() { DIMMED } else { ENABLED })?;
        set_style(&self.next_button, "opacity", if cursor.at_end() { DIMMED } else { ENABLED })?;
        Ok(())
    }
}
