use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_timers::callback::Interval;
use log::{debug, info};
use web_sys::{Document, Element, Event, KeyboardEvent, MouseEvent};

use crate::config::Config;
use crate::cursor::WrappingCursor;
use crate::dom;
use crate::error::SiteError;

const ACTIVE_CLASS: &str = "active";

/// Auto-advancing project slideshow with dot indicators.
///
/// Manual navigation (buttons, dots, arrow keys) and auto-play are
/// independent: a manual step does not restart the timer.
pub struct Slideshow {
    slides: Vec<Element>,
    dots: Vec<Element>,
    cursor: Cell<WrappingCursor>,
    auto_play: RefCell<Option<Interval>>,
    interval_ms: u32,
    weak_self: Weak<Slideshow>,
}

impl Slideshow {
    pub fn bind(document: &Document, config: &Config) -> Result<Option<Rc<Self>>, SiteError> {
        let slides = dom::query_all::<Element>(document, ".slideshow-slide")?;
        let dots = dom::query_all::<Element>(document, ".slideshow-dots .dot")?;
        let Some(slideshow) = Self::new(slides, dots, config.slideshow_interval_ms) else {
            debug!("No slides on this page");
            return Ok(None);
        };

        if let Some(prev) = dom::query::<Element>(document, ".slideshow-prev")? {
            let slideshow = slideshow.clone();
            dom::listen(&prev, "click", move |_: MouseEvent| {
                dom::log_failure("slideshow prev", slideshow.prev());
            })?;
        }
        if let Some(next) = dom::query::<Element>(document, ".slideshow-next")? {
            let slideshow = slideshow.clone();
            dom::listen(&next, "click", move |_: MouseEvent| {
                dom::log_failure("slideshow next", slideshow.next());
            })?;
        }

        for (index, dot) in slideshow.dots.iter().enumerate() {
            let slideshow = slideshow.clone();
            dom::listen(dot, "click", move |_: MouseEvent| {
                dom::log_failure("slideshow dot", slideshow.go_to_slide(index));
            })?;
        }

        slideshow.start_auto_play();

        if let Some(container) = dom::query::<Element>(document, ".slideshow-container")? {
            {
                let slideshow = slideshow.clone();
                dom::listen(&container, "mouseenter", move |_: Event| slideshow.stop_auto_play())?;
            }
            {
                let slideshow = slideshow.clone();
                dom::listen(&container, "mouseleave", move |_: Event| slideshow.start_auto_play())?;
            }
        }

        {
            let slideshow = slideshow.clone();
            dom::listen(document, "keydown", move |e: KeyboardEvent| {
                let result = match e.key().as_str() {
                    "ArrowLeft" => slideshow.prev(),
                    "ArrowRight" => slideshow.next(),
                    _ => Ok(()),
                };
                dom::log_failure("slideshow keys", result);
            })?;
        }

        info!("Slideshow bound with {} slides", slideshow.slides.len());
        Ok(Some(slideshow))
    }

    /// `None` when there are no slides. The markup is expected to mark the
    /// first slide and dot active.
    pub fn new(slides: Vec<Element>, dots: Vec<Element>, interval_ms: u32) -> Option<Rc<Self>> {
        if slides.is_empty() {
            return None;
        }
        Some(Rc::new_cyclic(|weak_self| Self {
            cursor: Cell::new(WrappingCursor::new(slides.len())),
            slides,
            dots,
            auto_play: RefCell::new(None),
            interval_ms,
            weak_self: weak_self.clone(),
        }))
    }

    pub fn index(&self) -> usize {
        self.cursor.get().index()
    }

    pub fn go_to_slide(&self, index: usize) -> Result<(), SiteError> {
        let mut cursor = self.cursor.get();
        let current = cursor.index();
        if !cursor.go_to(index) {
            return Ok(());
        }

        self.set_active(current, false)?;
        self.cursor.set(cursor);
        self.set_active(index, true)?;
        debug!("Slide {} -> {}", current, index);
        Ok(())
    }

    pub fn next(&self) -> Result<(), SiteError> {
        self.go_to_slide(self.cursor.get().following())
    }

    pub fn prev(&self) -> Result<(), SiteError> {
        self.go_to_slide(self.cursor.get().preceding())
    }

    /// Always clears the running timer before starting a new one.
    pub fn start_auto_play(&self) {
        self.stop_auto_play();
        let slideshow = self.weak_self.clone();
        let interval = Interval::new(self.interval_ms, move || {
            if let Some(slideshow) = slideshow.upgrade() {
                dom::log_failure("slideshow auto-play", slideshow.next());
            }
        });
        *self.auto_play.borrow_mut() = Some(interval);
    }

    pub fn stop_auto_play(&self) {
        // Dropping the interval clears it.
        self.auto_play.borrow_mut().take();
    }

    pub fn is_auto_playing(&self) -> bool {
        self.auto_play.borrow().is_some()
    }

    fn set_active(&self, index: usize, active: bool) -> Result<(), SiteError> {
        // Fewer dots than slides leaves the extra slides without an indicator.
        for element in [self.slides.get(index), self.dots.get(index)].into_iter().flatten() {
            element.class_list().toggle_with_force(ACTIVE_CLASS, active)?;
        }
        Ok(())
    }
}
