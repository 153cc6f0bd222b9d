use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info};
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MouseEvent};

use crate::dom;
use crate::error::SiteError;

const ACTIVE_CLASS: &str = "active";

/// Open/closed state of the mobile navigation panel. Starts closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavState {
    open: bool,
}

impl NavState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    /// Next state for an event that only closes an open panel
    /// (link click, Escape). `None` when nothing changes.
    pub fn dismissed(self) -> Option<Self> {
        self.open.then_some(Self { open: false })
    }
}

pub struct Navigation {
    nav: Element,
    toggle: Element,
    body: Option<HtmlElement>,
    state: Cell<NavState>,
}

impl Navigation {
    pub fn bind(document: &Document) -> Result<Option<Rc<Self>>, SiteError> {
        let (Some(nav), Some(toggle)) = (
            document.get_element_by_id("nav"),
            document.get_element_by_id("navToggle"),
        ) else {
            debug!("Navigation elements missing");
            return Ok(None);
        };

        let controller = Rc::new(Self {
            nav,
            toggle,
            body: document.body(),
            state: Cell::new(NavState::default()),
        });

        {
            let toggle = controller.toggle.clone();
            let controller = controller.clone();
            dom::listen(&toggle, "click", move |_: MouseEvent| {
                dom::log_failure("toggling nav", controller.toggle_nav());
            })?;
        }

        for link in dom::query_all::<Element>(&controller.nav, ".nav-link")? {
            let controller = controller.clone();
            dom::listen(&link, "click", move |_: MouseEvent| {
                dom::log_failure("closing nav", controller.dismiss());
            })?;
        }

        {
            let controller = controller.clone();
            dom::listen(document, "keydown", move |e: KeyboardEvent| {
                if e.key() == "Escape" {
                    dom::log_failure("closing nav", controller.dismiss());
                }
            })?;
        }

        info!("Navigation bound");
        Ok(Some(controller))
    }

    pub fn is_open(&self) -> bool {
        self.state.get().is_open()
    }

    pub fn toggle_nav(&self) -> Result<(), SiteError> {
        self.apply(self.state.get().toggled())
    }

    pub fn open_nav(&self) -> Result<(), SiteError> {
        self.apply(NavState { open: true })
    }

    pub fn close_nav(&self) -> Result<(), SiteError> {
        self.apply(NavState { open: false })
    }

    fn dismiss(&self) -> Result<(), SiteError> {
        match self.state.get().dismissed() {
            Some(next) => self.apply(next),
            None => Ok(()),
        }
    }

    fn apply(&self, next: NavState) -> Result<(), SiteError> {
        debug!("Navigation open: {}", next.is_open());
        self.state.set(next);

        let open = next.is_open();
        self.nav.class_list().toggle_with_force(ACTIVE_CLASS, open)?;
        self.toggle.class_list().toggle_with_force(ACTIVE_CLASS, open)?;
        if let Some(body) = &self.body {
            // Locks page scroll while the panel covers it.
            dom::set_style(body, "overflow", if open { "hidden" } else { "" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        assert!(!NavState::default().is_open());
    }

    #[test]
    fn toggle_flips() {
        let state = NavState::default().toggled();
        assert!(state.is_open());
        assert!(!state.toggled().is_open());
    }

    #[test]
    fn dismiss_only_affects_open_panel() {
        assert_eq!(NavState::default().dismissed(), None);
        let open = NavState::default().toggled();
        assert_eq!(open.dismissed(), Some(NavState::default()));
    }
}
