use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, FormData, HtmlFormElement};

use crate::config::Config;
use crate::dom;
use crate::error::SiteError;

pub const MESSAGE_CLASS: &str = "success-message";
pub const FAILURE_MESSAGE: &str = "Oops! Something went wrong. Please try again.";

const MESSAGE_STYLE: &str = "position: absolute; bottom: -30px; left: 50%; \
    transform: translateX(-50%); color: #c8ff00; font-size: 14px; font-weight: 500;";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Cta,
    Newsletter,
}

impl FormKind {
    pub const ALL: [FormKind; 2] = [FormKind::Cta, FormKind::Newsletter];

    pub fn element_id(self) -> &'static str {
        match self {
            FormKind::Cta => "ctaForm",
            FormKind::Newsletter => "newsletterForm",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            FormKind::Cta => "Thanks! We'll be in touch soon.",
            FormKind::Newsletter => "You're subscribed!",
        }
    }

    pub fn message_for(self, outcome: SubmitOutcome) -> &'static str {
        match outcome {
            SubmitOutcome::Delivered => self.success_message(),
            SubmitOutcome::Failed => FAILURE_MESSAGE,
        }
    }
}

/// What the visitor gets told. Transport errors and error statuses look the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Delivered,
    Failed,
}

impl SubmitOutcome {
    pub fn from_result(result: &Result<(), SiteError>) -> Self {
        match result {
            Ok(()) => SubmitOutcome::Delivered,
            Err(_) => SubmitOutcome::Failed,
        }
    }
}

/// POSTs the form's fields to its `action`, asking for JSON back.
pub async fn submit(form: &HtmlFormElement) -> Result<(), SiteError> {
    let data = FormData::new_with_form(form)?;
    let response = Request::post(&form.action())
        .header("Accept", "application/json")
        .body(data)
        .send()
        .await?;

    if response.ok() {
        Ok(())
    } else {
        Err(SiteError::Status(response.status()))
    }
}

/// Replaces any earlier message under `form` with `text` and removes the new
/// one after `lifetime_ms`.
pub fn show_message(document: &Document, form: &HtmlFormElement, text: &str, lifetime_ms: u32) -> Result<Element, SiteError> {
    let container: &Element = form;
    if let Some(existing) = dom::query::<Element>(container, &format!(".{}", MESSAGE_CLASS))? {
        existing.remove();
    }

    let message = document.create_element("div")?;
    message.set_class_name(MESSAGE_CLASS);
    message.set_text_content(Some(text));
    message.set_attribute("style", MESSAGE_STYLE)?;

    dom::set_style(form, "position", "relative")?;
    form.append_child(&message)?;

    // Not cancelled on resubmit; removing a detached node is harmless.
    let expiring = message.clone();
    Timeout::new(lifetime_ms, move || expiring.remove()).forget();

    Ok(message)
}

/// Sends the form and reports the result under it.
pub async fn handle_submit(document: &Document, form: &HtmlFormElement, kind: FormKind, lifetime_ms: u32) -> SubmitOutcome {
    let result = submit(form).await;
    if let Err(e) = &result {
        warn!("Submitting #{} failed: {}", kind.element_id(), e);
    }
    finish_submit(document, form, kind, &result, lifetime_ms)
}

/// Shows the message for `result`; only a delivered form is cleared.
pub fn finish_submit(
    document: &Document,
    form: &HtmlFormElement,
    kind: FormKind,
    result: &Result<(), SiteError>,
    lifetime_ms: u32,
) -> SubmitOutcome {
    let outcome = SubmitOutcome::from_result(result);
    dom::log_failure(
        "showing form message",
        show_message(document, form, kind.message_for(outcome), lifetime_ms).map(|_| ()),
    );
    if outcome == SubmitOutcome::Delivered {
        form.reset();
    }
    outcome
}

/// Binds every form present on the page. Returns the kinds that were bound.
pub fn bind(document: &Document, config: &Config) -> Result<Vec<FormKind>, SiteError> {
    let mut bound = Vec::new();

    for kind in FormKind::ALL {
        let Some(form) = dom::by_id::<HtmlFormElement>(document, kind.element_id()) else {
            debug!("No #{} on this page", kind.element_id());
            continue;
        };

        let document = document.clone();
        let lifetime_ms = config.message_lifetime_ms;
        let target = form.clone();
        dom::listen(&target, "submit", move |e: Event| {
            e.prevent_default();
            let form = form.clone();
            let document = document.clone();
            // No in-flight guard: overlapping submits each show their own result.
            spawn_local(async move {
                handle_submit(&document, &form, kind, lifetime_ms).await;
            });
        })?;

        info!("Form #{} bound", kind.element_id());
        bound.push(kind);
    }

    Ok(bound)
}
