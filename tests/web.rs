#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, KeyboardEvent, KeyboardEventInit,
    MouseEvent, MouseEventInit,
};

use amplifyx_site::config::Config;
use amplifyx_site::dom;
use amplifyx_site::error::SiteError;
use amplifyx_site::forms::{self, FormKind, SubmitOutcome};
use amplifyx_site::header::Header;
use amplifyx_site::loader::Loader;
use amplifyx_site::navigation::Navigation;
use amplifyx_site::process_carousel::ProcessCarousel;
use amplifyx_site::reveal;
use amplifyx_site::slideshow::Slideshow;
use amplifyx_site::smooth_scroll;
use amplifyx_site::timing::{debounce, throttle};

wasm_bindgen_test_configure!(run_in_browser);

/// Replaces the fixture markup, leaving the test runner's own output alone.
fn page(markup: &str) -> Document {
    let document = web_sys::window().unwrap().document().unwrap();
    let body = document.body().unwrap();
    let fixture = match document.get_element_by_id("fixture") {
        Some(fixture) => fixture,
        None => {
            let fixture = document.create_element("div").unwrap();
            fixture.set_id("fixture");
            body.prepend_with_node_1(&fixture).unwrap();
            fixture
        }
    };
    fixture.set_inner_html(markup);
    body.remove_attribute("style").unwrap();
    document
}

fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

fn style(element: &HtmlElement, property: &str) -> String {
    element.style().get_property_value(property).unwrap()
}

fn press(document: &Document, key: &str) {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    document.dispatch_event(&event).unwrap();
}

/// Dispatches a cancelable click; returns whether a handler prevented the default.
fn click_prevented(document: &Document, id: &str) -> bool {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = MouseEvent::new_with_mouse_event_init_dict("click", &init).unwrap();
    let target = document.get_element_by_id(id).unwrap();
    let not_cancelled = target.dispatch_event(&event).unwrap();
    assert_eq!(event.default_prevented(), !not_cancelled);
    event.default_prevented()
}

#[wasm_bindgen_test]
fn navigation_opens_and_closes() {
    let document = page(
        r##"<button id="navToggle"></button>
            <nav id="nav"><a class="nav-link" href="#about">About</a></nav>"##,
    );
    let nav = Navigation::bind(&document).unwrap().unwrap();
    let panel = document.get_element_by_id("nav").unwrap();
    let toggle: HtmlElement = dom::by_id(&document, "navToggle").unwrap();
    let body = document.body().unwrap();

    assert!(!nav.is_open());

    toggle.click();
    assert!(nav.is_open());
    assert!(has_class(&panel, "active"));
    assert!(has_class(&toggle, "active"));
    assert_eq!(style(&body, "overflow"), "hidden");

    let link: HtmlElement = dom::query(&document, ".nav-link").unwrap().unwrap();
    link.click();
    assert!(!nav.is_open());
    assert!(!has_class(&panel, "active"));
    assert_eq!(style(&body, "overflow"), "");

    toggle.click();
    press(&document, "Escape");
    assert!(!nav.is_open());
    assert!(!has_class(&toggle, "active"));

    // Escape on a closed panel changes nothing.
    press(&document, "Escape");
    assert!(!nav.is_open());
}

#[wasm_bindgen_test]
fn header_tracks_scroll_state_and_active_link() {
    let document = page(
        r##"<header id="header"></header>
            <a class="nav-link active" href="#pricing">Pricing</a>
            <a class="nav-link" href="#hero">Hero</a>
            <section id="hero" style="height: 600px"></section>
            <section id="pricing" style="height: 600px"></section>
            <div style="height: 3000px"></div>"##,
    );
    let window = web_sys::window().unwrap();
    window.scroll_to_with_x_and_y(0.0, 0.0);

    let header = Header::bind(&window, &document, &Config::default()).unwrap().unwrap();
    let bar = document.get_element_by_id("header").unwrap();
    let links = dom::query_all::<Element>(&document, ".nav-link").unwrap();

    assert_eq!(header.last_scroll_y(), 0.0);
    assert!(!has_class(&bar, "scrolled"));
    assert!(!has_class(&links[0], "active"));
    assert!(has_class(&links[1], "active"));

    window.scroll_to_with_x_and_y(0.0, 51.0);
    header.handle_scroll().unwrap();
    assert_eq!(header.last_scroll_y(), 51.0);
    assert!(has_class(&bar, "scrolled"));
    assert!(has_class(&links[1], "active"));

    // Look-ahead of 200px puts y=500 inside the pricing section.
    window.scroll_to_with_x_and_y(0.0, 500.0);
    header.handle_scroll().unwrap();
    assert!(has_class(&links[0], "active"));
    assert!(!has_class(&links[1], "active"));

    window.scroll_to_with_x_and_y(0.0, 50.0);
    header.handle_scroll().unwrap();
    assert!(!has_class(&bar, "scrolled"));

    window.scroll_to_with_x_and_y(0.0, 0.0);
    header.handle_scroll().unwrap();
    assert!(!has_class(&bar, "scrolled"));
}

#[wasm_bindgen_test]
async fn smooth_scroll_handles_in_page_anchors() {
    let document = page(
        r##"<header id="header" style="height: 80px"></header>
            <a id="to-placeholder" href="#">Top</a>
            <a id="to-missing" href="#missing">Missing</a>
            <a id="to-invalid" href="#1-not-a-selector">Invalid</a>
            <a id="to-target" href="#target">Target</a>
            <div style="height: 2000px"></div>
            <section id="target" style="height: 100px"></section>
            <div style="height: 3000px"></div>"##,
    );
    let window = web_sys::window().unwrap();
    window.scroll_to_with_x_and_y(0.0, 0.0);

    assert_eq!(smooth_scroll::bind(&window, &document).unwrap(), 4);

    for id in ["to-placeholder", "to-missing", "to-invalid"] {
        assert!(click_prevented(&document, id), "{} should not navigate", id);
    }
    TimeoutFuture::new(300).await;
    assert_eq!(dom::scroll_y(&window), 0.0);

    assert!(click_prevented(&document, "to-target"));
    TimeoutFuture::new(1_500).await;
    assert!(dom::scroll_y(&window) > 0.0);

    // The target ends up just below the header.
    let target = document.get_element_by_id("target").unwrap();
    let top = target.get_bounding_client_rect().top();
    assert!((top - 80.0).abs() <= 1.0, "target top was {}", top);

    window.scroll_to_with_x_and_y(0.0, 0.0);
}

#[wasm_bindgen_test]
async fn loader_hides_overlay_and_staggers_hero() {
    let document = page(
        r#"<div id="loader"></div>
           <h1 class="hero-title"></h1>
           <div class="hero-info"></div>
           <div class="hero-visual"></div>"#,
    );
    let body = document.body().unwrap();
    body.class_list().add_1("loading").unwrap();

    let loader = Loader::new(&document, &Config::default()).unwrap();
    loader.hide().unwrap();

    let overlay = document.get_element_by_id("loader").unwrap();
    assert!(has_class(&overlay, "hidden"));
    assert!(!has_class(&body, "loading"));

    let title: HtmlElement = dom::query(&document, ".hero-title").unwrap().unwrap();
    let info: HtmlElement = dom::query(&document, ".hero-info").unwrap().unwrap();
    let visual: HtmlElement = dom::query(&document, ".hero-visual").unwrap().unwrap();

    for element in [&title, &info, &visual] {
        assert_eq!(style(element, "opacity"), "0");
    }
    assert_eq!(style(&title, "transform"), "translateY(40px)");
    assert_eq!(style(&info, "transform"), "translateY(40px)");
    assert_eq!(style(&visual, "transform"), "translateX(40px)");

    TimeoutFuture::new(200).await;
    assert_eq!(style(&title, "opacity"), "1");
    assert_eq!(style(&title, "transition-property"), "opacity, transform");
    assert_eq!(style(&title, "transition-duration"), "0.8s, 0.8s");
    assert!(style(&title, "transform").starts_with("translateY(0"));
    assert_eq!(style(&info, "opacity"), "0");

    TimeoutFuture::new(200).await;
    assert_eq!(style(&info, "opacity"), "1");
    assert!(style(&info, "transform").starts_with("translateY(0"));
    assert_eq!(style(&visual, "opacity"), "0");

    TimeoutFuture::new(200).await;
    assert_eq!(style(&visual, "opacity"), "1");
    assert_eq!(style(&visual, "transition-duration"), "0.8s, 0.8s");
    assert!(style(&visual, "transform").starts_with("translateX(0"));
}

#[wasm_bindgen_test]
fn loader_without_overlay_is_inert() {
    let document = page(r#"<h1 class="hero-title"></h1>"#);
    let window = web_sys::window().unwrap();
    assert!(Loader::bind(&window, &document, &Config::default()).unwrap().is_none());
    assert!(Loader::new(&document, &Config::default()).is_none());
}

#[wasm_bindgen_test]
fn navigation_without_toggle_is_inert() {
    let document = page(r#"<nav id="nav"></nav>"#);
    assert!(Navigation::bind(&document).unwrap().is_none());
}

#[wasm_bindgen_test]
fn slideshow_wraps_and_moves_dots() {
    let document = page(
        r#"<div class="slideshow-slide active"></div><div class="slideshow-slide"></div>
           <div class="slideshow-slide"></div><div class="slideshow-slide"></div>
           <div class="slideshow-dots">
             <span class="dot active"></span><span class="dot"></span>
             <span class="dot"></span><span class="dot"></span>
           </div>"#,
    );
    let slides = dom::query_all::<Element>(&document, ".slideshow-slide").unwrap();
    let dots = dom::query_all::<Element>(&document, ".slideshow-dots .dot").unwrap();
    let show = Slideshow::new(slides.clone(), dots.clone(), 5000).unwrap();

    show.next().unwrap();
    assert_eq!(show.index(), 1);
    assert!(!has_class(&dots[0], "active"));
    assert!(has_class(&dots[1], "active"));
    assert!(has_class(&slides[1], "active"));

    for _ in 0..3 {
        show.next().unwrap();
    }
    assert_eq!(show.index(), 0);
    assert!(has_class(&dots[0], "active"));
    assert!(!has_class(&dots[3], "active"));

    show.prev().unwrap();
    assert_eq!(show.index(), 3);
    assert!(has_class(&slides[3], "active"));
    assert_eq!(
        slides.iter().filter(|slide| has_class(slide, "active")).count(),
        1
    );
}

#[wasm_bindgen_test]
fn slideshow_auto_play_restart_is_idempotent() {
    let document = page(r#"<div class="slideshow-slide active"></div><div class="slideshow-slide"></div>"#);
    let slides = dom::query_all::<Element>(&document, ".slideshow-slide").unwrap();
    let show = Slideshow::new(slides, Vec::new(), 5000).unwrap();

    show.start_auto_play();
    show.start_auto_play();
    assert!(show.is_auto_playing());

    // Manual steps leave the timer alone.
    show.go_to_slide(1).unwrap();
    assert!(show.is_auto_playing());

    show.stop_auto_play();
    assert!(!show.is_auto_playing());
}

#[wasm_bindgen_test]
async fn slideshow_advances_on_its_own() {
    let document = page(r#"<div class="slideshow-slide active"></div><div class="slideshow-slide"></div>"#);
    let slides = dom::query_all::<Element>(&document, ".slideshow-slide").unwrap();
    let show = Slideshow::new(slides, Vec::new(), 50).unwrap();

    show.start_auto_play();
    TimeoutFuture::new(80).await;
    show.stop_auto_play();
    assert_eq!(show.index(), 1);
}

#[wasm_bindgen_test]
fn process_carousel_clamps_at_both_ends() {
    let document = page(
        r#"<div class="process-card"></div><div class="process-card"></div><div class="process-card"></div>
           <button class="process-prev"></button><button class="process-next"></button>"#,
    );
    let cards = dom::query_all::<HtmlElement>(&document, ".process-card").unwrap();
    let prev: HtmlElement = dom::query(&document, ".process-prev").unwrap().unwrap();
    let next: HtmlElement = dom::query(&document, ".process-next").unwrap().unwrap();
    let carousel = ProcessCarousel::new(cards.clone(), prev.clone(), next.clone())
        .unwrap()
        .unwrap();

    assert_eq!(style(&cards[0], "display"), "block");
    assert_eq!(style(&cards[1], "display"), "none");
    assert_eq!(style(&prev, "opacity"), "0.3");
    assert_eq!(style(&next, "opacity"), "1");

    carousel.prev().unwrap();
    assert_eq!(carousel.index(), 0);

    for _ in 0..5 {
        carousel.next().unwrap();
    }
    assert_eq!(carousel.index(), 2);
    assert_eq!(style(&cards[2], "display"), "block");
    assert_eq!(style(&cards[0], "display"), "none");
    assert_eq!(style(&prev, "opacity"), "1");
    assert_eq!(style(&next, "opacity"), "0.3");
}

#[wasm_bindgen_test]
fn process_carousel_needs_cards() {
    let document = page(r#"<button class="process-prev"></button><button class="process-next"></button>"#);
    let prev: HtmlElement = dom::query(&document, ".process-prev").unwrap().unwrap();
    let next: HtmlElement = dom::query(&document, ".process-next").unwrap().unwrap();
    assert!(ProcessCarousel::new(Vec::new(), prev, next).unwrap().is_none());
}

#[wasm_bindgen_test]
async fn form_message_replaces_previous_and_expires() {
    let document = page(r#"<form id="newsletterForm" action="/subscribe"><input name="email"></form>"#);
    let form: HtmlFormElement = dom::by_id(&document, FormKind::Newsletter.element_id()).unwrap();
    let lifetime = Config::default().message_lifetime_ms;

    forms::show_message(&document, &form, FormKind::Newsletter.message_for(SubmitOutcome::Failed), lifetime).unwrap();
    TimeoutFuture::new(1_000).await;
    let latest = forms::show_message(
        &document,
        &form,
        FormKind::Newsletter.message_for(SubmitOutcome::Delivered),
        lifetime,
    )
    .unwrap();

    let container: &Element = &form;
    let messages = dom::query_all::<Element>(container, ".success-message").unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text_content().unwrap(), "You're subscribed!");

    // The first message's timer fires against a detached node.
    TimeoutFuture::new(2_200).await;
    assert!(latest.is_connected());

    TimeoutFuture::new(1_000).await;
    assert!(!latest.is_connected());
    assert!(dom::query::<Element>(container, ".success-message").unwrap().is_none());
}

fn form_with_input(id: &str, action: &str) -> (Document, HtmlFormElement, HtmlInputElement) {
    let document = page(&format!(
        r#"<form id="{}" action="{}"><input name="email"></form>"#,
        id, action
    ));
    let form: HtmlFormElement = dom::by_id(&document, id).unwrap();
    let input: HtmlInputElement = dom::query(&document, "input").unwrap().unwrap();
    input.set_value("ada@example.com");
    (document, form, input)
}

fn form_message(form: &HtmlFormElement) -> String {
    let container: &Element = form;
    dom::query::<Element>(container, ".success-message")
        .unwrap()
        .unwrap()
        .text_content()
        .unwrap()
}

#[wasm_bindgen_test]
fn rejected_cta_keeps_fields() {
    let (document, form, input) = form_with_input(FormKind::Cta.element_id(), "/contact");

    let outcome = forms::finish_submit(&document, &form, FormKind::Cta, &Err(SiteError::Status(500)), 3000);

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(form_message(&form), "Oops! Something went wrong. Please try again.");
    assert_eq!(input.value(), "ada@example.com");
}

#[wasm_bindgen_test]
fn delivered_newsletter_clears_fields() {
    let (document, form, input) = form_with_input(FormKind::Newsletter.element_id(), "/subscribe");

    let outcome = forms::finish_submit(&document, &form, FormKind::Newsletter, &Ok(()), 3000);

    assert_eq!(outcome, SubmitOutcome::Delivered);
    assert_eq!(form_message(&form), "You're subscribed!");
    assert_eq!(input.value(), "");
}

#[wasm_bindgen_test]
async fn cta_posted_to_unknown_endpoint_reports_failure() {
    let (document, form, input) =
        form_with_input(FormKind::Cta.element_id(), "/amplifyx-no-such-endpoint");

    let outcome = forms::handle_submit(&document, &form, FormKind::Cta, 3000).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(form_message(&form), forms::FAILURE_MESSAGE);
    assert_eq!(input.value(), "ada@example.com");
}

#[wasm_bindgen_test]
fn reveal_tags_and_staggers() {
    let document = page(
        r#"<div class="section-header"></div>
           <div class="service-item"></div><div class="service-item"></div><div class="service-item"></div>
           <div class="process-grid"><div></div><div></div><div></div></div>
           <div class="cta-content"></div>"#,
    );
    reveal::tag_elements(&document, &Config::default()).unwrap();

    let header: Element = dom::query(&document, ".section-header").unwrap().unwrap();
    assert!(has_class(&header, reveal::FADE_IN_UP));

    let items = dom::query_all::<HtmlElement>(&document, ".service-item").unwrap();
    assert_eq!(style(&items[2], "transition-delay"), "0.2s");

    let grid: Element = dom::query(&document, ".process-grid").unwrap().unwrap();
    assert!(has_class(&grid, reveal::STAGGER));
    assert!(!has_class(&grid, reveal::VISIBLE));

    reveal::reveal(&grid, 0.1).unwrap();
    reveal::reveal(&grid, 0.1).unwrap();
    assert!(has_class(&grid, reveal::VISIBLE));
    let child = grid.children().item(1).unwrap().dyn_into::<HtmlElement>().unwrap();
    assert_eq!(style(&child, "transition-delay"), "0.1s");
}

#[wasm_bindgen_test]
async fn throttle_drops_calls_inside_window() {
    let calls = Rc::new(Cell::new(0));
    let mut throttled = {
        let calls = calls.clone();
        throttle(30, move |_: ()| calls.set(calls.get() + 1))
    };

    throttled(());
    throttled(());
    assert_eq!(calls.get(), 1);

    TimeoutFuture::new(60).await;
    throttled(());
    assert_eq!(calls.get(), 2);
}

#[wasm_bindgen_test]
async fn debounce_delivers_only_the_last_call() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut debounced = {
        let seen = seen.clone();
        debounce(30, move |value: u32| seen.borrow_mut().push(value))
    };

    debounced(1);
    debounced(2);
    debounced(3);
    assert!(seen.borrow().is_empty());

    TimeoutFuture::new(80).await;
    assert_eq!(*seen.borrow(), vec![3]);
}
