//! Page-wide bindings: product and blog clicks, hover styles, navigation,
//! scroll effects, staggered reveals, lazy images and the stats counters.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cafe_site::effects::{PRODUCT_REVEAL_MS, RIPPLE_MS, TESTIMONIAL_REVEAL_MS};
use cafe_site::{CounterTween, Effects, HoverTarget, SectionBounds, SiteMessage, StyleSet};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::{dom, toasts, PageState};

const NAV_LINKS: &str = ".nav-menu a[href^=\"#\"]";
const REVEALED: &str = "fade-in-up";
const LAZY_IMAGES: &str = "img[data-src]";
const REVEAL_TARGETS: &str = ".menu-item, .product-card, .testimonial, .blog-post, .footer-section";

const PAGE_CSS: &str = r#"
    @keyframes ripple {
        to {
            transform: scale(4);
            opacity: 0;
        }
    }

    .navbar.scrolled {
        background: rgba(139, 69, 19, 0.98);
        box-shadow: 0 2px 20px rgba(139, 69, 19, 0.3);
    }

    .nav-menu a.active {
        color: #D2B48C !important;
    }

    .form-group input.error,
    .form-group select.error,
    .form-group textarea.error {
        border-color: #e74c3c;
        box-shadow: 0 0 5px rgba(231, 76, 60, 0.3);
    }

    .blog-post {
        cursor: pointer;
    }

    .lazy {
        opacity: 0;
        transition: opacity 0.3s;
    }

    .menu-item .item-icon img,
    .menu-item .item-price {
        transition: all 0.3s ease;
    }
"#;

const RIPPLE_CSS: &str = "position: absolute; border-radius: 50%; background: rgba(255,255,255,0.6); \
    transform: scale(0); animation: ripple 0.6s linear; pointer-events: none;";

fn listen<F>(target: &Element, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn raise(page: &Rc<RefCell<PageState>>, message: &SiteMessage) {
    page.borrow_mut()
        .notifier
        .notify(message.text(), message.kind(), dom::now());
    toasts::flush(page);
}

pub fn inject_styles() -> Result<(), JsValue> {
    let document = dom::document()?;
    let style = document.create_element("style")?;
    style.set_text_content(Some(PAGE_CSS));
    if let Some(head) = document.head() {
        head.append_child(&style)?;
    }
    Ok(())
}

fn ripple(button: &Element) -> Result<(), JsValue> {
    let rect = button.get_bounding_client_rect();
    let geometry = Effects::ripple(rect.width(), rect.height());

    let span = dom::create_html("span")?;
    span.set_class_name("ripple");
    let style = span.style();
    style.set_css_text(RIPPLE_CSS);
    style.set_property("width", &format!("{}px", geometry.size))?;
    style.set_property("height", &format!("{}px", geometry.size))?;
    style.set_property("left", &format!("{}px", geometry.left))?;
    style.set_property("top", &format!("{}px", geometry.top))?;

    dom::set_style(button, "position", "relative")?;
    dom::set_style(button, "overflow", "hidden")?;
    button.append_child(&span)?;

    dom::set_timeout(RIPPLE_MS, move || span.remove())?;
    Ok(())
}

pub fn bind_products(page: &Rc<RefCell<PageState>>) -> Result<(), JsValue> {
    for card in dom::select_all(".product-card")? {
        let Some(button) = card.query_selector("button")? else {
            continue;
        };
        let page = page.clone();
        let target = button.clone();
        listen(&button, "click", move |_event| {
            let product = dom::text_of(&card, "h3").ok().flatten().unwrap_or_default();
            let label = target.text_content().unwrap_or_default();
            if let Err(err) = ripple(&target) {
                dom::warn("failed to draw ripple", &err);
            }
            raise(&page, &SiteMessage::product_action(product, &label));
        })?;
    }
    Ok(())
}

pub fn bind_blog(page: &Rc<RefCell<PageState>>) -> Result<(), JsValue> {
    for post in dom::select_all(".blog-post")? {
        let page = page.clone();
        let source = post.clone();
        listen(&post, "click", move |_event| {
            let title = dom::text_of(&source, "h3").ok().flatten().unwrap_or_default();
            raise(&page, &SiteMessage::blog_preview(title));
        })?;
    }
    Ok(())
}

fn apply_styles(element: &Element, styles: StyleSet) -> Result<(), JsValue> {
    for (property, value) in styles {
        dom::set_style(element, property, value)?;
    }
    Ok(())
}

/// Call `restyle` with `true` on `mouseenter` and `false` on `mouseleave`
fn on_hover<F>(element: &Element, restyle: F) -> Result<(), JsValue>
where
    F: Fn(&Element, bool) -> Result<(), JsValue> + 'static,
{
    let restyle = Rc::new(restyle);
    for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
        let restyle = restyle.clone();
        let source = element.clone();
        listen(element, event, move |_event| {
            if let Err(err) = restyle(&source, hovered) {
                dom::warn("failed to apply hover style", &err);
            }
        })?;
    }
    Ok(())
}

pub fn bind_hover() -> Result<(), JsValue> {
    for card in dom::select_all(".product-card")? {
        on_hover(&card, |card, hovered| {
            let featured = card.class_list().contains("featured");
            apply_styles(card, HoverTarget::ProductCard { featured }.styles(hovered))
        })?;
    }
    for testimonial in dom::select_all(".testimonial")? {
        on_hover(&testimonial, |testimonial, hovered| {
            apply_styles(testimonial, HoverTarget::Testimonial.styles(hovered))
        })?;
    }
    for item in dom::select_all(".menu-item")? {
        on_hover(&item, |item, hovered| {
            if let Some(icon) = item.query_selector(".item-icon img")? {
                apply_styles(&icon, HoverTarget::MenuIcon.styles(hovered))?;
            }
            if let Some(price) = item.query_selector(".item-price")? {
                apply_styles(&price, HoverTarget::MenuPrice.styles(hovered))?;
            }
            Ok(())
        })?;
    }
    Ok(())
}

pub fn bind_navigation(effects: &Rc<Effects>) -> Result<(), JsValue> {
    for link in dom::select_all(NAV_LINKS)? {
        let effects = effects.clone();
        let source = link.clone();
        listen(&link, "click", move |event| {
            event.prevent_default();
            let target_id = source
                .get_attribute("href")
                .map(|href| href.trim_start_matches('#').to_string())
                .unwrap_or_default();
            let section = dom::document()
                .ok()
                .and_then(|d| d.get_element_by_id(&target_id))
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if let (Some(section), Ok(window)) = (section, dom::window()) {
                let options = ScrollToOptions::new();
                options.set_top(effects.scroll_target(f64::from(section.offset_top())));
                options.set_behavior(ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&options);
            }
        })?;
    }
    Ok(())
}

pub fn stagger_testimonials() -> Result<(), JsValue> {
    for (index, testimonial) in dom::select_all(".testimonial")?.iter().enumerate() {
        dom::set_style(testimonial, "animation-delay", &Effects::testimonial_delay_css(index))?;
    }
    Ok(())
}

fn update_navbar(effects: &Effects, scroll_y: f64) -> Result<(), JsValue> {
    if let Some(navbar) = dom::document()?.query_selector(".navbar")? {
        navbar
            .class_list()
            .toggle_with_force("scrolled", effects.navbar_scrolled(scroll_y))?;
    }
    Ok(())
}

fn update_active_link(effects: &Effects, scroll_y: f64) -> Result<(), JsValue> {
    let sections: Vec<SectionBounds> = dom::html_elements("section[id]")?
        .iter()
        .map(|s| SectionBounds::new(s.id(), f64::from(s.offset_top()), f64::from(s.offset_height())))
        .collect();

    let Some(active) = effects.active_section(&sections, scroll_y) else {
        return Ok(());
    };
    for link in dom::select_all(NAV_LINKS)? {
        link.class_list().remove_1("active")?;
    }
    let selector = format!(".nav-menu a[href=\"#{}\"]", active);
    if let Some(link) = dom::document()?.query_selector(&selector)? {
        link.class_list().add_1("active")?;
    }
    Ok(())
}

fn update_parallax(effects: &Effects, scroll_y: f64) -> Result<(), JsValue> {
    let position = effects.parallax_css(scroll_y);
    for element in dom::select_all(".discover-flavours")? {
        dom::set_style(&element, "background-position", &position)?;
    }
    for (index, bean) in dom::select_all(".bean")?.iter().enumerate() {
        dom::set_style(bean, "transform", &effects.bean_transform(index, scroll_y).to_css())?;
    }
    Ok(())
}

fn show_later(element: Element, delay_ms: u64, transform: &'static str) -> Result<(), JsValue> {
    dom::set_timeout(delay_ms, move || {
        let _ = dom::set_style(&element, "transform", transform);
        let _ = dom::set_style(&element, "opacity", "1");
    })?;
    Ok(())
}

fn reveal(effects: &Effects) -> Result<(), JsValue> {
    let viewport = dom::viewport_height();
    let menu_items = dom::select_all(".menu-item")?;

    for element in dom::select_all(REVEAL_TARGETS)? {
        let classes = element.class_list();
        if classes.contains(REVEALED) {
            continue;
        }
        let rect = element.get_bounding_client_rect();
        if !Effects::should_reveal(rect.top(), rect.height(), viewport) {
            continue;
        }
        classes.add_1(REVEALED)?;

        if classes.contains("menu-item") {
            let index = menu_items.iter().position(|m| m == &element).unwrap_or(0);
            show_later(element, effects.menu_stagger(index), "translateY(0)")?;
        } else if classes.contains("product-card") {
            show_later(element, PRODUCT_REVEAL_MS, "translateY(0) scale(1)")?;
        } else if classes.contains("testimonial") {
            let parts = [".stars", "p", ".author"];
            for (selector, delay) in parts.iter().zip(TESTIMONIAL_REVEAL_MS) {
                if let Some(part) = element.query_selector(selector)? {
                    show_later(part, delay, "translateY(0)")?;
                }
            }
        }
    }
    Ok(())
}

/// Swap in the real source of every `img[data-src]` that reached the viewport
fn load_lazy_images() -> Result<(), JsValue> {
    let viewport = dom::viewport_height();
    for image in dom::select_all(LAZY_IMAGES)? {
        let rect = image.get_bounding_client_rect();
        if !Effects::should_load_image(rect.top(), rect.height(), viewport) {
            continue;
        }
        if let Some(source) = image.get_attribute("data-src") {
            image.set_attribute("src", &source)?;
        }
        // Loaded images drop out of the selector.
        image.remove_attribute("data-src")?;
        image.class_list().remove_1("lazy")?;
    }
    Ok(())
}

fn run_counter(element: Element, mut tween: CounterTween, frame_ms: u64) {
    if let Some(value) = tween.next() {
        element.set_text_content(Some(&value.to_string()));
        let scheduled = dom::set_timeout(frame_ms, move || run_counter(element, tween, frame_ms));
        if let Err(err) = scheduled {
            dom::warn("failed to schedule counter frame", &err);
        }
    }
}

fn start_counters(effects: &Effects, started: &Cell<bool>) -> Result<(), JsValue> {
    if started.get() {
        return Ok(());
    }
    let Some(stats) = dom::document()?.query_selector(".hero-stats")? else {
        return Ok(());
    };
    let rect = stats.get_bounding_client_rect();
    if !Effects::should_start_counters(rect.top(), rect.height(), dom::viewport_height()) {
        return Ok(());
    }
    started.set(true);

    let config = effects.effects_config();
    for counter in dom::select_all_in(&stats, ".stat .number")? {
        let text = counter.text_content().unwrap_or_default();
        if let Some(target) = CounterTween::parse_target(&text) {
            let tween = CounterTween::from_config(target, config);
            run_counter(counter, tween, config.counter_frame_ms);
        }
    }
    Ok(())
}

fn on_scroll(effects: &Effects, counters_started: &Cell<bool>) -> Result<(), JsValue> {
    let scroll_y = dom::scroll_y();
    update_navbar(effects, scroll_y)?;
    update_active_link(effects, scroll_y)?;
    update_parallax(effects, scroll_y)?;
    reveal(effects)?;
    load_lazy_images()?;
    start_counters(effects, counters_started)?;
    Ok(())
}

/// Listen to window scrolling and apply the scroll effects once right away
pub fn bind_scroll(effects: &Rc<Effects>) -> Result<(), JsValue> {
    let counters_started = Rc::new(Cell::new(false));
    on_scroll(effects, &counters_started)?;

    let effects = effects.clone();
    let handler = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        if let Err(err) = on_scroll(&effects, &counters_started) {
            dom::warn("scroll effects failed", &err);
        }
    });
    dom::window()?.add_event_listener_with_callback("scroll", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}
