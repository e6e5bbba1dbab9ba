//! Notification presenter.
//!
//! Replays notifier transitions as DOM changes and keeps exactly one browser
//! timer armed for the notifier's next deadline.

use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::cell::RefCell;

use cafe_notify::{Message, Notification, NotificationId, Notifier, Transition, TransitionKind};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement};

use crate::dom;
use crate::PageState;

/// Distance from the top of the viewport to the first toast
const STACK_TOP_PX: f64 = 100.0;

/// Vertical distance between stacked toasts
const STACK_SPACING_PX: f64 = 90.0;

const TOAST_CSS: &str = "position: fixed; right: 20px; color: white; padding: 20px; \
    border-radius: 10px; box-shadow: 0 10px 30px rgba(0,0,0,0.3); z-index: 1001; \
    max-width: 400px; transform: translateX(100%); transition: transform 0.3s ease, top 0.3s ease;";

/// Distance from the viewport top of the toast at stack `offset`
pub(crate) fn stack_top(offset: usize) -> f64 {
    STACK_TOP_PX + offset as f64 * STACK_SPACING_PX
}

struct ToastView {
    element: HtmlElement,
    _on_close: Closure<dyn FnMut(Event)>,
}

#[derive(Default)]
pub struct ToastLayer {
    views: HashMap<NotificationId, ToastView>,
    armed: Option<i32>,
}

impl ToastLayer {
    fn apply(
        &mut self,
        transition: &Transition,
        notifier: &Notifier,
        page: &Weak<RefCell<PageState>>,
    ) -> Result<(), JsValue> {
        match transition.kind {
            TransitionKind::Shown => {
                if let Some(notification) = notifier.get(transition.id) {
                    let view = build_view(notification, page.clone())?;
                    dom::document()?
                        .body()
                        .ok_or_else(|| JsValue::from_str("document has no body"))?
                        .append_child(&view.element)?;
                    self.views.insert(transition.id, view);
                }
            }
            TransitionKind::Entered => {
                if let Some(view) = self.views.get(&transition.id) {
                    view.element.style().set_property("transform", "translateX(0)")?;
                }
            }
            TransitionKind::Dismissing(_) => {
                if let Some(view) = self.views.get(&transition.id) {
                    view.element.style().set_property("transform", "translateX(100%)")?;
                }
            }
            TransitionKind::Removed => {
                if let Some(view) = self.views.remove(&transition.id) {
                    view.element.remove();
                    // The close handler may be the caller; release it on a later task.
                    dom::set_timeout(0, move || drop(view))?;
                }
            }
        }
        Ok(())
    }

    /// Position every toast by its place in the stack
    fn relayout(&self, notifier: &Notifier) -> Result<(), JsValue> {
        for (offset, notification) in notifier.visible().enumerate() {
            if let Some(view) = self.views.get(&notification.id()) {
                view.element
                    .style()
                    .set_property("top", &format!("{}px", stack_top(offset)))?;
            }
        }
        Ok(())
    }

    fn arm(&mut self, notifier: &Notifier, page: Weak<RefCell<PageState>>) -> Result<(), JsValue> {
        if let Some(handle) = self.armed.take() {
            dom::clear_timeout(handle);
        }
        let Some(deadline) = notifier.next_deadline() else {
            return Ok(());
        };

        let delay = dom::now().until(deadline);
        let handle = dom::set_timeout(delay, move || {
            if let Some(page) = page.upgrade() {
                handle_message(&page, Message::Tick);
            }
        })?;
        self.armed = Some(handle);
        Ok(())
    }
}

fn build_view(notification: &Notification, page: Weak<RefCell<PageState>>) -> Result<ToastView, JsValue> {
    let kind = notification.kind();

    let element = dom::create_html("div")?;
    element.set_class_name(&format!("booking-message {}", kind.css_class()));
    element.style().set_css_text(TOAST_CSS);
    element.style().set_property("background", kind.background())?;

    let content = dom::create_html("div")?;
    content.set_class_name("message-content");

    let icon = dom::create_html("i")?;
    icon.set_class_name(&format!("fas {}", kind.icon()));

    let text = dom::create_html("span")?;
    text.set_text_content(Some(notification.text()));

    let close = dom::create_html("button")?;
    close.set_class_name("close-message");
    close.set_text_content(Some("\u{00d7}"));

    let id = notification.id();
    let on_close = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        if let Some(page) = page.upgrade() {
            handle_message(&page, Message::Dismiss(id));
        }
    });
    close.add_event_listener_with_callback("click", on_close.as_ref().unchecked_ref())?;

    content.append_child(&icon)?;
    content.append_child(&text)?;
    content.append_child(&close)?;
    element.append_child(&content)?;

    Ok(ToastView {
        element,
        _on_close: on_close,
    })
}

/// Feed one message to the notifier and render the result
pub fn handle_message(page: &Rc<RefCell<PageState>>, message: Message) {
    page.borrow_mut().notifier.handle_message(message, dom::now());
    flush(page);
}

/// Render every pending transition and re-arm the timer
pub fn flush(page: &Rc<RefCell<PageState>>) {
    let weak = Rc::downgrade(page);
    let mut guard = page.borrow_mut();
    let state = &mut *guard;

    for transition in state.notifier.drain_transitions() {
        if let Err(err) = state.toasts.apply(&transition, &state.notifier, &weak) {
            dom::warn("failed to render notification", &err);
        }
    }
    if let Err(err) = state.toasts.relayout(&state.notifier) {
        dom::warn("failed to lay out notifications", &err);
    }
    if let Err(err) = state.toasts.arm(&state.notifier, weak) {
        dom::warn("failed to schedule notification timer", &err);
    }
}
