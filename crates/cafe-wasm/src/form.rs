//! Booking form binding: blur/input/submit listeners and inline errors

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use cafe_validation::{AnnotationChange, Field, FieldRule};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::{dom, toasts, PageState};

const CONTROLS: &str = "input, select, textarea";

const ERROR_CSS: &str = "color: #e74c3c; font-size: 0.8rem; margin-top: 5px;";

/// A form control and the name its annotations are keyed by
#[derive(Clone)]
struct Control {
    name: String,
    element: Element,
}

impl Control {
    fn read(&self) -> Field {
        let rule = FieldRule::from_attrs(
            self.element.has_attribute("required"),
            self.element.get_attribute("type").as_deref(),
        );
        Field::new(self.name.clone(), rule, control_value(&self.element))
    }
}

fn control_value(el: &Element) -> String {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

/// Annotation key of the control at `index`: its `name`, else its `id`,
/// else its position. A key already in `seen` gets `#index` appended.
pub(crate) fn control_name(name: Option<String>, id: String, index: usize, seen: &mut HashSet<String>) -> String {
    let base = name
        .filter(|n| !n.is_empty())
        .or_else(|| Some(id).filter(|id| !id.is_empty()))
        .unwrap_or_else(|| format!("field-{}", index));
    let name = if seen.contains(&base) {
        format!("{}#{}", base, index)
    } else {
        base
    };
    seen.insert(name.clone());
    name
}

fn controls(form: &HtmlFormElement) -> Result<Vec<Control>, JsValue> {
    let mut seen = HashSet::new();
    let mut controls = Vec::new();

    for (index, element) in dom::select_all_in(form, CONTROLS)?.into_iter().enumerate() {
        let name = control_name(element.get_attribute("name"), element.id(), index, &mut seen);
        controls.push(Control { name, element });
    }
    Ok(controls)
}

fn show_error(control: &Element, message: &str) -> Result<(), JsValue> {
    control.class_list().add_1("error")?;

    let Some(parent) = control.parent_element() else {
        return Ok(());
    };
    if let Some(existing) = parent.query_selector(".error-message")? {
        existing.remove();
    }

    let note = dom::create_html("div")?;
    note.set_class_name("error-message");
    note.set_text_content(Some(message));
    note.style().set_css_text(ERROR_CSS);
    parent.append_child(&note)?;
    Ok(())
}

fn clear_error(control: &Element) -> Result<(), JsValue> {
    control.class_list().remove_1("error")?;
    if let Some(parent) = control.parent_element() {
        if let Some(existing) = parent.query_selector(".error-message")? {
            existing.remove();
        }
    }
    Ok(())
}

fn render(controls: &[Control], change: &AnnotationChange) {
    let result = match change {
        AnnotationChange::Set { name, message } => controls
            .iter()
            .find(|c| &c.name == name)
            .map(|c| show_error(&c.element, message)),
        AnnotationChange::Cleared { name } => controls
            .iter()
            .find(|c| &c.name == name)
            .map(|c| clear_error(&c.element)),
        AnnotationChange::Unchanged => None,
    };
    if let Some(Err(err)) = result {
        dom::warn("failed to update field error", &err);
    }
}

/// Wire the `.booking-form`, if the page has one
pub fn bind(page: &Rc<RefCell<PageState>>) -> Result<(), JsValue> {
    let Some(form) = dom::document()?.query_selector(".booking-form")? else {
        return Ok(());
    };
    let form: HtmlFormElement = form.dyn_into()?;
    let controls = Rc::new(controls(&form)?);

    for control in controls.iter() {
        let on_blur = {
            let page = page.clone();
            let controls = controls.clone();
            let control = control.clone();
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                let change = page.borrow_mut().desk.blur(&control.read());
                render(&controls, &change);
            })
        };
        control
            .element
            .add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref())?;
        on_blur.forget();

        let on_input = {
            let page = page.clone();
            let controls = controls.clone();
            let name = control.name.clone();
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                let change = page.borrow_mut().desk.input(&name);
                render(&controls, &change);
            })
        };
        control
            .element
            .add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
        on_input.forget();
    }

    let on_submit = {
        let page = page.clone();
        let controls = controls.clone();
        let form = form.clone();
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let fields: Vec<Field> = controls.iter().map(Control::read).collect();

            let outcome = {
                let mut guard = page.borrow_mut();
                let state = &mut *guard;
                state.desk.submit(&fields, &mut state.notifier, dom::now())
            };

            for change in &outcome.annotations {
                render(&controls, change);
            }
            if outcome.accepted() {
                form.reset();
            }
            toasts::flush(&page);
        })
    };
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    dom::debug(&format!("booking form bound with {} controls", controls.len()));
    Ok(())
}
