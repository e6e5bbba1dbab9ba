//! Cafe WASM
//!
//! Browser bindings for the Joe Coffee page. Field validation, the
//! notification stack and the scroll effects all run on the pure crates;
//! this crate only turns their output into DOM changes and browser timers.

use std::cell::RefCell;
use std::rc::Rc;

use cafe_notify::{NotificationKind, Notifier};
use cafe_site::{BookingDesk, Effects, SiteConfig};
use cafe_validation::{self as core, Field, FieldRule, ValidationResult};
use wasm_bindgen::prelude::*;

mod dom;
mod form;
mod page;
mod toasts;

use toasts::ToastLayer;

/// Mutable state shared by every listener on the page
pub(crate) struct PageState {
    pub(crate) notifier: Notifier,
    pub(crate) desk: BookingDesk,
    pub(crate) toasts: ToastLayer,
}

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Handle on the wired page
///
/// # Example (JavaScript)
/// ```javascript
/// const page = new CafePage({ notifications: { auto_dismiss_ms: 4000 } });
/// page.mount();
/// ```
#[wasm_bindgen]
pub struct CafePage {
    state: Rc<RefCell<PageState>>,
    effects: Rc<Effects>,
}

#[wasm_bindgen]
impl CafePage {
    /// Build a page from an optional configuration object. `undefined` and
    /// `null` select the defaults; missing keys fall back individually.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CafePage, JsValue> {
        let config: SiteConfig = if config.is_undefined() || config.is_null() {
            SiteConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse site configuration: {}", e)))?
        };

        let state = PageState {
            notifier: Notifier::new(config.notifications),
            desk: BookingDesk::new(),
            toasts: ToastLayer::default(),
        };
        Ok(CafePage {
            state: Rc::new(RefCell::new(state)),
            effects: Rc::new(Effects::from_config(&config)),
        })
    }

    /// Attach every listener and apply the initial scroll state
    pub fn mount(&self) -> Result<(), JsValue> {
        page::inject_styles()?;
        form::bind(&self.state)?;
        page::bind_products(&self.state)?;
        page::bind_blog(&self.state)?;
        page::bind_hover()?;
        page::bind_navigation(&self.effects)?;
        page::stagger_testimonials()?;
        page::bind_scroll(&self.effects)?;
        dom::debug("cafe page mounted");
        Ok(())
    }

    /// Raise a notification. `kind` is `"success"` or `"error"`; anything
    /// else is shown as success.
    pub fn notify(&self, text: &str, kind: &str) -> u32 {
        let kind = if kind.eq_ignore_ascii_case("error") {
            NotificationKind::Error
        } else {
            NotificationKind::Success
        };
        self.state.borrow_mut().notifier.notify(text, kind, dom::now());
        toasts::flush(&self.state);
        self.state.borrow().notifier.len() as u32
    }

    /// Start the exit of every live notification
    #[wasm_bindgen(js_name = dismissAll)]
    pub fn dismiss_all(&self) -> u32 {
        let count = self.state.borrow_mut().notifier.clear(dom::now());
        toasts::flush(&self.state);
        count as u32
    }
}

/// Validate one value against a rule object
///
/// # Example (JavaScript)
/// ```javascript
/// const result = validateField('email', '', { required: true, type: 'email' });
/// // { valid: false, message: 'This field is required', error: 'required' }
/// ```
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field(field_name: &str, value: &str, rules: JsValue) -> Result<JsValue, JsValue> {
    let rule: FieldRule = if rules.is_undefined() || rules.is_null() {
        FieldRule::default()
    } else {
        serde_wasm_bindgen::from_value(rules)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse rules: {}", e)))?
    };
    let result: ValidationResult = core::validate_field(&Field::new(field_name, rule, value));
    Ok(serde_wasm_bindgen::to_value(&result)?)
}

/// Quick email validation
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    core::is_valid_email(email)
}

/// Quick phone validation
#[wasm_bindgen(js_name = isValidPhone)]
pub fn is_valid_phone_js(phone: &str) -> bool {
    core::is_valid_phone(phone)
}
