use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::field::FieldConfig;
use crate::picker::PickerState;
use crate::time::TimeOfDay;

/// Message surfaced when the codec cannot interpret non-empty field text.
pub const NOT_A_TIME_MESSAGE: &str = "Not a valid time of day";

/// Fallback message for a required-but-empty field when no native browser
/// constraint message is available.
pub const REQUIRED_MESSAGE: &str = "Please fill out this field";

/// A per-field validation failure, keyed by the field's id.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{field_id}: {message}")]
pub struct ValidationError {
    pub field_id: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_a_time(field_id: &str) -> Self {
        Self::new(field_id, NOT_A_TIME_MESSAGE)
    }
}

/// Validate field text against the requiredness constraint and the time
/// codec. Native browser constraints, when an input element is attached,
/// run before this (see [`FormControl::validate`]).
pub fn validate_text(
    field_id: &str,
    text: &str,
    required: bool,
) -> Result<(), ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        if required {
            return Err(ValidationError::new(field_id, REQUIRED_MESSAGE));
        }
        return Ok(());
    }

    if TimeOfDay::parse(trimmed).is_none() {
        return Err(ValidationError::not_a_time(field_id));
    }

    Ok(())
}

/// The host field-control contract: what a form needs from each field at
/// submission, reset, and teardown time.
pub trait FormControl {
    /// Canonical `HH:MM` for the form payload, or empty when the field has
    /// no parsable value. Exactly one value per field name is submitted.
    fn submission_value(&self) -> String;
    fn validate(&self) -> Result<(), ValidationError>;
    /// Restore the text captured at construction.
    fn reset(&self);
    fn is_dirty(&self) -> bool;
    /// Detach the relocated overlay list from the document.
    fn destroy(&self);
}

/// DOM endpoints registered by the component once mounted. Absent outside
/// the browser, in which case the pure fallbacks apply.
#[derive(Default)]
struct DomHooks {
    input: Option<web_sys::HtmlInputElement>,
    list: Option<web_sys::Element>,
    /// Pushes the current state back into the component's rendered output
    /// (text, canonical submission value, filled indicator).
    refresh: Option<Box<dyn Fn()>>,
}

/// Shared handle to one picker field, created by the hosting page and passed
/// to the `TimePickerField` component. This is the explicit per-field
/// factory interface: the page keeps the handle for form lifecycle calls,
/// the component wires it to the DOM.
#[derive(Clone)]
pub struct FieldHandle {
    config: Rc<FieldConfig>,
    state: Rc<RefCell<PickerState>>,
    dom: Rc<RefCell<DomHooks>>,
}

impl FieldHandle {
    #[must_use]
    pub fn new(config: FieldConfig) -> Self {
        let state = PickerState::new(&config.value, config.interval);
        Self {
            config: Rc::new(config),
            state: Rc::new(RefCell::new(state)),
            dom: Rc::new(RefCell::new(DomHooks::default())),
        }
    }

    #[must_use]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> Rc<RefCell<PickerState>> {
        Rc::clone(&self.state)
    }

    pub(crate) fn attach_input(&self, input: web_sys::HtmlInputElement) {
        self.dom.borrow_mut().input = Some(input);
    }

    pub(crate) fn attach_list(&self, list: web_sys::Element) {
        self.dom.borrow_mut().list = Some(list);
    }

    pub(crate) fn attach_refresh(&self, refresh: impl Fn() + 'static) {
        self.dom.borrow_mut().refresh = Some(Box::new(refresh));
    }
}

impl FormControl for FieldHandle {
    fn submission_value(&self) -> String {
        self.state.borrow().submission_value()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        // Native constraint validation (required, pattern) takes precedence.
        if let Some(input) = self.dom.borrow().input.as_ref() {
            if input.will_validate() && !input.check_validity() {
                let message = input
                    .validation_message()
                    .unwrap_or_else(|_| REQUIRED_MESSAGE.to_string());
                return Err(ValidationError::new(&self.config.id, message));
            }
        }

        let state = self.state.borrow();
        validate_text(&self.config.id, state.text(), self.config.required)
    }

    fn reset(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.reset();
            if let Some(input) = self.dom.borrow().input.as_ref() {
                input.set_value(state.text());
            }
        }
        // The state borrow must end before the refresh reads it back.
        if let Some(refresh) = self.dom.borrow().refresh.as_ref() {
            refresh();
        }
    }

    fn is_dirty(&self) -> bool {
        self.state.borrow().is_dirty()
    }

    fn destroy(&self) {
        self.state.borrow_mut().hide();
        let mut dom = self.dom.borrow_mut();
        if let Some(list) = dom.list.take() {
            list.remove();
        }
        dom.input = None;
        dom.refresh = None;
    }
}
