//! The form surface the pipeline talks to
//!
//! [`FormView`] is everything the pipeline needs from a UI: named controls
//! with values, enable/disable affordances, an alert region and a reset. Any
//! toolkit that can provide these can host the pipeline. [`MemoryForm`] is the
//! in-process implementation used by the command-line host and the tests.

use contact_relay_shared::{AlertKind, REQUIRED_FIELDS};

/// Input control kinds the validator distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Text,
    Email,
    TextArea,
}

impl ControlKind {
    /// Kind conventionally used for a field of this name
    pub fn for_field(name: &str) -> Self {
        match name {
            "email" => ControlKind::Email,
            "message" => ControlKind::TextArea,
            _ => ControlKind::Text,
        }
    }
}

/// Snapshot of one named input control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormControl {
    pub name: String,
    pub kind: ControlKind,
    pub value: String,
    pub required: bool,
    pub disabled: bool,
    /// Styling flag set by live validation
    pub errored: bool,
}

impl FormControl {
    pub fn new<S: Into<String>>(name: S, kind: ControlKind, required: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            value: String::new(),
            required,
            disabled: false,
            errored: false,
        }
    }
}

/// Structural contract between the pipeline and a form UI
pub trait FormView: Send + 'static {
    /// Name/value pairs of the enabled controls, in document order
    fn entries(&self) -> Vec<(String, String)>;

    fn control(&self, name: &str) -> Option<FormControl>;

    fn set_inputs_disabled(&mut self, disabled: bool);

    fn set_submit_disabled(&mut self, disabled: bool);

    fn set_loading_marker(&mut self, loading: bool);

    fn show_alert(&mut self, kind: AlertKind, text: &str);

    fn hide_alert(&mut self);

    fn set_field_error(&mut self, name: &str, errored: bool);

    /// Restore every control to its initial value
    fn reset(&mut self);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitControl {
    pub disabled: bool,
    pub loading: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertRegion {
    pub visible: bool,
    pub kind: Option<AlertKind>,
    pub text: String,
}

/// In-memory form implementing [`FormView`]
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    controls: Vec<FormControl>,
    submit: SubmitControl,
    alert: AlertRegion,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard contact form: name, email, subject, message, all required
    pub fn contact() -> Self {
        REQUIRED_FIELDS.iter().fold(Self::new(), |form, name| {
            form.with_control(FormControl::new(*name, ControlKind::for_field(name), true))
        })
    }

    pub fn with_control(mut self, control: FormControl) -> Self {
        self.controls.push(control);
        self
    }

    /// Set a control's value, adding an optional text control if it is unknown
    pub fn set_value<S: Into<String>>(&mut self, name: &str, value: S) {
        match self.controls.iter_mut().find(|control| control.name == name) {
            Some(control) => control.value = value.into(),
            None => {
                let mut control = FormControl::new(name, ControlKind::for_field(name), false);
                control.value = value.into();
                self.controls.push(control);
            }
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.controls
            .iter()
            .find(|control| control.name == name)
            .map(|control| control.value.as_str())
    }

    pub fn controls(&self) -> &[FormControl] {
        &self.controls
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    pub fn alert(&self) -> &AlertRegion {
        &self.alert
    }

    pub fn inputs_disabled(&self) -> bool {
        !self.controls.is_empty() && self.controls.iter().all(|control| control.disabled)
    }
}

impl FormView for MemoryForm {
    fn entries(&self) -> Vec<(String, String)> {
        // disabled controls are not successful controls
        self.controls
            .iter()
            .filter(|control| !control.disabled)
            .map(|control| (control.name.clone(), control.value.clone()))
            .collect()
    }

    fn control(&self, name: &str) -> Option<FormControl> {
        self.controls
            .iter()
            .find(|control| control.name == name)
            .cloned()
    }

    fn set_inputs_disabled(&mut self, disabled: bool) {
        for control in &mut self.controls {
            control.disabled = disabled;
        }
    }

    fn set_submit_disabled(&mut self, disabled: bool) {
        self.submit.disabled = disabled;
    }

    fn set_loading_marker(&mut self, loading: bool) {
        self.submit.loading = loading;
    }

    fn show_alert(&mut self, kind: AlertKind, text: &str) {
        self.alert = AlertRegion {
            visible: true,
            kind: Some(kind),
            text: text.to_string(),
        };
    }

    fn hide_alert(&mut self) {
        self.alert.visible = false;
    }

    fn set_field_error(&mut self, name: &str, errored: bool) {
        if let Some(control) = self.controls.iter_mut().find(|control| control.name == name) {
            control.errored = errored;
        }
    }

    fn reset(&mut self) {
        for control in &mut self.controls {
            control.value.clear();
        }
    }
}
