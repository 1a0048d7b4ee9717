//! Top-level event handlers for the contact form
//!
//! This is the only place where collection, validation, submission and
//! presentation meet.

use tracing::{debug, info, warn};

use crate::collector::{self, ClientContext};
use crate::config::ContactFormConfig;
use crate::error::Result;
use crate::presenter::Presenter;
use crate::submitter::Submitter;
use crate::validator;
use crate::view::FormView;
use contact_relay_shared::{AlertKind, SubmissionResult, UiState};

pub const SUCCESS_ALERT: &str =
    "Thank you! Your message has been sent successfully. We'll get back to you soon.";

pub const FAILURE_ALERT_PREFIX: &str = "Sorry, there was an error sending your message: ";

/// What a submit event led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight
    Ignored,
    /// Validation failed; nothing left the process
    Rejected { reason: String },
    Sent { message: String },
    Failed { message: String },
}

impl SubmitOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SubmitOutcome::Sent { .. })
    }
}

pub struct FormController<V: FormView> {
    presenter: Presenter<V>,
    submitter: Submitter,
    context: ClientContext,
}

impl<V: FormView> FormController<V> {
    pub fn new(presenter: Presenter<V>, submitter: Submitter, context: ClientContext) -> Self {
        Self {
            presenter,
            submitter,
            context,
        }
    }

    /// Wire a controller for `view` from configuration
    pub fn from_config(view: V, config: &ContactFormConfig) -> Result<Self> {
        let submitter = Submitter::from_config(config)?;
        let presenter = Presenter::new(view, config.success_auto_hide());
        let context = ClientContext::from_config(&config.client);
        Ok(Self::new(presenter, submitter, context))
    }

    pub fn presenter(&self) -> &Presenter<V> {
        &self.presenter
    }

    pub fn submitter(&self) -> &Submitter {
        &self.submitter
    }

    /// Handle a submit event
    pub async fn submit(&self) -> SubmitOutcome {
        if self.presenter.ui_state() == UiState::Submitting {
            debug!("Submit ignored, a submission is already in flight");
            return SubmitOutcome::Ignored;
        }

        let record = collector::collect(self.presenter.form_entries(), &self.context);

        if let Err(e) = validator::require_valid(&record) {
            let reason = e.to_string();
            info!("Contact form rejected: {}", reason);
            self.presenter.show_alert(AlertKind::Error, &reason);
            return SubmitOutcome::Rejected { reason };
        }

        if !self.presenter.set_loading(true) {
            debug!("Submit ignored, a submission is already in flight");
            return SubmitOutcome::Ignored;
        }
        let _loading = LoadingGuard(&self.presenter);

        let outcome = match self.submitter.submit(&record).await {
            SubmissionResult::Success { message } => {
                self.presenter.show_alert(AlertKind::Success, SUCCESS_ALERT);
                self.presenter.reset_form();
                SubmitOutcome::Sent { message }
            }
            SubmissionResult::Failure { message } => {
                warn!("Contact form submission failed: {}", message);
                self.presenter.show_alert(
                    AlertKind::Error,
                    &format!("{}{}", FAILURE_ALERT_PREFIX, message),
                );
                SubmitOutcome::Failed { message }
            }
        };
        outcome
    }

    /// Handle a blur event on `name`; `None` if there is no such control
    pub fn field_blur(&self, name: &str) -> Option<bool> {
        let control = self.presenter.control(name)?;
        let valid = validator::check_field(&control);
        self.presenter.flag_field(name, !valid);
        Some(valid)
    }

    /// Handle an input event on `name`; only controls already flagged are
    /// re-checked
    pub fn field_input(&self, name: &str) -> Option<bool> {
        let control = self.presenter.control(name)?;
        if !control.errored {
            return Some(true);
        }
        self.field_blur(name)
    }
}

/// Leaves the submitting state on drop, including when the submit future is
/// dropped before the transport answers
struct LoadingGuard<'a, V: FormView>(&'a Presenter<V>);

impl<V: FormView> Drop for LoadingGuard<'_, V> {
    fn drop(&mut self) {
        self.0.set_loading(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::DemoTransport;
    use crate::view::MemoryForm;
    use std::sync::Arc;
    use std::time::Duration;

    fn controller(form: MemoryForm) -> FormController<MemoryForm> {
        FormController::new(
            Presenter::new(form, Duration::from_secs(10)),
            Submitter::with_transport(Arc::new(DemoTransport::new(Duration::from_millis(1500)))),
            ClientContext::new("test-agent", "https://example.com/contact"),
        )
    }

    fn filled_form() -> MemoryForm {
        let mut form = MemoryForm::contact();
        form.set_value("name", "Ada Lovelace");
        form.set_value("email", "ada@example.com");
        form.set_value("subject", "Engines");
        form.set_value("message", "Please send the schematics.");
        form
    }

    #[tokio::test]
    async fn test_invalid_form_is_rejected_without_loading() {
        let mut form = filled_form();
        form.set_value("email", "ada");
        let controller = controller(form);

        let outcome = controller.submit().await;
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                reason: "Please enter a valid email address.".to_string()
            }
        );

        let view = controller.presenter().view();
        let view = view.lock();
        assert_eq!(view.alert().kind, Some(AlertKind::Error));
        assert!(!view.submit_control().disabled);
        assert_eq!(view.value("email"), Some("ada"));
        assert_eq!(controller.presenter().ui_state(), UiState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_submission_resets_form() {
        let controller = controller(filled_form());

        let outcome = controller.submit().await;
        assert_eq!(
            outcome,
            SubmitOutcome::Sent {
                message: "Demo submission successful".to_string()
            }
        );

        let view = controller.presenter().view();
        let view = view.lock();
        assert_eq!(view.alert().text, SUCCESS_ALERT);
        assert_eq!(view.value("name"), Some(""));
        assert!(!view.inputs_disabled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_while_submitting_is_ignored() {
        let controller = controller(filled_form());
        assert!(controller.presenter().set_loading(true));

        assert_eq!(controller.submit().await, SubmitOutcome::Ignored);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_submits_only_one_runs() {
        let controller = controller(filled_form());

        let (first, second) = tokio::join!(controller.submit(), controller.submit());
        let outcomes = [first, second];

        assert_eq!(outcomes.iter().filter(|o| o.is_sent()).count(), 1);
        assert!(outcomes.contains(&SubmitOutcome::Ignored));
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_submit_leaves_form_usable() {
        let controller = controller(filled_form());

        let pending = tokio::time::timeout(Duration::from_millis(100), controller.submit()).await;
        assert!(pending.is_err());

        assert_eq!(controller.presenter().ui_state(), UiState::Idle);
        {
            let view = controller.presenter().view();
            let view = view.lock();
            assert!(!view.inputs_disabled());
            assert!(!view.submit_control().disabled);
            assert_eq!(view.value("name"), Some("Ada Lovelace"));
        }

        assert!(controller.submit().await.is_sent());
    }

    #[test]
    fn test_field_blur_flags_errors() {
        let mut form = MemoryForm::contact();
        form.set_value("email", "ada@");
        let controller = controller(form);

        assert_eq!(controller.field_blur("email"), Some(false));
        assert!(controller.presenter().control("email").unwrap().errored);

        assert_eq!(controller.field_blur("missing"), None);
    }

    #[test]
    fn test_field_blur_ignores_optional_controls() {
        let mut form = MemoryForm::contact();
        form.set_value("company", "");
        let controller = controller(form);

        assert_eq!(controller.field_blur("company"), Some(true));
        assert!(!controller.presenter().control("company").unwrap().errored);
    }

    #[test]
    fn test_field_input_rechecks_only_flagged_fields() {
        let mut form = MemoryForm::contact();
        form.set_value("message", "short");
        let controller = controller(form);

        // not flagged yet, input does not re-check
        assert_eq!(controller.field_input("message"), Some(true));
        assert!(!controller.presenter().control("message").unwrap().errored);

        assert_eq!(controller.field_blur("message"), Some(false));

        controller
            .presenter()
            .view()
            .lock()
            .set_value("message", "long enough now");
        assert_eq!(controller.field_input("message"), Some(true));
        assert!(!controller.presenter().control("message").unwrap().errored);
    }
}
