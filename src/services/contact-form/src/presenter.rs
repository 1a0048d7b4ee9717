//! Reflects submission state onto a [`FormView`]
//!
//! The presenter owns the single [`UiState`] and the success-alert auto-hide
//! timer. Any alert change cancels a pending auto-hide first, so a timer armed
//! for an earlier alert never hides a later one.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::view::{FormControl, FormView};
use contact_relay_shared::{AlertKind, UiState};

#[derive(Debug, Default)]
struct PresenterState {
    ui_state: UiState,
    pending_hide: Option<CancellationToken>,
}

impl PresenterState {
    fn cancel_pending_hide(&mut self) {
        if let Some(token) = self.pending_hide.take() {
            token.cancel();
        }
    }
}

pub struct Presenter<V: FormView> {
    view: Arc<Mutex<V>>,
    state: Arc<Mutex<PresenterState>>,
    auto_hide_after: Duration,
}

impl<V: FormView> Presenter<V> {
    pub fn new(view: V, auto_hide_after: Duration) -> Self {
        Self::with_shared_view(Arc::new(Mutex::new(view)), auto_hide_after)
    }

    /// Present onto a view the host keeps a handle to
    pub fn with_shared_view(view: Arc<Mutex<V>>, auto_hide_after: Duration) -> Self {
        Self {
            view,
            state: Arc::new(Mutex::new(PresenterState::default())),
            auto_hide_after,
        }
    }

    pub fn view(&self) -> Arc<Mutex<V>> {
        Arc::clone(&self.view)
    }

    pub fn ui_state(&self) -> UiState {
        self.state.lock().ui_state
    }

    /// Enter or leave the submitting state.
    ///
    /// Returns `false` without touching the view when already in the requested
    /// state, which is how a second submit is refused.
    pub fn set_loading(&self, loading: bool) -> bool {
        let target = if loading {
            UiState::Submitting
        } else {
            UiState::Idle
        };

        let mut state = self.state.lock();
        if state.ui_state == target {
            return false;
        }
        state.ui_state = target;

        let mut view = self.view.lock();
        view.set_submit_disabled(loading);
        view.set_loading_marker(loading);
        view.set_inputs_disabled(loading);
        debug!(state = ?target, "Form state changed");

        true
    }

    pub fn show_alert(&self, kind: AlertKind, text: &str) {
        let mut state = self.state.lock();
        state.cancel_pending_hide();

        self.view.lock().show_alert(kind, text);

        if kind == AlertKind::Success {
            state.pending_hide = self.schedule_hide();
        }
    }

    pub fn hide_alert(&self) {
        let mut state = self.state.lock();
        state.cancel_pending_hide();
        self.view.lock().hide_alert();
    }

    /// Whether an auto-hide is armed
    pub fn has_pending_hide(&self) -> bool {
        self.state.lock().pending_hide.is_some()
    }

    pub fn form_entries(&self) -> Vec<(String, String)> {
        self.view.lock().entries()
    }

    pub fn control(&self, name: &str) -> Option<FormControl> {
        self.view.lock().control(name)
    }

    pub fn flag_field(&self, name: &str, errored: bool) {
        self.view.lock().set_field_error(name, errored);
    }

    pub fn reset_form(&self) {
        self.view.lock().reset();
    }

    fn schedule_hide(&self) -> Option<CancellationToken> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime available, success alert will not auto-hide");
            return None;
        };

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let view = Arc::clone(&self.view);
        let state = Arc::clone(&self.state);
        let delay = self.auto_hide_after;

        runtime.spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let mut state = state.lock();
                    // cancellation and hiding both happen under the state lock
                    if cancelled.is_cancelled() {
                        return;
                    }
                    state.pending_hide = None;
                    view.lock().hide_alert();
                    debug!("Success alert auto-hidden");
                }
            }
        });

        Some(token)
    }
}
