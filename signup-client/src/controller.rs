use std::sync::Arc;
use std::time::Duration;

use auth::Field;
use auth::ValidationErrors;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::api::OAuthProvider;
use crate::api::SignUpApi;
use crate::form::FormState;
use crate::state::SubmissionState;
use crate::state::UserSummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// How long an error banner stays up before it clears itself.
    pub error_display: Duration,
    /// Where to navigate after a successful sign-up.
    pub redirect_to: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            error_display: Duration::from_secs(5),
            redirect_to: "/dashboard".to_string(),
        }
    }
}

/// Why `submit` did not reach the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    Invalid(ValidationErrors),
    TermsNotAccepted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Blocked(BlockReason),
    Succeeded {
        user: UserSummary,
        redirect_to: String,
    },
    Failed {
        message: String,
    },
}

/// Drives one sign-up form.
///
/// Owns the form and the submission state. Observers get read-only snapshots
/// through [`subscribe`](Self::subscribe). At most one submission is in
/// flight: `submit` takes `&mut self`, and an abandoned submit leaves the
/// state idle again.
pub struct SubmissionController<A>
where
    A: SignUpApi,
{
    api: Arc<A>,
    config: ControllerConfig,
    form: FormState,
    state: Arc<watch::Sender<SubmissionState>>,
    error_clear: Option<CancellationToken>,
}

impl<A> SubmissionController<A>
where
    A: SignUpApi,
{
    pub fn new(api: A) -> Self {
        Self::with_config(Arc::new(api), ControllerConfig::default())
    }

    pub fn with_config(api: Arc<A>, config: ControllerConfig) -> Self {
        let (state, _) = watch::channel(SubmissionState::default());
        Self {
            api,
            config,
            form: FormState::new(),
            state: Arc::new(state),
            error_clear: None,
        }
    }

    /// Receiver that sees every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Update a field. Its validation error goes away immediately, whether or
    /// not a submission is in flight.
    pub fn edit_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.edit(field, value);
    }

    pub fn set_agreed_to_terms(&mut self, agreed: bool) {
        self.form.set_agreed_to_terms(agreed);
    }

    /// Validate locally, then send the form.
    ///
    /// No request is made when a field is invalid (the errors are kept on the
    /// form) or when the terms are not accepted.
    ///
    /// Dropping the returned future before it completes puts the state back
    /// to idle; the server is not told.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.form.validate() {
            tracing::debug!(invalid_fields = self.form.errors().len(), "Submission blocked");
            return SubmitOutcome::Blocked(BlockReason::Invalid(self.form.errors().clone()));
        }

        if !self.form.agreed_to_terms() {
            tracing::debug!("Submission blocked: terms not accepted");
            return SubmitOutcome::Blocked(BlockReason::TermsNotAccepted);
        }

        self.cancel_error_clear();
        self.state.send_modify(SubmissionState::begin);

        let guard = LoadingGuard::arm(Arc::clone(&self.state));
        let result = self.api.sign_up(self.form.payload()).await;
        guard.disarm();

        match result {
            Ok(response) => {
                tracing::info!(user_id = %response.user.id, "Sign-up succeeded");
                let user = response.user;
                self.state.send_modify(|state| state.succeed(user.clone()));

                SubmitOutcome::Succeeded {
                    user,
                    redirect_to: self.config.redirect_to.clone(),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sign-up failed");
                let message = e.user_message().to_string();
                self.state.send_modify(|state| state.fail(message.clone()));
                self.schedule_error_clear();

                SubmitOutcome::Failed { message }
            }
        }
    }

    /// Remove the error banner now instead of waiting for the timer.
    pub fn dismiss_error(&mut self) {
        self.cancel_error_clear();
        self.state.send_modify(SubmissionState::clear_error);
    }

    pub fn logout(&mut self) {
        self.state.send_modify(SubmissionState::logout);
    }

    /// Redirect target for a third-party sign-in button.
    pub fn oauth_redirect(&self, provider: OAuthProvider) -> &'static str {
        provider.redirect_path()
    }

    fn schedule_error_clear(&mut self) {
        self.cancel_error_clear();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let state = Arc::clone(&self.state);
        let deadline = tokio::time::Instant::now() + self.config.error_display;

        tokio::spawn(async move {
            tokio::select! {
                // A cancelled timer must never clear a newer error
                biased;
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => {
                    state.send_modify(SubmissionState::clear_error);
                }
            }
        });

        self.error_clear = Some(token);
    }

    fn cancel_error_clear(&mut self) {
        if let Some(token) = self.error_clear.take() {
            token.cancel();
        }
    }
}

impl<A> Drop for SubmissionController<A>
where
    A: SignUpApi,
{
    fn drop(&mut self) {
        self.cancel_error_clear();
    }
}

/// Resets a loading state left behind by an abandoned `submit`.
struct LoadingGuard {
    state: Option<Arc<watch::Sender<SubmissionState>>>,
}

impl LoadingGuard {
    fn arm(state: Arc<watch::Sender<SubmissionState>>) -> Self {
        Self { state: Some(state) }
    }

    fn disarm(mut self) {
        self.state = None;
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            tracing::debug!("Submission abandoned");
            state.send_modify(SubmissionState::abandon);
        }
    }
}
