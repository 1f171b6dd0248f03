use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

/// Registered user as reported by the sign-up endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Submission status as seen by the form.
///
/// Read-only outside this crate; every change goes through one of the
/// transitions below, driven by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionState {
    status: SubmissionStatus,
    error_message: Option<String>,
    current_user: Option<UserSummary>,
}

impl SubmissionState {
    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn current_user(&self) -> Option<&UserSummary> {
        self.current_user.as_ref()
    }

    /// Submit controls must be disabled while this is true.
    pub fn is_loading(&self) -> bool {
        self.status == SubmissionStatus::Loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub(crate) fn begin(&mut self) {
        self.status = SubmissionStatus::Loading;
        self.error_message = None;
    }

    pub(crate) fn succeed(&mut self, user: UserSummary) {
        self.status = SubmissionStatus::Succeeded;
        self.error_message = None;
        self.current_user = Some(user);
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.status = SubmissionStatus::Failed;
        self.error_message = Some(message);
    }

    /// Drop the error banner. A failed submission settles back to idle.
    pub(crate) fn clear_error(&mut self) {
        self.error_message = None;
        if self.status == SubmissionStatus::Failed {
            self.status = SubmissionStatus::Idle;
        }
    }

    /// Request abandoned before an answer arrived.
    pub(crate) fn abandon(&mut self) {
        if self.status == SubmissionStatus::Loading {
            self.status = SubmissionStatus::Idle;
        }
    }

    pub(crate) fn logout(&mut self) {
        self.current_user = None;
        if self.status == SubmissionStatus::Succeeded {
            self.status = SubmissionStatus::Idle;
        }
    }
}
