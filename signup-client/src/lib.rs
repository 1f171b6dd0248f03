//! Client side of the sign-up flow.
//!
//! [`SubmissionController`] owns the form, validates it locally for
//! immediate feedback, forwards it to the sign-up endpoint through a
//! [`SignUpApi`], and tracks the asynchronous outcome in a
//! [`SubmissionState`] that observers read through a `watch` channel.
//!
//! ```no_run
//! use auth::Field;
//! use signup_client::{HttpSignUpApi, SubmissionController, SubmitOutcome};
//!
//! # async fn example() {
//! let api = HttpSignUpApi::new("http://localhost:3000");
//! let mut controller = SubmissionController::new(api);
//!
//! controller.edit_field(Field::Username, "alice");
//! controller.edit_field(Field::Email, "alice@example.com");
//! controller.edit_field(Field::Password, "secret123");
//! controller.edit_field(Field::PasswordConfirmation, "secret123");
//! controller.set_agreed_to_terms(true);
//!
//! if let SubmitOutcome::Succeeded { redirect_to, .. } = controller.submit().await {
//!     println!("navigate to {}", redirect_to);
//! }
//! # }
//! ```

pub mod api;
pub mod controller;
pub mod form;
pub mod state;

pub use api::HttpSignUpApi;
pub use api::OAuthProvider;
pub use api::SignUpApi;
pub use api::SignUpApiError;
pub use controller::BlockReason;
pub use controller::ControllerConfig;
pub use controller::SubmissionController;
pub use controller::SubmitOutcome;
pub use form::FormState;
pub use state::SubmissionState;
pub use state::SubmissionStatus;
pub use state::UserSummary;
