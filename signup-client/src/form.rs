use auth::credentials;
use auth::Field;
use auth::SignUpForm;
use auth::ValidationErrors;

use crate::api::SignUpPayload;

/// Form values, per-field errors and the terms checkbox.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: SignUpForm,
    errors: ValidationErrors,
    agreed_to_terms: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &SignUpForm {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn agreed_to_terms(&self) -> bool {
        self.agreed_to_terms
    }

    /// Replace a field's value and drop its pending error.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        *self.values.field_mut(field) = value.into();
        self.errors.clear(field);
    }

    pub fn set_agreed_to_terms(&mut self, agreed: bool) {
        self.agreed_to_terms = agreed;
    }

    /// Re-run every rule, replacing the stored errors.
    ///
    /// # Returns
    /// True when no rule failed
    pub fn validate(&mut self) -> bool {
        self.errors = credentials::validate(&self.values);
        self.errors.is_empty()
    }

    pub(crate) fn payload(&self) -> SignUpPayload {
        SignUpPayload {
            username: self.values.username.clone(),
            email: self.values.email.clone(),
            password: self.values.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormState {
        let mut form = FormState::new();
        form.edit(Field::Username, "alice");
        form.edit(Field::Email, "alice@example.com");
        form.edit(Field::Password, "123456");
        form.edit(Field::PasswordConfirmation, "123456");
        form
    }

    #[test]
    fn test_validate_valid_form() {
        let mut form = filled();
        assert!(form.validate());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_edit_clears_only_that_field() {
        let mut form = FormState::new();
        assert!(!form.validate());
        assert_eq!(form.errors().len(), 4);

        form.edit(Field::Email, "x");

        // Cleared on edit even though "x" is still invalid
        assert!(!form.errors().contains(Field::Email));
        assert!(form.errors().contains(Field::Username));
        assert_eq!(form.errors().len(), 3);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let mut form = FormState::new();
        form.edit(Field::Username, "ab");

        form.validate();
        let first = form.errors().clone();
        form.validate();
        assert_eq!(form.errors(), &first);
    }

    #[test]
    fn test_payload_omits_confirmation() {
        let payload = filled().payload();
        assert_eq!(payload.username, "alice");
        assert_eq!(payload.email, "alice@example.com");
        assert_eq!(payload.password, "123456");
    }
}
