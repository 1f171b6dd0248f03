use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Loose `local@domain.tld` shape. Not RFC 5322.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\S+@\S+\.\S+").expect("email pattern is a valid regex")
});

/// Form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Username,
    Email,
    Password,
    PasswordConfirmation,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Email => "email",
            Field::Password => "password",
            Field::PasswordConfirmation => "passwordConfirmation",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sign-up form as typed by the user.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl SignUpForm {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        password_confirmation: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            password_confirmation: password_confirmation.into(),
        }
    }

    /// Mutable access to a single field's value.
    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Username => &mut self.username,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::PasswordConfirmation => &mut self.password_confirmation,
        }
    }
}

// Passwords stay out of logs.
impl fmt::Debug for SignUpForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("password_confirmation", &"[REDACTED]")
            .finish()
    }
}

/// Field-to-message mapping. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drop the message for one field, returning it if present.
    pub fn clear(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// First message in field order, if any.
    pub fn first(&self) -> Option<(Field, &str)> {
        self.iter().next()
    }

    fn record(&mut self, field: Field, outcome: Result<(), &'static str>) {
        if let Err(message) = outcome {
            self.insert(field, message);
        }
    }
}

/// Username: required after trimming, at least 3 characters.
pub fn check_username(username: &str) -> Result<(), &'static str> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        Err("Username is required")
    } else if trimmed.chars().count() < USERNAME_MIN_LENGTH {
        Err("Username must be at least 3 characters")
    } else {
        Ok(())
    }
}

/// Email: required after trimming, loose `x@y.z` shape.
pub fn check_email(email: &str) -> Result<(), &'static str> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        Err("Email is required")
    } else if !EMAIL_PATTERN.is_match(trimmed) {
        Err("Please enter a valid email")
    } else {
        Ok(())
    }
}

/// Password: required, at least 6 characters. Not trimmed.
pub fn check_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        Err("Password is required")
    } else if password.chars().count() < PASSWORD_MIN_LENGTH {
        Err("Password must be at least 6 characters")
    } else {
        Ok(())
    }
}

/// Confirmation: required, must equal the password exactly.
pub fn check_confirmation(password: &str, confirmation: &str) -> Result<(), &'static str> {
    if confirmation.is_empty() {
        Err("Please confirm your password")
    } else if password != confirmation {
        Err("Passwords do not match")
    } else {
        Ok(())
    }
}

/// Run every rule against a form.
///
/// Pure: the same form always yields the same errors.
pub fn validate(form: &SignUpForm) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.record(Field::Username, check_username(&form.username));
    errors.record(Field::Email, check_email(&form.email));
    errors.record(Field::Password, check_password(&form.password));
    errors.record(
        Field::PasswordConfirmation,
        check_confirmation(&form.password, &form.password_confirmation),
    );
    errors
}
