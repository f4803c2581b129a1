use crate::models::{FieldErrors, SignupRequest, User};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// Check a signup submission against the existing registry.
///
/// Every field is checked so the caller gets all inline errors at once.
/// An empty map means the submission is acceptable.
pub fn validate(request: &SignupRequest, users: &[User]) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let name = request.name.trim();
    let email = request.email.trim();

    if name.is_empty() {
        errors.insert("name".into(), "Please enter your full name.".into());
    }

    if !EMAIL_RE.is_match(email) {
        errors.insert("email".into(), "Please enter a valid email address.".into());
    } else if is_registered(users, email) {
        errors.insert("email".into(), "This email is already registered.".into());
    }

    if request.password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(
            "password".into(),
            format!("Password must be at least {MIN_PASSWORD_LEN} characters."),
        );
    }

    if request.confirm != request.password {
        errors.insert("confirm".into(), "Passwords do not match.".into());
    }

    errors
}

/// Case-insensitive email lookup against the registry.
pub fn is_registered(users: &[User], email: &str) -> bool {
    users
        .iter()
        .any(|user| user.email.eq_ignore_ascii_case(email))
}

/// Build the registry entry for an accepted submission. The password is
/// only ever validated, never stored.
pub fn new_user(request: &SignupRequest, created_at: String) -> User {
    User {
        name: request.name.trim().to_string(),
        email: request.email.trim().to_string(),
        created_at,
    }
}
