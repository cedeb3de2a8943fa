//! Field validation for signup and login input.

use std::collections::BTreeMap;

use crate::models::user::{LoginPayload, SignupPayload};

/// Per-field validation messages, keyed by form field name.
pub type FieldErrors = BTreeMap<&'static str, Vec<String>>;

const MIN_NAME_LEN: usize = 2;
const MIN_PASSWORD_LEN: usize = 8;

pub fn validate_signup(payload: &SignupPayload) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if payload.name.trim().chars().count() < MIN_NAME_LEN {
        errors
            .entry("name")
            .or_default()
            .push("Name must be at least 2 characters long.".to_string());
    }

    if !is_valid_email(&payload.email) {
        errors
            .entry("email")
            .or_default()
            .push("Please enter a valid email.".to_string());
    }

    for message in password_errors(&payload.password) {
        errors.entry("password").or_default().push(message);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_login(payload: &LoginPayload) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if !is_valid_email(&payload.email) {
        errors
            .entry("email")
            .or_default()
            .push("Please enter a valid email.".to_string());
    }

    if payload.password.is_empty() {
        errors
            .entry("password")
            .or_default()
            .push("Password is required.".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Structural check only: one `@`, a non-empty local part, and a dot
/// somewhere after it in the domain.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let Some(domain) = parts.next() else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let mut labels = domain.split('.');
    labels.clone().count() >= 2 && labels.all(|label| !label.is_empty())
}

fn password_errors(password: &str) -> Vec<String> {
    let mut messages = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        messages.push("Password must be at least 8 characters long.".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        messages.push("Password must contain at least one uppercase letter.".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        messages.push("Password must contain at least one number.".to_string());
    }
    if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        messages.push("Password must contain at least one special character.".to_string());
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(name: &str, email: &str, password: &str) -> SignupPayload {
        SignupPayload {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_signup() {
        assert!(validate_signup(&signup("Jo", "jo@x.com", "Abcdefg1!")).is_ok());
    }

    #[test]
    fn rejects_short_name() {
        let errors = validate_signup(&signup("J", "jo@x.com", "Abcdefg1!")).unwrap_err();
        assert_eq!(errors["name"].len(), 1);
        assert!(!errors.contains_key("email"));
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["", "jo", "@x.com", "jo@", "jo@x", "jo@x..com", "jo@@x.com"] {
            let errors = validate_signup(&signup("Jo", email, "Abcdefg1!")).unwrap_err();
            assert!(errors.contains_key("email"), "accepted {email:?}");
        }
    }

    #[test]
    fn password_rules_accumulate() {
        let errors = validate_signup(&signup("Jo", "jo@x.com", "abc")).unwrap_err();
        // short, no uppercase, no digit, no symbol
        assert_eq!(errors["password"].len(), 4);
    }

    #[test]
    fn password_missing_only_symbol() {
        let errors = validate_signup(&signup("Jo", "jo@x.com", "Abcdefg1")).unwrap_err();
        assert_eq!(
            errors["password"],
            vec!["Password must contain at least one special character.".to_string()]
        );
    }

    #[test]
    fn login_requires_email_shape_and_password() {
        let payload = LoginPayload {
            email: "not-an-email".to_string(),
            password: String::new(),
            from: None,
        };
        let errors = validate_login(&payload).unwrap_err();
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("password"));
    }
}
