use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_NAME_LENGTH: usize = 3;

pub static DUPLICATE_EMAIL: &str = "This email is already registered";

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::from(message))
}

pub fn is_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(error("required", "Email is required"));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(error("invalid", "Email is invalid"));
    }

    Ok(())
}

pub fn is_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(error("required", "Password is required"));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(error("length", "Password must be at least 6 characters"));
    }

    Ok(())
}

pub fn is_full_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(error("required", "Full name is required"));
    }

    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(error("length", "Full name must be at least 3 characters"));
    }

    Ok(())
}

/// Whitespace-only input counts as missing on the user form.
pub fn is_user_full_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(error("required", "Full name is required"));
    }

    is_full_name(name)
}

pub fn is_user_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(error("required", "Email is required"));
    }

    is_email(email)
}

pub fn is_confirmation(confirmation: &str) -> Result<(), ValidationError> {
    if confirmation.is_empty() {
        return Err(error("required", "Please confirm your password"));
    }

    Ok(())
}

pub fn passwords_match(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(error("mismatch", "Passwords do not match"));
    }

    Ok(())
}

pub fn has_agreed(agreed: &bool) -> Result<(), ValidationError> {
    if !agreed {
        return Err(error("terms", "Please agree to the terms and conditions"));
    }

    Ok(())
}
