//! Input validation for user and project fields.
//!
//! The `is_valid_*` predicates are total: malformed input yields `false`, never
//! a panic. The `validate_*`/`parse_*` forms wrap the same checks in a
//! [`ValidationError`] so callers can report which rule failed and re-prompt.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

/// Canonical date layout (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("EMAIL_REGEX is a valid regex literal")
});

#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static EGYPTIAN_PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^01[0125][0-9]{8}$").expect("EGYPTIAN_PHONE_REGEX is a valid regex literal")
});

#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static DATE_SHAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("DATE_SHAPE_REGEX is a valid regex literal")
});

/// Error type for field validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid email format: '{0}'")]
    InvalidEmail(String),

    #[error("Invalid Egyptian phone number '{0}'. It should start with 010, 011, 012, or 015 and be 11 digits")]
    InvalidPhone(String),

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Invalid date '{0}'. Please use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid amount '{0}'. Please enter a number")]
    InvalidAmount(String),

    #[error("Target must be a positive number, got {0}")]
    NonPositiveTarget(f64),

    #[error("End date {end} must be after start date {start}")]
    EndNotAfterStart { start: NaiveDate, end: NaiveDate },
}

/// Check `local@domain.tld` shape. Case is preserved and not normalized.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check for an 11-digit mobile number starting with 010, 011, 012 or 015.
#[must_use]
pub fn is_valid_egyptian_phone(phone: &str) -> bool {
    EGYPTIAN_PHONE_REGEX.is_match(phone)
}

#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Check for a zero-padded `YYYY-MM-DD` string naming a real calendar day.
#[must_use]
pub fn is_valid_date(date: &str) -> bool {
    parse_date(date).is_ok()
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if is_valid_egyptian_phone(phone) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone(phone.to_string()))
    }
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if is_valid_password(password) {
        Ok(())
    } else {
        Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        })
    }
}

/// Parse a canonical `YYYY-MM-DD` date.
///
/// The shape check runs before chrono parsing so that unpadded forms such as
/// `2024-1-5` are rejected.
pub fn parse_date(date: &str) -> Result<NaiveDate, ValidationError> {
    if !DATE_SHAPE_REGEX.is_match(date) {
        return Err(ValidationError::InvalidDate(date.to_string()));
    }
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))
}

pub fn validate_target(target: f64) -> Result<f64, ValidationError> {
    if !target.is_finite() {
        return Err(ValidationError::InvalidAmount(target.to_string()));
    }
    if target <= 0.0 {
        return Err(ValidationError::NonPositiveTarget(target));
    }
    Ok(target)
}

/// Parse a raw funding target typed by the user.
pub fn parse_target(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;
    validate_target(value)
}

/// The campaign must end strictly after it starts.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end > start {
        Ok(())
    } else {
        Err(ValidationError::EndNotAfterStart { start, end })
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
