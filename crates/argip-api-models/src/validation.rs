//! Validation rules shared by the server and both clients.
//!
//! # Design
//! - One rule set, applied before a request leaves a client and again before a row is written.
//! - Failures name the offending wire field so callers can build invalid-param pointers.
//! - Messages are the exact strings surfaced to users as `detail`.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Longest accepted catalog name, in characters; matches the `VARCHAR(100)` columns.
pub const MAX_NAME_LEN: usize = 100;

/// Smallest price that survives rounding to two decimal places.
pub const MIN_PRICE: f64 = 0.01;

/// Largest price a `NUMERIC(10, 2)` column holds.
pub const MAX_PRICE: f64 = 99_999_999.99;

static EMAIL_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Rule violations detected on catalog or account payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field was empty after trimming.
    #[error("Value '{field}' must not be empty")]
    Blank {
        /// Wire field name.
        field: &'static str,
    },
    /// A form value could not be read as a number.
    #[error("Value '{field}' must be a number")]
    NotANumber {
        /// Wire field name.
        field: &'static str,
    },
    /// A numeric field was zero, negative or not finite.
    #[error("Value '{field}' must be greater than zero")]
    NotPositive {
        /// Wire field name.
        field: &'static str,
    },
    /// A text field exceeded [`MAX_NAME_LEN`] characters.
    #[error("Value '{field}' must be at most {max} characters long")]
    TooLong {
        /// Wire field name.
        field: &'static str,
        /// Allowed maximum.
        max: usize,
    },
    /// Price outside [`MIN_PRICE`]..=[`MAX_PRICE`].
    #[error("Value 'cena' must be between 0.01 and 99999999.99")]
    PriceOutOfRange,
    /// Range lower bound was not strictly below the upper bound.
    #[error("Value 'od' must be less than 'do'")]
    InvertedBounds,
    /// E-mail address did not look like `local@domain.tld`.
    #[error("Invalid email address")]
    InvalidEmail,
    /// Password shorter than [`MIN_PASSWORD_LEN`].
    #[error("Password must be at least {min} characters long")]
    PasswordTooShort {
        /// Required minimum length.
        min: usize,
    },
    /// Password confirmation did not match.
    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl ValidationError {
    /// Wire field the violation refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Blank { field }
            | Self::NotANumber { field }
            | Self::NotPositive { field }
            | Self::TooLong { field, .. } => *field,
            Self::PriceOutOfRange => "cena",
            Self::InvertedBounds => "od",
            Self::InvalidEmail => "email",
            Self::PasswordTooShort { .. } | Self::PasswordMismatch => "password",
        }
    }
}

/// Require a non-blank text value.
///
/// # Errors
///
/// Returns [`ValidationError::Blank`] when the trimmed value is empty.
pub fn ensure_present(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(())
}

/// Require a non-blank name of at most [`MAX_NAME_LEN`] characters.
///
/// # Errors
///
/// Returns [`ValidationError::Blank`] or [`ValidationError::TooLong`].
pub fn ensure_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    ensure_present(field, value)?;
    if value.trim().chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Require a price the store can hold without rounding it to zero.
///
/// # Errors
///
/// Returns [`ValidationError::NotPositive`] or [`ValidationError::PriceOutOfRange`].
pub fn validate_price(value: f64) -> Result<(), ValidationError> {
    ensure_positive("cena", value)?;
    if !(MIN_PRICE..=MAX_PRICE).contains(&value) {
        return Err(ValidationError::PriceOutOfRange);
    }
    Ok(())
}

/// Require a finite, strictly positive number.
///
/// # Errors
///
/// Returns [`ValidationError::NotPositive`] otherwise.
pub fn ensure_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field })
    }
}

/// Require positive bounds with `od < do`.
///
/// # Errors
///
/// Returns [`ValidationError::NotPositive`] for a non-positive bound, or
/// [`ValidationError::InvertedBounds`] when `od >= do`.
pub fn validate_bounds(od: f64, do_: f64) -> Result<(), ValidationError> {
    ensure_positive("od", od)?;
    ensure_positive("do", do_)?;
    if od >= do_ {
        return Err(ValidationError::InvertedBounds);
    }
    Ok(())
}

/// Parse a form string into a positive number.
///
/// # Errors
///
/// Returns [`ValidationError::Blank`], [`ValidationError::NotANumber`] or
/// [`ValidationError::NotPositive`].
pub fn parse_positive(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank { field });
    }
    let value = trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber { field })?;
    ensure_positive(field, value)?;
    Ok(value)
}

/// Parse a form string into a storable price.
///
/// # Errors
///
/// Returns the [`parse_positive`] failures or [`ValidationError::PriceOutOfRange`].
pub fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let value = parse_positive("cena", raw)?;
    validate_price(value)?;
    Ok(value)
}

/// Require a plausible e-mail address.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidEmail`] when the address does not match.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let matches = EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email.trim()));
    if matches {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Require a password of at least [`MIN_PASSWORD_LEN`] characters.
///
/// # Errors
///
/// Returns [`ValidationError::PasswordTooShort`] otherwise.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Check a password and its confirmation entry, mismatch first.
///
/// # Errors
///
/// Returns [`ValidationError::PasswordMismatch`] or [`ValidationError::PasswordTooShort`].
pub fn validate_new_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    validate_password(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_require_strict_ordering() {
        assert!(validate_bounds(1.0, 2.0).is_ok());
        assert_eq!(
            validate_bounds(2.0, 2.0),
            Err(ValidationError::InvertedBounds)
        );
        assert_eq!(
            validate_bounds(3.0, 2.0),
            Err(ValidationError::InvertedBounds)
        );
    }

    #[test]
    fn bounds_reject_non_positive_values_first() {
        assert_eq!(
            validate_bounds(0.0, 2.0),
            Err(ValidationError::NotPositive { field: "od" })
        );
        assert_eq!(
            validate_bounds(1.0, -2.0),
            Err(ValidationError::NotPositive { field: "do" })
        );
    }

    #[test]
    fn positive_rejects_nan_and_infinity() {
        assert!(ensure_positive("cena", f64::NAN).is_err());
        assert!(ensure_positive("cena", f64::INFINITY).is_err());
        assert!(ensure_positive("cena", 0.01).is_ok());
    }

    #[test]
    fn parse_positive_reads_comma_decimals() {
        let value = parse_positive("cena", " 2,50 ").expect("comma decimal");
        assert!((value - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_positive_classifies_failures() {
        assert_eq!(
            parse_positive("srednica", ""),
            Err(ValidationError::Blank { field: "srednica" })
        );
        assert_eq!(
            parse_positive("srednica", "abc"),
            Err(ValidationError::NotANumber { field: "srednica" })
        );
        assert_eq!(
            parse_positive("srednica", "-1"),
            Err(ValidationError::NotPositive { field: "srednica" })
        );
    }

    #[test]
    fn names_are_capped_at_column_width() {
        assert!(ensure_name("nazwa", &"x".repeat(MAX_NAME_LEN)).is_ok());
        assert!(ensure_name("nazwa", &"ż".repeat(MAX_NAME_LEN)).is_ok());
        assert_eq!(
            ensure_name("nazwa", &"x".repeat(MAX_NAME_LEN + 1)),
            Err(ValidationError::TooLong {
                field: "nazwa",
                max: MAX_NAME_LEN
            })
        );
        assert_eq!(
            ensure_name("nazwa", "  "),
            Err(ValidationError::Blank { field: "nazwa" })
        );
    }

    #[test]
    fn prices_must_fit_two_decimal_storage() {
        assert!(validate_price(0.01).is_ok());
        assert!(validate_price(MAX_PRICE).is_ok());
        assert_eq!(validate_price(0.001), Err(ValidationError::PriceOutOfRange));
        assert_eq!(validate_price(1e8), Err(ValidationError::PriceOutOfRange));
        assert_eq!(
            validate_price(0.0),
            Err(ValidationError::NotPositive { field: "cena" })
        );
        assert_eq!(parse_price("0,004"), Err(ValidationError::PriceOutOfRange));
        assert_eq!(ValidationError::PriceOutOfRange.field(), "cena");
    }

    #[test]
    fn email_pattern_accepts_common_addresses() {
        assert!(validate_email("jan@example.pl").is_ok());
        assert!(validate_email("jan@example").is_err());
        assert!(validate_email("jan example.pl").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn new_password_checks_mismatch_before_length() {
        assert_eq!(
            validate_new_password("abc", "abd"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            validate_new_password("abc", "abc"),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );
        assert!(validate_new_password("secret1", "secret1").is_ok());
    }

    #[test]
    fn field_names_follow_wire_vocabulary() {
        assert_eq!(ValidationError::InvertedBounds.field(), "od");
        assert_eq!(ValidationError::InvalidEmail.field(), "email");
        assert_eq!(ValidationError::PasswordMismatch.field(), "password");
    }
}
