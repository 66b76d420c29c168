//! Login and registration form drafts.

use argip_api_models::validation::{self, ValidationError};
use argip_api_models::{LoginRequest, RegisterRequest};

/// Login form inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginDraft {
    /// Username as typed.
    pub username: String,
    /// Password as typed.
    pub password: String,
}

impl LoginDraft {
    /// Build the login payload.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Blank`] when either field is empty.
    pub fn to_request(&self) -> Result<LoginRequest, ValidationError> {
        let username = self.username.trim();
        validation::ensure_present("username", username)?;
        validation::ensure_present("password", &self.password)?;
        Ok(LoginRequest {
            username: username.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Registration form inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterDraft {
    /// Username as typed.
    pub username: String,
    /// E-mail as typed.
    pub email: String,
    /// Password as typed.
    pub password: String,
    /// Password confirmation as typed.
    pub confirm_password: String,
}

impl RegisterDraft {
    /// Build the registration payload. Password mismatch is reported before length.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn to_request(&self) -> Result<RegisterRequest, ValidationError> {
        validation::validate_new_password(&self.password, &self.confirm_password)?;
        let username = self.username.trim();
        validation::ensure_present("username", username)?;
        let email = self.email.trim();
        validation::validate_email(email)?;
        Ok(RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(password: &str, confirm: &str) -> RegisterDraft {
        RegisterDraft {
            username: " jan ".to_string(),
            email: "jan@example.pl".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn mismatch_is_reported_before_length() {
        assert_eq!(
            register("123", "1234").to_request(),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            register("12345", "12345").to_request(),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );
    }

    #[test]
    fn valid_registration_trims_identity_fields() {
        let request = register("sekret1", "sekret1").to_request().expect("valid");
        assert_eq!(request.username, "jan");
        assert_eq!(request.email, "jan@example.pl");
        assert_eq!(request.password, "sekret1");
    }

    #[test]
    fn login_requires_both_fields() {
        let draft = LoginDraft {
            username: "  ".to_string(),
            password: "x".to_string(),
        };
        assert_eq!(
            draft.to_request(),
            Err(ValidationError::Blank { field: "username" })
        );
        let draft = LoginDraft {
            username: "jan".to_string(),
            password: "sekret1".to_string(),
        };
        assert_eq!(draft.to_request().expect("valid").username, "jan");
    }
}
