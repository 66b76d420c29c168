//! API failure classification and user-facing message selection.

use std::fmt;

use argip_api_models::ErrorBody;

use crate::i18n::TranslationBundle;

/// Why an API call did not produce a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiFailure {
    /// A protected call came back 401.
    Unauthorized,
    /// Any other non-success status, with the server `detail` when it sent one.
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided explanation.
        detail: Option<String>,
    },
    /// The request never completed.
    Network(String),
    /// The response body did not match the expected shape.
    Decode(String),
}

impl ApiFailure {
    /// Build a status failure from a raw response body.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.detail)
            .filter(|detail| !detail.trim().is_empty());
        Self::Status { status, detail }
    }

    /// Server `detail`, when the failure carries one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            Self::Unauthorized | Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Message for the view banner: the server detail verbatim, else the localized fallback.
    #[must_use]
    pub fn message(&self, bundle: &TranslationBundle, fallback_key: &str) -> String {
        if matches!(self, Self::Unauthorized) {
            return bundle.text(
                "errors.sessionExpired",
                "Your session has expired. Please sign in again.",
            );
        }
        self.detail()
            .map_or_else(|| bundle.text(fallback_key, ""), ToString::to_string)
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => f.write_str("session rejected by server"),
            Self::Status {
                status,
                detail: Some(detail),
            } => write!(f, "request failed with status {status}: {detail}"),
            Self::Status {
                status,
                detail: None,
            } => write!(f, "request failed with status {status}"),
            Self::Network(reason) => write!(f, "request did not complete: {reason}"),
            Self::Decode(reason) => write!(f, "unexpected response body: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LocaleCode;

    #[test]
    fn detail_is_shown_verbatim() {
        let bundle = TranslationBundle::new(LocaleCode::Pl);
        let err = ApiFailure::from_status(400, r#"{"detail":"Range name already exists"}"#);
        assert_eq!(
            err.message(&bundle, "ranges.errorSave"),
            "Range name already exists"
        );
    }

    #[test]
    fn missing_detail_uses_localized_fallback() {
        let bundle = TranslationBundle::new(LocaleCode::Pl);
        for err in [
            ApiFailure::from_status(500, "Internal Server Error"),
            ApiFailure::from_status(400, r#"{"detail":"  "}"#),
            ApiFailure::Network("offline".to_string()),
        ] {
            assert_eq!(
                err.message(&bundle, "ranges.errorSave"),
                "Nie udało się zapisać zakresu"
            );
        }
    }

    #[test]
    fn problem_documents_expose_their_detail() {
        let err = ApiFailure::from_status(
            422,
            r#"{"type":"about:blank","title":"Validation failed","status":422,"detail":"Value 'od' must be less than 'do'"}"#,
        );
        assert_eq!(err.detail(), Some("Value 'od' must be less than 'do'"));
    }

    #[test]
    fn unauthorized_asks_to_sign_in_again() {
        let bundle = TranslationBundle::new(LocaleCode::En);
        assert_eq!(
            ApiFailure::Unauthorized.message(&bundle, "nuts.errorFetch"),
            "Your session has expired. Please sign in again."
        );
    }
}
