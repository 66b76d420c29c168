#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Argip public API.
//!
//! The server, the CLI and the browser UI all encode and decode through these
//! types so the wire contract stays in one place. Field names follow the
//! catalog vocabulary used on the wire (`nazwa`, `od`, `do`, `srednica`, ...).

pub mod projection;
pub mod validation;

use serde::{Deserialize, Serialize};

pub use validation::ValidationError;

/// RFC9457-compatible problem document surfaced on validation/runtime errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    /// URI reference identifying the problem type.
    pub kind: String,
    /// Short, human-readable summary of the issue.
    pub title: String,
    /// HTTP status code associated with the error.
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Detailed diagnostic message when available.
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Parameters that failed validation, if applicable.
    pub invalid_params: Option<Vec<ProblemInvalidParam>>,
}

/// Invalid parameter pointer surfaced alongside a [`ProblemDetails`] payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemInvalidParam {
    /// JSON Pointer to the offending field.
    pub pointer: String,
    /// Human-readable description of the validation failure.
    pub message: String,
}

/// Minimal error body used by clients: only the `detail` field matters for display.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// Human-readable detail, when the server supplied one.
    #[serde(default)]
    pub detail: Option<String>,
}

/// Banner returned from `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceInfo {
    /// Greeting message.
    pub message: String,
    /// Service version.
    pub version: String,
}

/// Liveness document returned from `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// `healthy` when the database answered.
    pub status: String,
}

/// Registered account as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Account identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Unique e-mail address.
    pub email: String,
}

/// Body of `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Desired login name.
    pub username: String,
    /// Contact e-mail.
    pub email: String,
    /// Plain-text password; hashed server side.
    pub password: String,
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

/// Access token issued on successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    /// Opaque bearer token.
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: String,
}

impl TokenResponse {
    /// Wrap a freshly minted token.
    #[must_use]
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "bearer".to_string(),
        }
    }
}

/// Named numeric interval used to classify nuts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Range {
    /// Range identifier.
    pub id: i64,
    /// Display name.
    pub nazwa: String,
    /// Lower bound.
    pub od: f64,
    /// Upper bound.
    #[serde(rename = "do")]
    pub do_: f64,
}

/// Body of `POST /api/ranges`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RangeCreate {
    /// Display name.
    pub nazwa: String,
    /// Lower bound.
    pub od: f64,
    /// Upper bound.
    #[serde(rename = "do")]
    pub do_: f64,
}

impl RangeCreate {
    /// Check the name and bounds before the range is sent or stored.
    ///
    /// # Errors
    ///
    /// Returns the first rule the payload violates.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::ensure_name("nazwa", &self.nazwa)?;
        validation::validate_bounds(self.od, self.do_)
    }
}

/// Body of `PUT /api/ranges/{id}`; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RangeUpdate {
    /// Replacement name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nazwa: Option<String>,
    /// Replacement lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub od: Option<f64>,
    /// Replacement upper bound.
    #[serde(default, rename = "do", skip_serializing_if = "Option::is_none")]
    pub do_: Option<f64>,
}

impl RangeUpdate {
    /// Merge the update over an existing range, producing the record to persist.
    #[must_use]
    pub fn apply(&self, current: &Range) -> RangeCreate {
        RangeCreate {
            nazwa: self.nazwa.clone().unwrap_or_else(|| current.nazwa.clone()),
            od: self.od.unwrap_or(current.od),
            do_: self.do_.unwrap_or(current.do_),
        }
    }
}

impl From<RangeCreate> for RangeUpdate {
    /// Full-record update carrying every field.
    fn from(record: RangeCreate) -> Self {
        Self {
            nazwa: Some(record.nazwa),
            od: Some(record.od),
            do_: Some(record.do_),
        }
    }
}

/// Priced catalog item belonging to exactly one range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Nut {
    /// Nut identifier.
    pub id: i64,
    /// Owning range identifier.
    pub id_zakresu: i64,
    /// Display name.
    pub nazwa: String,
    /// Diameter.
    pub srednica: f64,
    /// Unit price, two decimal places.
    pub cena: f64,
}

/// Body of `POST /api/nuts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutCreate {
    /// Owning range identifier.
    pub id_zakresu: i64,
    /// Display name.
    pub nazwa: String,
    /// Diameter.
    pub srednica: f64,
    /// Unit price.
    pub cena: f64,
}

impl NutCreate {
    /// Check the name, diameter and price before the nut is sent or stored.
    ///
    /// # Errors
    ///
    /// Returns the first rule the payload violates.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::ensure_name("nazwa", &self.nazwa)?;
        validation::ensure_positive("srednica", self.srednica)?;
        validation::validate_price(self.cena)
    }
}

/// Body of `PUT /api/nuts/{id}`; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NutUpdate {
    /// Replacement owning range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_zakresu: Option<i64>,
    /// Replacement name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nazwa: Option<String>,
    /// Replacement diameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srednica: Option<f64>,
    /// Replacement price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cena: Option<f64>,
}

impl NutUpdate {
    /// Merge the update over an existing nut, producing the record to persist.
    #[must_use]
    pub fn apply(&self, current: &Nut) -> NutCreate {
        NutCreate {
            id_zakresu: self.id_zakresu.unwrap_or(current.id_zakresu),
            nazwa: self.nazwa.clone().unwrap_or_else(|| current.nazwa.clone()),
            srednica: self.srednica.unwrap_or(current.srednica),
            cena: self.cena.unwrap_or(current.cena),
        }
    }
}

impl From<NutCreate> for NutUpdate {
    /// Full-record update carrying every field.
    fn from(record: NutCreate) -> Self {
        Self {
            id_zakresu: Some(record.id_zakresu),
            nazwa: Some(record.nazwa),
            srednica: Some(record.srednica),
            cena: Some(record.cena),
        }
    }
}

/// Query string accepted by `GET /api/nuts`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NutListQuery {
    /// Restrict the listing to nuts owned by this range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_id: Option<i64>,
}

/// Reference record pairing a screw diameter with a length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrewLength {
    /// Record identifier.
    pub id: i64,
    /// Diameter.
    pub srednica: f64,
    /// Length.
    pub dlugosc: f64,
}

/// Body of `POST /api/screw-lengths`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrewLengthCreate {
    /// Diameter.
    pub srednica: f64,
    /// Length.
    pub dlugosc: f64,
}

impl ScrewLengthCreate {
    /// Check that both dimensions are positive.
    ///
    /// # Errors
    ///
    /// Returns the first rule the payload violates.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::ensure_positive("srednica", self.srednica)?;
        validation::ensure_positive("dlugosc", self.dlugosc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_range() -> Range {
        Range {
            id: 3,
            nazwa: "M6-M10".to_string(),
            od: 6.0,
            do_: 10.0,
        }
    }

    #[test]
    fn range_serialises_upper_bound_as_do() {
        let value = serde_json::to_value(sample_range()).expect("serialise range");
        assert_eq!(
            value,
            json!({"id": 3, "nazwa": "M6-M10", "od": 6.0, "do": 10.0})
        );
    }

    #[test]
    fn range_update_keeps_missing_fields() {
        let update: RangeUpdate =
            serde_json::from_value(json!({"do": 12.5})).expect("parse update");
        let merged = update.apply(&sample_range());
        assert_eq!(merged.nazwa, "M6-M10");
        assert!((merged.od - 6.0).abs() < f64::EPSILON);
        assert!((merged.do_ - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn range_create_rejects_inverted_bounds() {
        let request = RangeCreate {
            nazwa: "bad".to_string(),
            od: 10.0,
            do_: 10.0,
        };
        let err = request.validate().expect_err("equal bounds rejected");
        assert_eq!(err.to_string(), "Value 'od' must be less than 'do'");
    }

    #[test]
    fn nut_update_overrides_only_supplied_fields() {
        let current = Nut {
            id: 1,
            id_zakresu: 3,
            nazwa: "M8".to_string(),
            srednica: 8.0,
            cena: 0.35,
        };
        let update = NutUpdate {
            cena: Some(0.4),
            ..NutUpdate::default()
        };
        let merged = update.apply(&current);
        assert_eq!(merged.id_zakresu, 3);
        assert_eq!(merged.nazwa, "M8");
        assert!((merged.cena - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn full_record_update_serialises_every_field() {
        let update = RangeUpdate::from(RangeCreate {
            nazwa: "M6-M10".to_string(),
            od: 6.0,
            do_: 10.0,
        });
        assert_eq!(
            serde_json::to_value(&update).expect("serialise"),
            serde_json::json!({"nazwa": "M6-M10", "od": 6.0, "do": 10.0})
        );
    }

    #[test]
    fn nut_update_omits_absent_fields_on_the_wire() {
        let update = NutUpdate {
            nazwa: Some("M10".to_string()),
            ..NutUpdate::default()
        };
        let value = serde_json::to_value(update).expect("serialise update");
        assert_eq!(value, json!({"nazwa": "M10"}));
    }

    #[test]
    fn screw_length_create_requires_positive_dimensions() {
        let request = ScrewLengthCreate {
            srednica: 6.0,
            dlugosc: 0.0,
        };
        let err = request.validate().expect_err("zero length rejected");
        assert_eq!(err.field(), "dlugosc");
    }

    #[test]
    fn error_body_tolerates_missing_detail() {
        let body: ErrorBody = serde_json::from_value(json!({"title": "x"})).expect("parse");
        assert!(body.detail.is_none());
        let body: ErrorBody =
            serde_json::from_value(json!({"detail": "Range not found"})).expect("parse");
        assert_eq!(body.detail.as_deref(), Some("Range not found"));
    }

    #[test]
    fn token_response_is_bearer() {
        let token = TokenResponse::bearer("abc.def");
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.access_token, "abc.def");
    }
}
