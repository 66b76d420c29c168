//! Range editor state.
//!
//! # Design
//! - Keep form inputs as strings for lossless editing.
//! - Convert to shared API types only on save, after every local rule passes.

use argip_api_models::validation::{self, ValidationError};
use argip_api_models::{Range, RangeCreate, RangeUpdate};

/// Checked request produced by the editor.
#[derive(Clone, Debug, PartialEq)]
pub enum RangePayload {
    /// New record.
    Create(RangeCreate),
    /// Replace the fields of record `id`.
    Update(i64, RangeUpdate),
}

/// Range form inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeDraft {
    /// Name as typed.
    pub nazwa: String,
    /// Lower bound as typed.
    pub od: String,
    /// Upper bound as typed.
    pub do_: String,
}

impl RangeDraft {
    /// Prefill the editor from a stored range.
    #[must_use]
    pub fn from_range(range: &Range) -> Self {
        Self {
            nazwa: range.nazwa.clone(),
            od: range.od.to_string(),
            do_: range.do_.to_string(),
        }
    }

    /// Validate and convert into a create payload.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`]; bounds must be positive and `od < do`.
    pub fn to_create(&self) -> Result<RangeCreate, ValidationError> {
        let nazwa = self.nazwa.trim();
        validation::ensure_name("nazwa", nazwa)?;
        let od = validation::parse_positive("od", &self.od)?;
        let do_ = validation::parse_positive("do", &self.do_)?;
        validation::validate_bounds(od, do_)?;
        Ok(RangeCreate {
            nazwa: nazwa.to_string(),
            od,
            do_,
        })
    }

    /// Validate and convert into a full-record update payload.
    ///
    /// # Errors
    ///
    /// Same rules as [`Self::to_create`].
    pub fn to_update(&self) -> Result<RangeUpdate, ValidationError> {
        self.to_create().map(RangeUpdate::from)
    }

    /// Checked payload for the editor mode: update when `editing` names a record.
    ///
    /// # Errors
    ///
    /// Same rules as [`Self::to_create`].
    pub fn to_payload(&self, editing: Option<i64>) -> Result<RangePayload, ValidationError> {
        match editing {
            Some(id) => Ok(RangePayload::Update(id, self.to_update()?)),
            None => Ok(RangePayload::Create(self.to_create()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(od: &str, do_: &str) -> RangeDraft {
        RangeDraft {
            nazwa: " M6-M10 ".to_string(),
            od: od.to_string(),
            do_: do_.to_string(),
        }
    }

    #[test]
    fn inverted_or_equal_bounds_are_rejected() {
        assert_eq!(
            draft("10", "6").to_create(),
            Err(ValidationError::InvertedBounds)
        );
        assert_eq!(
            draft("6", "6").to_create(),
            Err(ValidationError::InvertedBounds)
        );
    }

    #[test]
    fn bounds_must_be_positive_numbers() {
        assert_eq!(
            draft("0", "6").to_create(),
            Err(ValidationError::NotPositive { field: "od" })
        );
        assert_eq!(
            draft("abc", "6").to_create(),
            Err(ValidationError::NotANumber { field: "od" })
        );
        assert_eq!(
            draft("1", "").to_create(),
            Err(ValidationError::Blank { field: "do" })
        );
    }

    #[test]
    fn valid_draft_becomes_full_update() {
        let update = draft("6", "10,5").to_update().expect("valid");
        assert_eq!(update.nazwa.as_deref(), Some("M6-M10"));
        assert_eq!(update.od, Some(6.0));
        assert_eq!(update.do_, Some(10.5));
    }

    #[test]
    fn editor_mode_picks_the_payload() {
        let draft = draft("6", "10");
        assert!(matches!(
            draft.to_payload(None),
            Ok(RangePayload::Create(_))
        ));
        assert!(matches!(
            draft.to_payload(Some(4)),
            Ok(RangePayload::Update(4, _))
        ));
        assert_eq!(
            RangeDraft::default().to_payload(Some(4)),
            Err(ValidationError::Blank { field: "nazwa" })
        );
    }

    #[test]
    fn editing_prefills_from_the_record() {
        let range = Range {
            id: 3,
            nazwa: "M6-M10".to_string(),
            od: 6.0,
            do_: 10.5,
        };
        let draft = RangeDraft::from_range(&range);
        assert_eq!(draft.od, "6");
        assert_eq!(draft.do_, "10.5");
        assert_eq!(draft.to_create().expect("valid").nazwa, "M6-M10");
    }
}
