//! Nut editor and filter state.

use argip_api_models::projection::label_nuts;
use argip_api_models::validation::{self, ValidationError};
use argip_api_models::{Nut, NutCreate, NutUpdate, Range};

/// Checked request produced by the editor.
#[derive(Clone, Debug, PartialEq)]
pub enum NutPayload {
    /// New record.
    Create(NutCreate),
    /// Replace the fields of record `id`.
    Update(i64, NutUpdate),
}

/// Nut form inputs. `id_zakresu` holds the select value, empty until chosen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NutDraft {
    /// Selected range id.
    pub id_zakresu: String,
    /// Name as typed.
    pub nazwa: String,
    /// Diameter as typed.
    pub srednica: String,
    /// Price as typed.
    pub cena: String,
}

impl NutDraft {
    /// Prefill the editor from a stored nut.
    #[must_use]
    pub fn from_nut(nut: &Nut) -> Self {
        Self {
            id_zakresu: nut.id_zakresu.to_string(),
            nazwa: nut.nazwa.clone(),
            srednica: nut.srednica.to_string(),
            cena: nut.cena.to_string(),
        }
    }

    /// Validate and convert into a create payload.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`]; a range must be chosen and numbers must be positive.
    pub fn to_create(&self) -> Result<NutCreate, ValidationError> {
        let id_zakresu = parse_range_id(&self.id_zakresu)?;
        let nazwa = self.nazwa.trim();
        validation::ensure_name("nazwa", nazwa)?;
        let srednica = validation::parse_positive("srednica", &self.srednica)?;
        let cena = validation::parse_price(&self.cena)?;
        Ok(NutCreate {
            id_zakresu,
            nazwa: nazwa.to_string(),
            srednica,
            cena,
        })
    }

    /// Validate and convert into a full-record update payload.
    ///
    /// # Errors
    ///
    /// Same rules as [`Self::to_create`].
    pub fn to_update(&self) -> Result<NutUpdate, ValidationError> {
        self.to_create().map(NutUpdate::from)
    }

    /// Checked payload for the editor mode.
    ///
    /// # Errors
    ///
    /// Same rules as [`Self::to_create`].
    pub fn to_payload(&self, editing: Option<i64>) -> Result<NutPayload, ValidationError> {
        match editing {
            Some(id) => Ok(NutPayload::Update(id, self.to_update()?)),
            None => Ok(NutPayload::Create(self.to_create()?)),
        }
    }
}

fn parse_range_id(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank {
            field: "id_zakresu",
        });
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::NotANumber {
            field: "id_zakresu",
        })
}

/// Read the range filter select: empty or unparsable means "all ranges".
#[must_use]
pub fn parse_filter(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Select value for the current filter.
#[must_use]
pub fn filter_value(filter: Option<i64>) -> String {
    filter.map(|id| id.to_string()).unwrap_or_default()
}

/// Table row: a nut with its range label and formatted price.
#[derive(Clone, Debug, PartialEq)]
pub struct NutRow {
    /// The nut itself.
    pub nut: Nut,
    /// Range name, or the raw id when the range is unknown.
    pub range: String,
    /// Price with two decimals.
    pub price: String,
}

/// Cross-reference nuts with the ranges list for display.
#[must_use]
pub fn nut_rows(nuts: &[Nut], ranges: &[Range]) -> Vec<NutRow> {
    label_nuts(nuts, ranges)
        .into_iter()
        .map(|(nut, range)| NutRow {
            nut: nut.clone(),
            range,
            price: format!("{:.2}", nut.cena),
        })
        .collect()
}
