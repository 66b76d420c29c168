//! Calculator selection state and the new-screw draft.
//!
//! # Design
//! - Diameters and lengths are projections of the fetched list; nothing is stored twice.
//! - Selection is kept as ids so a re-fetch never leaves stale copies behind.
//! - Every change goes through [`SelectionAction`]; a fresh list reconciles the ids against it.

use std::cmp::Ordering;
use std::rc::Rc;

use argip_api_models::projection::{distinct_diameters, lengths_for};
use argip_api_models::validation::{self, ValidationError};
use argip_api_models::{ScrewLength, ScrewLengthCreate};
use yew::Reducible;

/// Current diameter and screw choice.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CalculatorSelection {
    /// Chosen diameter.
    pub diameter: Option<f64>,
    /// Chosen screw id within that diameter.
    pub screw: Option<i64>,
}

impl CalculatorSelection {
    /// Choose a diameter; any selected length is cleared.
    #[must_use]
    pub const fn with_diameter(diameter: Option<f64>) -> Self {
        Self {
            diameter,
            screw: None,
        }
    }

    /// Choose a screw within the current diameter.
    #[must_use]
    pub const fn with_screw(self, screw: Option<i64>) -> Self {
        Self {
            diameter: self.diameter,
            screw,
        }
    }

    /// Selection after `deleted` was removed: cleared if it was the chosen screw.
    #[must_use]
    pub fn after_delete(self, deleted: i64) -> Self {
        if self.screw == Some(deleted) {
            Self {
                diameter: self.diameter,
                screw: None,
            }
        } else {
            self
        }
    }

    /// Lengths available for the chosen diameter, ascending.
    #[must_use]
    pub fn lengths<'a>(&self, screws: &'a [ScrewLength]) -> Vec<&'a ScrewLength> {
        self.diameter
            .map(|diameter| lengths_for(screws, diameter))
            .unwrap_or_default()
    }

    /// The chosen screw, if it is still in the list.
    #[must_use]
    pub fn selected<'a>(&self, screws: &'a [ScrewLength]) -> Option<&'a ScrewLength> {
        let id = self.screw?;
        screws.iter().find(|screw| screw.id == id)
    }

    /// Drop any part of the selection that `screws` no longer contains.
    #[must_use]
    pub fn reconciled(self, screws: &[ScrewLength]) -> Self {
        let Some(diameter) = self.diameter else {
            return Self::default();
        };
        if !diameters(screws)
            .iter()
            .any(|option| option.total_cmp(&diameter) == Ordering::Equal)
        {
            return Self::default();
        }
        let screw = self.screw.filter(|id| {
            lengths_for(screws, diameter)
                .iter()
                .any(|screw| screw.id == *id)
        });
        Self {
            diameter: Some(diameter),
            screw,
        }
    }
}

/// Changes applied to a [`CalculatorSelection`].
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionAction {
    /// The diameter select changed.
    Diameter(Option<f64>),
    /// The length select changed.
    Screw(Option<i64>),
    /// A screw was deleted on the server.
    Deleted(i64),
    /// A fresh list arrived.
    Reconcile(Vec<ScrewLength>),
}

impl Reducible for CalculatorSelection {
    type Action = SelectionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            SelectionAction::Diameter(diameter) => Self::with_diameter(diameter),
            SelectionAction::Screw(screw) => self.with_screw(screw),
            SelectionAction::Deleted(id) => self.after_delete(id),
            SelectionAction::Reconcile(screws) => self.reconciled(&screws),
        };
        if next == *self { self } else { Rc::new(next) }
    }
}

/// Distinct diameters, ascending.
#[must_use]
pub fn diameters(screws: &[ScrewLength]) -> Vec<f64> {
    distinct_diameters(screws)
}

/// Select value for a diameter.
#[must_use]
pub fn diameter_value(diameter: f64) -> String {
    diameter.to_string()
}

/// Read the diameter select back against the offered options.
#[must_use]
pub fn parse_diameter_choice(raw: &str, options: &[f64]) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    options
        .iter()
        .copied()
        .find(|option| option.total_cmp(&value) == Ordering::Equal)
}

/// New screw form inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrewDraft {
    /// Diameter as typed.
    pub srednica: String,
    /// Length as typed.
    pub dlugosc: String,
}

impl ScrewDraft {
    /// Validate and convert into a create payload.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`]; both values must be positive numbers.
    pub fn to_create(&self) -> Result<ScrewLengthCreate, ValidationError> {
        let srednica = validation::parse_positive("srednica", &self.srednica)?;
        let dlugosc = validation::parse_positive("dlugosc", &self.dlugosc)?;
        Ok(ScrewLengthCreate { srednica, dlugosc })
    }
}

/// i18n key for a rejected screw draft.
#[must_use]
pub fn draft_error_key(err: &ValidationError) -> &'static str {
    if err.field() == "dlugosc" {
        "calculator.errorInvalidLength"
    } else {
        "calculator.errorInvalidDiameter"
    }
}
