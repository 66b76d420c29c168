//! Per-view state machines: the fetched list and the editor panel.
//!
//! # Design
//! - The list and the editor move independently.
//! - Mutation failures go to a separate banner so a loaded list is never discarded.
//! - A failed re-fetch keeps the rows already on screen and reports through the banner.

/// Lifecycle of a fetched list.
#[derive(Clone, Debug, PartialEq)]
pub enum ListState<T> {
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Loaded(Vec<T>),
    /// The last fetch failed with a localized message.
    Error(String),
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> ListState<T> {
    /// Rows to render; empty unless loaded.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Loaded(items) => items,
            Self::Loading | Self::Error(_) => &[],
        }
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Fetch error message, if the last fetch failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            Self::Loading | Self::Loaded(_) => None,
        }
    }

    /// Whether rows from a successful fetch are on screen.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Apply a failed fetch.
    ///
    /// Loaded rows survive and the message comes back for the banner; with
    /// nothing loaded the list itself shows the error.
    #[must_use]
    pub fn after_failure(self, message: String) -> (Self, Option<String>) {
        match self {
            Self::Loaded(items) => (Self::Loaded(items), Some(message)),
            Self::Loading | Self::Error(_) => (Self::Error(message), None),
        }
    }

    /// Whether the list loaded and has no rows.
    #[must_use]
    pub const fn is_empty_result(&self) -> bool {
        matches!(self, Self::Loaded(items) if items.is_empty())
    }
}

/// Editor panel state.
#[derive(Clone, Debug, PartialEq)]
pub enum FormState<T> {
    /// Editor closed.
    Hidden,
    /// Editor open; `editing` holds the record being changed, or `None` when creating.
    Shown {
        /// Record under edit.
        editing: Option<T>,
    },
}

impl<T> Default for FormState<T> {
    fn default() -> Self {
        Self::Hidden
    }
}

impl<T> FormState<T> {
    /// The header "add" button: opens an empty editor, or closes any open one.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Hidden => Self::Shown { editing: None },
            Self::Shown { .. } => Self::Hidden,
        }
    }

    /// Open the editor on an existing record.
    #[must_use]
    pub const fn edit(record: T) -> Self {
        Self::Shown {
            editing: Some(record),
        }
    }

    /// Whether the editor is visible.
    #[must_use]
    pub const fn is_shown(&self) -> bool {
        matches!(self, Self::Shown { .. })
    }

    /// Record under edit, if updating.
    #[must_use]
    pub const fn editing(&self) -> Option<&T> {
        match self {
            Self::Shown { editing } => editing.as_ref(),
            Self::Hidden => None,
        }
    }
}
