//! Lightweight JSON-backed translations with per-locale bundles.

use std::sync::LazyLock;

use argip_api_models::validation::ValidationError;
use serde::Deserialize;
use serde_json::Value;

/// Locales shipped with the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    /// English.
    En,
    /// Polish.
    Pl,
}

impl LocaleCode {
    /// All supported locales in toggle order.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::En, Self::Pl]
    }

    /// Two-letter language code, also used as the persisted preference value.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Pl => "pl",
        }
    }

    /// Short label for the language toggle.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Pl => "PL",
        }
    }

    /// Map an arbitrary browser language tag (`pl-PL`, `en_GB`) to a supported locale.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let lowered = tag.trim().to_ascii_lowercase();
        let base = lowered.split(['-', '_']).next().unwrap_or_default();
        Self::all()
            .iter()
            .copied()
            .find(|locale| locale.code() == base)
    }
}

/// Default locale when neither a stored preference nor the browser language matches.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::En;

/// Translation bundle containing a parsed JSON tree for the locale.
#[derive(Clone, Debug)]
pub struct TranslationBundle {
    /// Locale backing this bundle.
    pub locale: LocaleCode,
    tree: Value,
}

impl PartialEq for TranslationBundle {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
    }
}

impl TranslationBundle {
    /// Build a translation bundle for the given locale.
    ///
    /// Missing keys degrade to the English table and then to the caller default.
    #[must_use]
    pub fn new(locale: LocaleCode) -> Self {
        let tree: Value = serde_json::from_str(raw_locale(locale)).unwrap_or(Value::Null);
        Self { locale, tree }
    }

    /// Resolve a dotted path (`section.key`) with English fallback and caller default.
    #[must_use]
    pub fn text(&self, path: &str, default: &str) -> String {
        resolve(&self.tree, path)
            .or_else(|| resolve(&EN_FALLBACK.tree, path))
            .unwrap_or_else(|| default.to_string())
    }

    /// Localized message for a client-side validation failure.
    #[must_use]
    pub fn validation(&self, err: &ValidationError) -> String {
        let field = self.text(&format!("fields.{}", err.field()), err.field());
        match err {
            ValidationError::Blank { .. } => self
                .text("validation.blank", "Field '{field}' is required")
                .replace("{field}", &field),
            ValidationError::NotANumber { .. } => self
                .text("validation.notANumber", "Field '{field}' must be a number")
                .replace("{field}", &field),
            ValidationError::NotPositive { .. } => self
                .text(
                    "validation.notPositive",
                    "Field '{field}' must be greater than zero",
                )
                .replace("{field}", &field),
            ValidationError::TooLong { max, .. } => self
                .text(
                    "validation.tooLong",
                    "Field '{field}' must be at most {max} characters long",
                )
                .replace("{field}", &field)
                .replace("{max}", &max.to_string()),
            ValidationError::PriceOutOfRange => self
                .text(
                    "validation.priceOutOfRange",
                    "Price must be between 0.01 and 99999999.99",
                ),
            ValidationError::InvertedBounds => self.text("ranges.errorValidation", &err.to_string()),
            ValidationError::InvalidEmail => self.text("validation.invalidEmail", &err.to_string()),
            ValidationError::PasswordMismatch => {
                self.text("validation.passwordMismatch", &err.to_string())
            }
            ValidationError::PasswordTooShort { min } => self
                .text(
                    "validation.passwordTooShort",
                    "Password must be at least {min} characters long",
                )
                .replace("{min}", &min.to_string()),
        }
    }
}

static EN_FALLBACK: LazyLock<TranslationBundle> =
    LazyLock::new(|| TranslationBundle::new(LocaleCode::En));

fn resolve(tree: &Value, path: &str) -> Option<String> {
    let mut node = tree;
    for segment in path.split('.') {
        node = node.get(segment)?;
    }
    node.as_str().map(ToString::to_string)
}

const fn raw_locale(locale: LocaleCode) -> &'static str {
    match locale {
        LocaleCode::En => include_str!("../../i18n/en.json"),
        LocaleCode::Pl => include_str!("../../i18n/pl.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_falls_back_to_default() {
        let bundle = TranslationBundle::new(LocaleCode::Pl);
        assert_eq!(bundle.text("nonexistent.key", "fallback"), "fallback");
    }

    #[test]
    fn bundles_load_all_locales() {
        for locale in LocaleCode::all() {
            let bundle = TranslationBundle::new(locale);
            assert_eq!(bundle.locale, locale);
            assert!(!bundle.text("sidebar.dashboard", "").is_empty());
        }
        assert_eq!(
            TranslationBundle::new(LocaleCode::Pl).text("sidebar.nuts", ""),
            "Nakrętki"
        );
    }

    #[test]
    fn locale_tables_share_the_same_keys() {
        fn leaves(prefix: &str, value: &Value, out: &mut Vec<String>) {
            if let Value::Object(map) = value {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    leaves(&path, child, out);
                }
            } else {
                out.push(prefix.to_string());
            }
        }

        let mut en = Vec::new();
        leaves("", &TranslationBundle::new(LocaleCode::En).tree, &mut en);
        let mut pl = Vec::new();
        leaves("", &TranslationBundle::new(LocaleCode::Pl).tree, &mut pl);
        en.sort();
        pl.sort();
        assert!(!en.is_empty());
        assert_eq!(en, pl);
    }

    #[test]
    fn lang_tags_map_to_base_language() {
        assert_eq!(LocaleCode::from_lang_tag("pl-PL"), Some(LocaleCode::Pl));
        assert_eq!(LocaleCode::from_lang_tag("EN_gb"), Some(LocaleCode::En));
        assert_eq!(LocaleCode::from_lang_tag("de"), None);
    }

    #[test]
    fn validation_messages_are_localized() {
        let pl = TranslationBundle::new(LocaleCode::Pl);
        assert_eq!(
            pl.validation(&ValidationError::NotPositive { field: "cena" }),
            "Pole 'Cena' musi być większe od zera"
        );
        let en = TranslationBundle::new(LocaleCode::En);
        assert_eq!(
            en.validation(&ValidationError::PasswordTooShort { min: 6 }),
            "Password must be at least 6 characters long"
        );
        assert_eq!(
            en.validation(&ValidationError::InvertedBounds),
            "'From' must be less than 'To'"
        );
    }

    #[test]
    fn length_and_price_limits_are_localized() {
        let pl = TranslationBundle::new(LocaleCode::Pl);
        assert_eq!(
            pl.validation(&ValidationError::TooLong {
                field: "nazwa",
                max: 100
            }),
            "Pole 'Nazwa' może mieć co najwyżej 100 znaków"
        );
        let en = TranslationBundle::new(LocaleCode::En);
        assert_eq!(
            en.validation(&ValidationError::PriceOutOfRange),
            "Price must be between 0.01 and 99999999.99"
        );
    }
}
