//! `LocalStorage`-backed persistence.

use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;
use serde::Serialize;

use crate::core::confirm::Confirmer;
use crate::core::session::TokenStore;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode};

pub(crate) const TOKEN_KEY: &str = "argip.token";
pub(crate) const LOCALE_KEY: &str = "argip.locale";

/// Token store persisted across reloads in the browser.
pub(crate) struct LocalTokenStore;

impl TokenStore for LocalTokenStore {
    fn set(&self, token: &str) {
        set_storage(TOKEN_KEY, token);
    }

    fn get(&self) -> Option<String> {
        let value = LocalStorage::get::<String>(TOKEN_KEY).ok()?;
        if value.trim().is_empty() {
            return None;
        }
        Some(value)
    }

    fn remove(&self) {
        LocalStorage::delete(TOKEN_KEY);
    }
}

/// Native `window.confirm` dialog.
pub(crate) struct BrowserConfirm;

impl Confirmer for BrowserConfirm {
    fn confirm(&self, question: &str) -> bool {
        gloo::dialogs::confirm(question)
    }
}

pub(crate) fn load_locale() -> LocaleCode {
    if let Ok(value) = LocalStorage::get::<String>(LOCALE_KEY)
        && let Some(locale) = LocaleCode::from_lang_tag(&value)
    {
        return locale;
    }
    window()
        .navigator()
        .language()
        .and_then(|tag| LocaleCode::from_lang_tag(&tag))
        .unwrap_or(DEFAULT_LOCALE)
}

pub(crate) fn persist_locale(locale: LocaleCode) {
    set_storage(LOCALE_KEY, locale.code());
}

fn set_storage<T: Serialize>(key: &'static str, value: T) {
    if let Err(err) = LocalStorage::set(key, value) {
        console::error!("storage operation failed", key, err.to_string());
    }
}
