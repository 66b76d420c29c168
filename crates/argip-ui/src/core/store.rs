//! App-wide store, shared through a yew context.
//!
//! # Design
//! - Only state shared across routes lives here: the signed-in profile and a one-shot notice.
//! - View-local lists and forms stay in component state.
//! - Changes go through [`StoreAction`] so every transition is testable without a DOM.

use std::rc::Rc;

use argip_api_models::User;
use yew::Reducible;

/// Global application store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppStore {
    /// Session-scoped data.
    pub session: SessionSlice,
}

/// Data tied to the current browser session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSlice {
    /// Profile loaded by the dashboard shell.
    pub user: Option<User>,
    /// Message shown once on the next login screen (e.g. after registering).
    pub notice: Option<String>,
}

impl SessionSlice {
    /// Queue a notice for the login screen.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Consume the pending notice.
    pub const fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Forget everything tied to the ended session.
    pub fn clear(&mut self) {
        self.user = None;
    }
}

/// Transitions of [`AppStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreAction {
    /// The shell loaded the signed-in profile.
    ProfileLoaded(User),
    /// The user logged out or the session ended.
    SignedOut,
    /// Queue a notice for the login screen.
    Notice(String),
    /// The login screen displayed the pending notice.
    NoticeShown,
}

impl Reducible for AppStore {
    type Action = StoreAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            StoreAction::ProfileLoaded(user) => next.session.user = Some(user),
            StoreAction::SignedOut => next.session.clear(),
            StoreAction::Notice(message) => next.session.set_notice(message),
            StoreAction::NoticeShown => {
                next.session.take_notice();
            }
        }
        if next == *self { self } else { Rc::new(next) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan() -> User {
        User {
            id: 1,
            username: "jan".to_string(),
            email: "jan@example.pl".to_string(),
        }
    }

    #[test]
    fn notice_is_shown_once() {
        let mut session = SessionSlice::default();
        session.set_notice("Account created");
        assert_eq!(session.take_notice().as_deref(), Some("Account created"));
        assert_eq!(session.take_notice(), None);
    }

    #[test]
    fn clearing_drops_the_profile() {
        let mut session = SessionSlice {
            user: Some(jan()),
            notice: None,
        };
        session.clear();
        assert_eq!(session.user, None);
    }

    #[test]
    fn actions_drive_the_session() {
        let store = Rc::new(AppStore::default());
        let store = store.reduce(StoreAction::Notice("Account created".to_string()));
        assert_eq!(store.session.notice.as_deref(), Some("Account created"));
        let store = store.reduce(StoreAction::NoticeShown);
        assert_eq!(store.session.notice, None);

        let store = store.reduce(StoreAction::ProfileLoaded(jan()));
        assert_eq!(store.session.user, Some(jan()));
        let store = store.reduce(StoreAction::SignedOut);
        assert_eq!(*store, AppStore::default());
    }

    #[test]
    fn no_op_actions_keep_the_same_store() {
        let store = Rc::new(AppStore::default());
        let same = Rc::clone(&store).reduce(StoreAction::SignedOut);
        assert!(Rc::ptr_eq(&store, &same));
    }
}
