//! Login and registration pages.

use gloo::console;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};

use crate::app::{ApiCtx, Route, StoreCtx};
use crate::components::alert::Alert;
use crate::components::form::bind_input;
use crate::components::locale_toggle::LocaleToggle;
use crate::core::store::StoreAction;
use crate::features::auth::state::{LoginDraft, RegisterDraft};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

#[function_component(LoginPage)]
pub(crate) fn login_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let store = use_context::<StoreCtx>();
    let draft = use_state(LoginDraft::default);
    let error = use_state(|| None as Option<String>);
    let notice = use_state(|| None as Option<String>);
    let busy = use_state(|| false);

    {
        let notice = notice.clone();
        let store = store.clone();
        use_effect_with_deps(
            move |()| {
                if let Some(store) = store {
                    notice.set(store.session.notice.clone());
                    store.dispatch(StoreAction::NoticeShown);
                }
                || ()
            },
            (),
        );
    }

    let on_submit = {
        let bundle = bundle.clone();
        let draft = draft.clone();
        let error = error.clone();
        let busy = busy.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(api_ctx) = api_ctx.clone() else {
                return;
            };
            let request = match draft.to_request() {
                Ok(request) => request,
                Err(err) => {
                    error.set(Some(bundle.validation(&err)));
                    return;
                }
            };
            error.set(None);
            busy.set(true);
            let bundle = bundle.clone();
            let navigator = navigator.clone();
            let store = store.clone();
            let error = error.clone();
            let busy = busy.clone();
            spawn_local(async move {
                match api_ctx.client.login(&request).await {
                    Ok(token) => {
                        api_ctx.client.tokens().set(&token);
                        if let Some(store) = store {
                            store.dispatch(StoreAction::SignedOut);
                        }
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(err) => {
                        console::warn!("login failed", err.to_string());
                        error.set(Some(err.message(&bundle, "login.errorInvalid")));
                    }
                }
                busy.set(false);
            });
        })
    };

    html! {
        <div class="auth-page">
            <div class="toolbar"><LocaleToggle /></div>
            <div class="card">
                <header>
                    <h1>{t("login.title")}</h1>
                    <p class="muted">{t("login.subtitle")}</p>
                </header>
                <Alert message={(*notice).clone()} success={true} />
                <Alert message={(*error).clone()} />
                <form class="stack" onsubmit={on_submit}>
                    <label class="stack">
                        <span>{t("login.username")}</span>
                        <input
                            type="text"
                            autocomplete="username"
                            placeholder={t("login.usernamePlaceholder")}
                            value={draft.username.clone()}
                            oninput={bind_input(&draft, |draft, value| draft.username = value)}
                        />
                    </label>
                    <label class="stack">
                        <span>{t("login.password")}</span>
                        <input
                            type="password"
                            autocomplete="current-password"
                            placeholder={t("login.passwordPlaceholder")}
                            value={draft.password.clone()}
                            oninput={bind_input(&draft, |draft, value| draft.password = value)}
                        />
                    </label>
                    <button class="solid" type="submit" disabled={*busy}>
                        { if *busy { t("login.buttonLoading") } else { t("login.button") } }
                    </button>
                </form>
                <p class="muted">
                    {t("login.noAccount")}{" "}
                    <Link<Route> to={Route::Register}>{t("login.signUp")}</Link<Route>>
                </p>
            </div>
        </div>
    }
}

#[function_component(RegisterPage)]
pub(crate) fn register_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let store = use_context::<StoreCtx>();
    let draft = use_state(RegisterDraft::default);
    let error = use_state(|| None as Option<String>);
    let busy = use_state(|| false);

    let on_submit = {
        let bundle = bundle.clone();
        let draft = draft.clone();
        let error = error.clone();
        let busy = busy.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(api_ctx) = api_ctx.clone() else {
                return;
            };
            let request = match draft.to_request() {
                Ok(request) => request,
                Err(err) => {
                    error.set(Some(bundle.validation(&err)));
                    return;
                }
            };
            error.set(None);
            busy.set(true);
            let bundle = bundle.clone();
            let navigator = navigator.clone();
            let store = store.clone();
            let error = error.clone();
            let busy = busy.clone();
            spawn_local(async move {
                match api_ctx.client.register(&request).await {
                    Ok(_) => {
                        let message = bundle.text("register.successMessage", "");
                        if let Some(store) = store {
                            store.dispatch(StoreAction::Notice(message));
                        }
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Login);
                        }
                    }
                    Err(err) => {
                        console::warn!("registration failed", err.to_string());
                        error.set(Some(err.message(&bundle, "register.errorGeneric")));
                    }
                }
                busy.set(false);
            });
        })
    };

    html! {
        <div class="auth-page">
            <div class="toolbar"><LocaleToggle /></div>
            <div class="card">
                <header>
                    <h1>{t("register.title")}</h1>
                    <p class="muted">{t("register.subtitle")}</p>
                </header>
                <Alert message={(*error).clone()} />
                <form class="stack" onsubmit={on_submit}>
                    <label class="stack">
                        <span>{t("register.username")}</span>
                        <input
                            type="text"
                            autocomplete="username"
                            placeholder={t("register.usernamePlaceholder")}
                            value={draft.username.clone()}
                            oninput={bind_input(&draft, |draft, value| draft.username = value)}
                        />
                    </label>
                    <label class="stack">
                        <span>{t("register.email")}</span>
                        <input
                            type="email"
                            autocomplete="email"
                            placeholder={t("register.emailPlaceholder")}
                            value={draft.email.clone()}
                            oninput={bind_input(&draft, |draft, value| draft.email = value)}
                        />
                    </label>
                    <label class="stack">
                        <span>{t("register.password")}</span>
                        <input
                            type="password"
                            autocomplete="new-password"
                            placeholder={t("register.passwordPlaceholder")}
                            value={draft.password.clone()}
                            oninput={bind_input(&draft, |draft, value| draft.password = value)}
                        />
                    </label>
                    <label class="stack">
                        <span>{t("register.confirmPassword")}</span>
                        <input
                            type="password"
                            autocomplete="new-password"
                            value={draft.confirm_password.clone()}
                            oninput={bind_input(&draft, |draft, value| draft.confirm_password = value)}
                        />
                    </label>
                    <button class="solid" type="submit" disabled={*busy}>
                        { if *busy { t("register.buttonLoading") } else { t("register.button") } }
                    </button>
                </form>
                <p class="muted">
                    {t("register.hasAccount")}{" "}
                    <Link<Route> to={Route::Login}>{t("register.signIn")}</Link<Route>>
                </p>
            </div>
        </div>
    }
}
