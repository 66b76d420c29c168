//! Authenticated layout: sidebar navigation, language toggle and profile loading.

use gloo::console;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};

use crate::app::{ApiCtx, Route, StoreCtx};
use crate::components::locale_toggle::LocaleToggle;
use crate::core::guard::{ProfileOutcome, on_profile_failure};
use crate::core::store::StoreAction;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

#[derive(Properties, PartialEq)]
pub(crate) struct ShellProps {
    pub(crate) children: Children,
    pub(crate) active: Route,
}

#[function_component(AppShell)]
pub(crate) fn app_shell(props: &ShellProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let store = use_context::<StoreCtx>();
    let has_user = store
        .as_ref()
        .is_some_and(|store| store.session.user.is_some());

    {
        let api_ctx = api_ctx.clone();
        let store = store.clone();
        let navigator = navigator.clone();
        use_effect_with_deps(
            move |has_user| {
                if let (false, Some(api_ctx), Some(store)) = (*has_user, api_ctx, store) {
                    spawn_local(async move {
                        match api_ctx.client.current_user().await {
                            Ok(user) => store.dispatch(StoreAction::ProfileLoaded(user)),
                            Err(err) => {
                                console::error!("profile load failed", err.to_string());
                                let outcome =
                                    on_profile_failure(api_ctx.client.tokens().as_ref(), &err);
                                if outcome == ProfileOutcome::RedirectToLogin
                                    && let Some(navigator) = navigator
                                {
                                    navigator.push(&Route::Login);
                                }
                            }
                        }
                    });
                }
                || ()
            },
            has_user,
        );
    }

    let on_logout = Callback::from(move |_: MouseEvent| {
        let Some(api_ctx) = api_ctx.clone() else {
            return;
        };
        let store = store.clone();
        let navigator = navigator.clone();
        spawn_local(async move {
            if let Err(err) = api_ctx.client.logout().await {
                console::warn!("server-side logout failed", err.to_string());
            }
            api_ctx.client.tokens().remove();
            if let Some(store) = store {
                store.dispatch(StoreAction::SignedOut);
            }
            if let Some(navigator) = navigator {
                navigator.push(&Route::Login);
            }
        });
    });

    let nav = [
        (Route::Calculator, "🧮", t("sidebar.calculator")),
        (Route::Dashboard, "📊", t("sidebar.dashboard")),
        (Route::Ranges, "📏", t("sidebar.ranges")),
        (Route::Nuts, "🔩", t("sidebar.nuts")),
    ];

    html! {
        <div class="app-shell">
            <aside class="sidebar">
                <div class="brand">
                    <strong>{"Argip"}</strong>
                    <span class="muted">{t("sidebar.subtitle")}</span>
                </div>
                <nav>
                    { for nav.into_iter().map(|(route, icon, label)| {
                        let active = route == props.active;
                        html! {
                            <Link<Route> to={route} classes={classes!("nav-item", active.then_some("active"))}>
                                <span class="icon">{icon}</span>
                                <span>{label}</span>
                            </Link<Route>>
                        }
                    }) }
                </nav>
                <div class="sidebar-footer">
                    <button class="danger" onclick={on_logout}>
                        <span class="icon">{"🚪"}</span>
                        <span>{t("sidebar.logout")}</span>
                    </button>
                </div>
            </aside>
            <main class="content">
                <div class="toolbar">
                    <LocaleToggle />
                </div>
                if has_user {
                    { for props.children.iter() }
                } else {
                    <div class="centered">
                        <div class="spinner" />
                        <p class="muted">{t("loading")}</p>
                    </div>
                }
            </main>
        </div>
    }
}
