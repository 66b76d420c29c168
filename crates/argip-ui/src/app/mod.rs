//! Application root: contexts, router and route table.

use std::rc::Rc;

use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::guard::Protected;
use crate::components::not_found::NotFoundPage;
use crate::components::shell::AppShell;
use crate::features::auth::view::{LoginPage, RegisterPage};
use crate::features::calculator::view::CalculatorPage;
use crate::features::dashboard::view::DashboardHome;
use crate::features::nuts::view::NutsPage;
use crate::features::ranges::view::RangesPage;
use crate::core::store::AppStore;
use crate::i18n::{LocaleCode, TranslationBundle};
use crate::services::storage::{LocalTokenStore, load_locale, persist_locale};

pub(crate) use api::ApiCtx;
pub(crate) use routes::Route;

mod api;
mod routes;

const DEFAULT_API_URL: &str = "http://localhost:8000";

fn api_base_url() -> &'static str {
    option_env!("ARGIP_API_URL").unwrap_or(DEFAULT_API_URL)
}

/// Shared handle to the app-wide store.
pub(crate) type StoreCtx = UseReducerHandle<AppStore>;

/// Active locale plus the setter used by the language toggle.
#[derive(Clone, PartialEq)]
pub(crate) struct LocaleCtx {
    pub(crate) current: LocaleCode,
    pub(crate) set: Callback<LocaleCode>,
}

#[function_component(ArgipApp)]
fn argip_app() -> Html {
    let locale = use_state(load_locale);
    let store = use_reducer(AppStore::default);
    let api_ctx = use_memo(
        |_| ApiCtx::new(api_base_url(), Rc::new(LocalTokenStore)),
        (),
    );
    let bundle = {
        let locale = *locale;
        use_memo(move |_| TranslationBundle::new(locale), locale)
    };
    let locale_ctx = {
        let state = locale.clone();
        LocaleCtx {
            current: *locale,
            set: Callback::from(move |next: LocaleCode| {
                persist_locale(next);
                state.set(next);
            }),
        }
    };

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
                <ContextProvider<LocaleCtx> context={locale_ctx}>
                    <ContextProvider<StoreCtx> context={store}>
                        <BrowserRouter>
                            <Switch<Route> render={switch} />
                        </BrowserRouter>
                    </ContextProvider<StoreCtx>>
                </ContextProvider<LocaleCtx>>
            </ContextProvider<TranslationBundle>>
        </ContextProvider<ApiCtx>>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Redirect<Route> to={Route::Login} /> },
        Route::Login => html! { <LoginPage /> },
        Route::Register => html! { <RegisterPage /> },
        Route::Dashboard => protected(route, html! { <DashboardHome /> }),
        Route::Ranges => protected(route, html! { <RangesPage /> }),
        Route::Nuts => protected(route, html! { <NutsPage /> }),
        Route::Calculator => protected(route, html! { <CalculatorPage /> }),
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

fn protected(active: Route, page: Html) -> Html {
    html! {
        <Protected>
            <AppShell {active}>
                {page}
            </AppShell>
        </Protected>
    }
}

/// Mount the application into `#root`, or the document body when absent.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<ArgipApp>::with_root(root).render();
    } else {
        yew::Renderer::<ArgipApp>::new().render();
    }
}
