use yew::prelude::*;
use yew_router::prelude::Link;

use crate::app::Route;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

#[function_component(NotFoundPage)]
pub(crate) fn not_found_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    html! {
        <div class="centered">
            <div class="card">
                <h1>{bundle.text("notFound.title", "Page not found")}</h1>
                <p class="muted">{bundle.text("notFound.body", "")}</p>
                <Link<Route> to={Route::Login}>{bundle.text("notFound.back", "Back to login")}</Link<Route>>
            </div>
        </div>
    }
}
