//! Profile summary rendered from the store loaded by the shell.

use yew::prelude::*;

use crate::app::StoreCtx;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

#[function_component(DashboardHome)]
pub(crate) fn dashboard_home() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let user = use_context::<StoreCtx>().and_then(|store| store.session.user.clone());

    let profile = user.map_or_else(
        || html! {},
        |user| {
            html! {
                <section class="panel">
                    <h2>{t("dashboard.userInfo")}</h2>
                    <dl class="facts">
                        <dt>{t("dashboard.userId")}</dt>
                        <dd>{user.id.to_string()}</dd>
                        <dt>{t("dashboard.username")}</dt>
                        <dd><strong>{user.username}</strong></dd>
                        <dt>{t("dashboard.email")}</dt>
                        <dd>{user.email}</dd>
                    </dl>
                </section>
            }
        },
    );

    html! {
        <div class="page">
            <div class="card">
                <h1>{t("dashboard.title")}</h1>
                <p class="muted">{t("dashboard.subtitle")}</p>
                {profile}
                <section class="panel success">
                    <h3>{t("dashboard.authSuccess")}</h3>
                    <p>{t("dashboard.authSuccessDesc")}</p>
                </section>
                <section class="panel">
                    <h3>{t("dashboard.appFeatures")}</h3>
                    <ul class="checklist">
                        <li>{t("dashboard.featureRanges")}</li>
                        <li>{t("dashboard.featureNuts")}</li>
                        <li>{t("dashboard.featureCalculator")}</li>
                    </ul>
                </section>
            </div>
        </div>
    }
}
