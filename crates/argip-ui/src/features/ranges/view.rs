//! Ranges page.
//!
//! # Design
//! - The list re-fetches by bumping a revision counter; nothing is patched in place.
//! - Editing loads the stored record first so the form never starts from a stale row.

use argip_api_models::Range;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::use_navigator;

use crate::app::ApiCtx;
use crate::components::alert::Alert;
use crate::components::form::bind_input;
use crate::core::confirm::gate_delete;
use crate::core::view_state::{FormState, ListState};
use crate::features::ranges::state::{RangeDraft, RangePayload};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::services::storage::BrowserConfirm;

#[function_component(RangesPage)]
pub(crate) fn ranges_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let list = use_state(ListState::<Range>::default);
    let form = use_state(FormState::<Range>::default);
    let draft = use_state(RangeDraft::default);
    let banner = use_state(|| None as Option<String>);
    let revision = use_state(|| 0_u32);

    {
        let api_ctx = api_ctx.clone();
        let navigator = navigator.clone();
        let bundle = bundle.clone();
        let list = list.clone();
        let banner = banner.clone();
        use_effect_with_deps(
            move |_| {
                let Some(api_ctx) = api_ctx else {
                    return || ();
                };
                if !list.is_loaded() {
                    list.set(ListState::Loading);
                }
                spawn_local(async move {
                    match api_ctx.client.list_ranges().await {
                        Ok(rows) => list.set(ListState::Loaded(rows)),
                        Err(err) => {
                            if !api_ctx.session_ended("list ranges", &err, navigator.as_ref()) {
                                let (next, notice) = (*list)
                                    .clone()
                                    .after_failure(bundle.text("ranges.errorFetch", ""));
                                list.set(next);
                                if notice.is_some() {
                                    banner.set(notice);
                                }
                            }
                        }
                    }
                });
                || ()
            },
            *revision,
        );
    }

    let Some(api_ctx) = api_ctx else {
        return html! {
            <div class="panel">
                <p class="error-text">{"Missing API context."}</p>
            </div>
        };
    };

    let on_toggle = {
        let form = form.clone();
        let draft = draft.clone();
        let banner = banner.clone();
        Callback::from(move |_: MouseEvent| {
            form.set((*form).clone().toggled());
            draft.set(RangeDraft::default());
            banner.set(None);
        })
    };

    let on_edit = {
        let api_ctx = api_ctx.clone();
        let navigator = navigator.clone();
        let bundle = bundle.clone();
        let form = form.clone();
        let draft = draft.clone();
        let banner = banner.clone();
        Callback::from(move |id: i64| {
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            let bundle = bundle.clone();
            let form = form.clone();
            let draft = draft.clone();
            let banner = banner.clone();
            spawn_local(async move {
                match api_ctx.client.get_range(id).await {
                    Ok(range) => {
                        draft.set(RangeDraft::from_range(&range));
                        form.set(FormState::edit(range));
                        banner.set(None);
                    }
                    Err(err) => {
                        if !api_ctx.session_ended("load range", &err, navigator.as_ref()) {
                            banner.set(Some(err.message(&bundle, "ranges.errorFetch")));
                        }
                    }
                }
            });
        })
    };

    let on_submit = {
        let api_ctx = api_ctx.clone();
        let navigator = navigator.clone();
        let bundle = bundle.clone();
        let form = form.clone();
        let draft = draft.clone();
        let banner = banner.clone();
        let revision = revision.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let editing = form.editing().map(|range| range.id);
            let payload = match draft.to_payload(editing) {
                Ok(payload) => payload,
                Err(err) => {
                    banner.set(Some(bundle.validation(&err)));
                    return;
                }
            };
            banner.set(None);
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            let bundle = bundle.clone();
            let form = form.clone();
            let draft = draft.clone();
            let banner = banner.clone();
            let revision = revision.clone();
            spawn_local(async move {
                let saved = match payload {
                    RangePayload::Create(create) => api_ctx.client.create_range(&create).await,
                    RangePayload::Update(id, update) => {
                        api_ctx.client.update_range(id, &update).await
                    }
                };
                match saved {
                    Ok(_) => {
                        form.set(FormState::Hidden);
                        draft.set(RangeDraft::default());
                        revision.set(*revision + 1);
                    }
                    Err(err) => {
                        if !api_ctx.session_ended("save range", &err, navigator.as_ref()) {
                            banner.set(Some(err.message(&bundle, "ranges.errorSave")));
                        }
                    }
                }
            });
        })
    };

    let on_delete = {
        let bundle = bundle.clone();
        let banner = banner.clone();
        Callback::from(move |id: i64| {
            let question = bundle.text("ranges.confirmDelete", "");
            let Some(id) = gate_delete(&BrowserConfirm, &question, id) else {
                return;
            };
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            let bundle = bundle.clone();
            let banner = banner.clone();
            let revision = revision.clone();
            spawn_local(async move {
                match api_ctx.client.delete_range(id).await {
                    Ok(()) => {
                        banner.set(None);
                        revision.set(*revision + 1);
                    }
                    Err(err) => {
                        if !api_ctx.session_ended("delete range", &err, navigator.as_ref()) {
                            banner.set(Some(err.message(&bundle, "ranges.errorDelete")));
                        }
                    }
                }
            });
        })
    };

    let editor = if form.is_shown() {
        let editing = form.editing().is_some();
        html! {
            <section class="card">
                <h2>{ if editing { t("ranges.edit") } else { t("ranges.addNew") } }</h2>
                <form class="stack" onsubmit={on_submit}>
                    <label class="stack">
                        <span>{t("ranges.name")}</span>
                        <input
                            type="text"
                            value={draft.nazwa.clone()}
                            oninput={bind_input(&draft, |draft, value| draft.nazwa = value)}
                        />
                    </label>
                    <div class="row">
                        <label class="stack">
                            <span>{t("ranges.from")}</span>
                            <input
                                type="number"
                                step="any"
                                value={draft.od.clone()}
                                oninput={bind_input(&draft, |draft, value| draft.od = value)}
                            />
                        </label>
                        <label class="stack">
                            <span>{t("ranges.to")}</span>
                            <input
                                type="number"
                                step="any"
                                value={draft.do_.clone()}
                                oninput={bind_input(&draft, |draft, value| draft.do_ = value)}
                            />
                        </label>
                    </div>
                    <div class="actions">
                        <button class="solid" type="submit">
                            { if editing { t("ranges.update") } else { t("ranges.create") } }
                        </button>
                        <button class="ghost" type="button" onclick={on_toggle.clone()}>
                            {t("ranges.cancel")}
                        </button>
                    </div>
                </form>
            </section>
        }
    } else {
        html! {}
    };

    let body = match &*list {
        ListState::Loading => html! { <p class="muted">{t("ranges.loading")}</p> },
        ListState::Error(message) => html! { <p class="error-text">{message.clone()}</p> },
        ListState::Loaded(rows) if rows.is_empty() => {
            html! { <p class="muted">{t("ranges.empty")}</p> }
        }
        ListState::Loaded(rows) => html! {
            <table class="table">
                <thead>
                    <tr>
                        <th>{t("ranges.name")}</th>
                        <th>{t("ranges.from")}</th>
                        <th>{t("ranges.to")}</th>
                        <th>{t("ranges.actions")}</th>
                    </tr>
                </thead>
                <tbody>
                    { for rows.iter().map(|range| {
                        let id = range.id;
                        let on_edit = on_edit.clone();
                        let on_delete = on_delete.clone();
                        html! {
                            <tr key={id}>
                                <td>{range.nazwa.clone()}</td>
                                <td>{range.od.to_string()}</td>
                                <td>{range.do_.to_string()}</td>
                                <td class="actions">
                                    <button class="ghost" onclick={Callback::from(move |_| on_edit.emit(id))}>
                                        {t("ranges.edit")}
                                    </button>
                                    <button class="danger" onclick={Callback::from(move |_| on_delete.emit(id))}>
                                        {t("ranges.delete")}
                                    </button>
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        },
    };

    html! {
        <div class="page">
            <header class="page-header">
                <h1>{t("ranges.title")}</h1>
                <button class="solid" onclick={on_toggle}>
                    { if form.is_shown() { t("ranges.cancel") } else { t("ranges.addNew") } }
                </button>
            </header>
            <Alert message={(*banner).clone()} />
            {editor}
            <section class="card">
                <h2>{t("ranges.list")}</h2>
                {body}
            </section>
        </div>
    }
}
