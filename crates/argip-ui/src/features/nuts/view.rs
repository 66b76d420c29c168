//! Nuts page with the range filter.

use argip_api_models::{Nut, Range};
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::use_navigator;

use crate::app::ApiCtx;
use crate::components::alert::Alert;
use crate::components::form::{bind_input, on_select};
use crate::core::confirm::gate_delete;
use crate::core::view_state::{FormState, ListState};
use crate::features::nuts::state::{
    NutDraft, NutPayload, filter_value, nut_rows, parse_filter,
};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::services::storage::BrowserConfirm;

#[function_component(NutsPage)]
pub(crate) fn nuts_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let ranges = use_state(ListState::<Range>::default);
    let list = use_state(ListState::<Nut>::default);
    let form = use_state(FormState::<Nut>::default);
    let draft = use_state(NutDraft::default);
    let filter = use_state(|| None as Option<i64>);
    let banner = use_state(|| None as Option<String>);
    let revision = use_state(|| 0_u32);

    {
        let api_ctx = api_ctx.clone();
        let navigator = navigator.clone();
        let ranges = ranges.clone();
        use_effect_with_deps(
            move |()| {
                if let Some(api_ctx) = api_ctx {
                    spawn_local(async move {
                        match api_ctx.client.list_ranges().await {
                            Ok(rows) => ranges.set(ListState::Loaded(rows)),
                            Err(err) => {
                                if !api_ctx.session_ended("list ranges", &err, navigator.as_ref()) {
                                    ranges.set(ListState::Loaded(Vec::new()));
                                }
                            }
                        }
                    });
                }
                || ()
            },
            (),
        );
    }

    {
        let api_ctx = api_ctx.clone();
        let navigator = navigator.clone();
        let bundle = bundle.clone();
        let list = list.clone();
        let banner = banner.clone();
        use_effect_with_deps(
            move |(filter, _)| {
                let filter = *filter;
                if let Some(api_ctx) = api_ctx {
                    if !list.is_loaded() {
                        list.set(ListState::Loading);
                    }
                    spawn_local(async move {
                        match api_ctx.client.list_nuts(filter).await {
                            Ok(rows) => list.set(ListState::Loaded(rows)),
                            Err(err) => {
                                if !api_ctx.session_ended("list nuts", &err, navigator.as_ref()) {
                                    let (next, notice) = (*list)
                                        .clone()
                                        .after_failure(bundle.text("nuts.errorFetch", ""));
                                    list.set(next);
                                    if notice.is_some() {
                                        banner.set(notice);
                                    }
                                }
                            }
                        }
                    });
                }
                || ()
            },
            (*filter, *revision),
        );
    }

    let Some(api_ctx) = api_ctx else {
        return html! {
            <div class="panel">
                <p class="error-text">{"Missing API context."}</p>
            </div>
        };
    };

    let on_filter = {
        let filter = filter.clone();
        let list = list.clone();
        on_select(Callback::from(move |value: String| {
            let next = parse_filter(&value);
            if next != *filter {
                list.set(ListState::Loading);
                filter.set(next);
            }
        }))
    };

    let on_range_pick = {
        let draft = draft.clone();
        on_select(Callback::from(move |value: String| {
            let mut next = (*draft).clone();
            next.id_zakresu = value;
            draft.set(next);
        }))
    };

    let on_toggle = {
        let form = form.clone();
        let draft = draft.clone();
        let banner = banner.clone();
        Callback::from(move |_: MouseEvent| {
            form.set((*form).clone().toggled());
            draft.set(NutDraft::default());
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
                match api_ctx.client.get_nut(id).await {
                    Ok(nut) => {
                        draft.set(NutDraft::from_nut(&nut));
                        form.set(FormState::edit(nut));
                        banner.set(None);
                    }
                    Err(err) => {
                        if !api_ctx.session_ended("load nut", &err, navigator.as_ref()) {
                            banner.set(Some(err.message(&bundle, "nuts.errorFetch")));
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
            let editing = form.editing().map(|nut| nut.id);
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
                    NutPayload::Create(create) => api_ctx.client.create_nut(&create).await,
                    NutPayload::Update(id, update) => api_ctx.client.update_nut(id, &update).await,
                };
                match saved {
                    Ok(_) => {
                        form.set(FormState::Hidden);
                        draft.set(NutDraft::default());
                        revision.set(*revision + 1);
                    }
                    Err(err) => {
                        if !api_ctx.session_ended("save nut", &err, navigator.as_ref()) {
                            banner.set(Some(err.message(&bundle, "nuts.errorSave")));
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
            let question = bundle.text("nuts.confirmDelete", "");
            let Some(id) = gate_delete(&BrowserConfirm, &question, id) else {
                return;
            };
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            let bundle = bundle.clone();
            let banner = banner.clone();
            let revision = revision.clone();
            spawn_local(async move {
                match api_ctx.client.delete_nut(id).await {
                    Ok(()) => {
                        banner.set(None);
                        revision.set(*revision + 1);
                    }
                    Err(err) => {
                        if !api_ctx.session_ended("delete nut", &err, navigator.as_ref()) {
                            banner.set(Some(err.message(&bundle, "nuts.errorDelete")));
                        }
                    }
                }
            });
        })
    };

    let range_options = ranges.items();
    let current_filter = filter_value(*filter);

    let editor = if form.is_shown() {
        let editing = form.editing().is_some();
        html! {
            <section class="card">
                <h2>{ if editing { t("nuts.edit") } else { t("nuts.addNew") } }</h2>
                <form class="stack" onsubmit={on_submit}>
                    <label class="stack">
                        <span>{t("nuts.range")}</span>
                        <select onchange={on_range_pick}>
                            <option value="" selected={draft.id_zakresu.is_empty()}>
                                {t("nuts.selectRange")}
                            </option>
                            { for range_options.iter().map(|range| {
                                let value = range.id.to_string();
                                let selected = draft.id_zakresu == value;
                                html! {
                                    <option key={range.id} {value} {selected}>
                                        {range.nazwa.clone()}
                                    </option>
                                }
                            }) }
                        </select>
                    </label>
                    <label class="stack">
                        <span>{t("nuts.name")}</span>
                        <input
                            type="text"
                            value={draft.nazwa.clone()}
                            oninput={bind_input(&draft, |draft, value| draft.nazwa = value)}
                        />
                    </label>
                    <div class="row">
                        <label class="stack">
                            <span>{t("nuts.diameter")}</span>
                            <input
                                type="number"
                                step="any"
                                value={draft.srednica.clone()}
                                oninput={bind_input(&draft, |draft, value| draft.srednica = value)}
                            />
                        </label>
                        <label class="stack">
                            <span>{t("nuts.price")}</span>
                            <input
                                type="number"
                                step="0.01"
                                value={draft.cena.clone()}
                                oninput={bind_input(&draft, |draft, value| draft.cena = value)}
                            />
                        </label>
                    </div>
                    <div class="actions">
                        <button class="solid" type="submit">
                            { if editing { t("nuts.update") } else { t("nuts.create") } }
                        </button>
                        <button class="ghost" type="button" onclick={on_toggle.clone()}>
                            {t("nuts.cancel")}
                        </button>
                    </div>
                </form>
            </section>
        }
    } else {
        html! {}
    };

    let body = match &*list {
        ListState::Loading => html! { <p class="muted">{t("nuts.loading")}</p> },
        ListState::Error(message) => html! { <p class="error-text">{message.clone()}</p> },
        ListState::Loaded(rows) if rows.is_empty() => {
            html! { <p class="muted">{t("nuts.empty")}</p> }
        }
        ListState::Loaded(rows) => html! {
            <table class="table">
                <thead>
                    <tr>
                        <th>{t("nuts.range")}</th>
                        <th>{t("nuts.name")}</th>
                        <th>{t("nuts.diameter")}</th>
                        <th>{t("nuts.price")}</th>
                        <th>{t("nuts.actions")}</th>
                    </tr>
                </thead>
                <tbody>
                    { for nut_rows(rows, range_options).into_iter().map(|row| {
                        let id = row.nut.id;
                        let on_edit = on_edit.clone();
                        let on_delete = on_delete.clone();
                        html! {
                            <tr key={id}>
                                <td>{row.range}</td>
                                <td>{row.nut.nazwa}</td>
                                <td>{row.nut.srednica.to_string()}</td>
                                <td>{row.price}</td>
                                <td class="actions">
                                    <button class="ghost" onclick={Callback::from(move |_| on_edit.emit(id))}>
                                        {t("nuts.edit")}
                                    </button>
                                    <button class="danger" onclick={Callback::from(move |_| on_delete.emit(id))}>
                                        {t("nuts.delete")}
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
                <h1>{t("nuts.title")}</h1>
                <button class="solid" onclick={on_toggle}>
                    { if form.is_shown() { t("nuts.cancel") } else { t("nuts.addNew") } }
                </button>
            </header>
            <Alert message={(*banner).clone()} />
            <section class="card">
                <label class="row">
                    <span>{t("nuts.filterByRange")}</span>
                    <select onchange={on_filter}>
                        <option value="" selected={current_filter.is_empty()}>
                            {t("nuts.allRanges")}
                        </option>
                        { for range_options.iter().map(|range| {
                            let value = range.id.to_string();
                            let selected = current_filter == value;
                            html! {
                                <option key={range.id} {value} {selected}>
                                    {range.nazwa.clone()}
                                </option>
                            }
                        }) }
                    </select>
                </label>
            </section>
            {editor}
            <section class="card">
                <h2>{t("nuts.list")}</h2>
                {body}
            </section>
        </div>
    }
}
