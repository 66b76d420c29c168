//! Screw length calculator: pick a diameter, then a length.

use argip_api_models::ScrewLength;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::use_navigator;

use crate::app::ApiCtx;
use crate::components::alert::Alert;
use crate::components::form::{bind_input, on_select};
use crate::core::confirm::gate_delete;
use crate::core::view_state::ListState;
use crate::features::calculator::state::{
    CalculatorSelection, ScrewDraft, SelectionAction, diameter_value, diameters,
    draft_error_key, parse_diameter_choice,
};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::services::storage::BrowserConfirm;

#[function_component(CalculatorPage)]
pub(crate) fn calculator_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let list = use_state(ListState::<ScrewLength>::default);
    let selection = use_reducer(CalculatorSelection::default);
    let show_form = use_state(|| false);
    let draft = use_state(ScrewDraft::default);
    let banner = use_state(|| None as Option<String>);
    let revision = use_state(|| 0_u32);

    {
        let api_ctx = api_ctx.clone();
        let navigator = navigator.clone();
        let bundle = bundle.clone();
        let list = list.clone();
        let selection = selection.clone();
        let banner = banner.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(api_ctx) = api_ctx {
                    if !list.is_loaded() {
                        list.set(ListState::Loading);
                    }
                    spawn_local(async move {
                        match api_ctx.client.list_screw_lengths().await {
                            Ok(rows) => {
                                selection.dispatch(SelectionAction::Reconcile(rows.clone()));
                                list.set(ListState::Loaded(rows));
                            }
                            Err(err) => {
                                if !api_ctx.session_ended(
                                    "list screw lengths",
                                    &err,
                                    navigator.as_ref(),
                                ) {
                                    let (next, notice) = (*list)
                                        .clone()
                                        .after_failure(bundle.text("calculator.errorFetch", ""));
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

    let screws = list.items();
    let options = diameters(screws);
    let lengths = selection.lengths(screws);
    let chosen = selection.selected(screws);

    let on_diameter = {
        let selection = selection.clone();
        let options = options.clone();
        on_select(Callback::from(move |value: String| {
            selection.dispatch(SelectionAction::Diameter(parse_diameter_choice(
                &value, &options,
            )));
        }))
    };

    let on_length = {
        let selection = selection.clone();
        on_select(Callback::from(move |value: String| {
            selection.dispatch(SelectionAction::Screw(value.trim().parse().ok()));
        }))
    };

    let on_toggle = {
        let show_form = show_form.clone();
        let draft = draft.clone();
        let banner = banner.clone();
        Callback::from(move |_: MouseEvent| {
            show_form.set(!*show_form);
            draft.set(ScrewDraft::default());
            banner.set(None);
        })
    };

    let on_submit = {
        let api_ctx = api_ctx.clone();
        let navigator = navigator.clone();
        let bundle = bundle.clone();
        let show_form = show_form.clone();
        let draft = draft.clone();
        let banner = banner.clone();
        let revision = revision.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let payload = match draft.to_create() {
                Ok(payload) => payload,
                Err(err) => {
                    banner.set(Some(bundle.text(draft_error_key(&err), "")));
                    return;
                }
            };
            banner.set(None);
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            let bundle = bundle.clone();
            let show_form = show_form.clone();
            let draft = draft.clone();
            let banner = banner.clone();
            let revision = revision.clone();
            spawn_local(async move {
                match api_ctx.client.create_screw_length(&payload).await {
                    Ok(_) => {
                        show_form.set(false);
                        draft.set(ScrewDraft::default());
                        revision.set(*revision + 1);
                    }
                    Err(err) => {
                        if !api_ctx.session_ended("save screw length", &err, navigator.as_ref()) {
                            banner.set(Some(err.message(&bundle, "calculator.errorSave")));
                        }
                    }
                }
            });
        })
    };

    let on_delete = {
        let bundle = bundle.clone();
        let selection = selection.clone();
        let banner = banner.clone();
        Callback::from(move |id: i64| {
            let question = bundle.text("calculator.confirmDelete", "");
            let Some(id) = gate_delete(&BrowserConfirm, &question, id) else {
                return;
            };
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            let bundle = bundle.clone();
            let selection = selection.clone();
            let banner = banner.clone();
            let revision = revision.clone();
            spawn_local(async move {
                match api_ctx.client.delete_screw_length(id).await {
                    Ok(()) => {
                        selection.dispatch(SelectionAction::Deleted(id));
                        banner.set(None);
                        revision.set(*revision + 1);
                    }
                    Err(err) => {
                        if !api_ctx.session_ended("delete screw length", &err, navigator.as_ref()) {
                            banner.set(Some(err.message(&bundle, "calculator.errorDelete")));
                        }
                    }
                }
            });
        })
    };

    let current_diameter = selection.diameter.map(diameter_value).unwrap_or_default();
    let current_screw = selection.screw.map(|id| id.to_string()).unwrap_or_default();

    let picker = html! {
        <section class="card">
            <h2>{t("calculator.selectDiameter")}</h2>
            <div class="row">
                <label class="stack">
                    <span>{t("calculator.diameter")}</span>
                    <select onchange={on_diameter}>
                        <option value="" selected={current_diameter.is_empty()}>
                            {t("calculator.chooseDiameter")}
                        </option>
                        { for options.iter().map(|diameter| {
                            let value = diameter_value(*diameter);
                            let selected = current_diameter == value;
                            html! {
                                <option key={value.clone()} value={value.clone()} {selected}>
                                    {format!("M{value}")}
                                </option>
                            }
                        }) }
                    </select>
                </label>
                if selection.diameter.is_some() {
                    <label class="stack">
                        <span>{t("calculator.length")}</span>
                        <select onchange={on_length}>
                            <option value="" selected={current_screw.is_empty()}>
                                {t("calculator.chooseLength")}
                            </option>
                            { for lengths.iter().map(|screw| {
                                let value = screw.id.to_string();
                                let selected = current_screw == value;
                                html! {
                                    <option key={screw.id} {value} {selected}>
                                        {format!("{} mm", screw.dlugosc)}
                                    </option>
                                }
                            }) }
                        </select>
                    </label>
                }
            </div>
            if let Some(screw) = chosen {
                <div class="panel success">
                    <h3>{t("calculator.selectedScrew")}</h3>
                    <p>{format!("M{} x {} mm", screw.srednica, screw.dlugosc)}</p>
                </div>
            }
        </section>
    };

    let editor = if *show_form {
        html! {
            <section class="card">
                <h2>{t("calculator.addNewScrew")}</h2>
                <form class="stack" onsubmit={on_submit}>
                    <div class="row">
                        <label class="stack">
                            <span>{t("calculator.diameterValue")}</span>
                            <input
                                type="number"
                                step="any"
                                placeholder={t("calculator.diameterPlaceholder")}
                                value={draft.srednica.clone()}
                                oninput={bind_input(&draft, |draft, value| draft.srednica = value)}
                            />
                        </label>
                        <label class="stack">
                            <span>{t("calculator.lengthValue")}</span>
                            <input
                                type="number"
                                step="any"
                                placeholder={t("calculator.lengthPlaceholder")}
                                value={draft.dlugosc.clone()}
                                oninput={bind_input(&draft, |draft, value| draft.dlugosc = value)}
                            />
                        </label>
                    </div>
                    <div class="actions">
                        <button class="solid" type="submit">{t("calculator.create")}</button>
                        <button class="ghost" type="button" onclick={on_toggle.clone()}>
                            {t("calculator.cancel")}
                        </button>
                    </div>
                </form>
            </section>
        }
    } else {
        html! {}
    };

    let body = match &*list {
        ListState::Loading => html! { <p class="muted">{t("calculator.loading")}</p> },
        ListState::Error(message) => html! { <p class="error-text">{message.clone()}</p> },
        ListState::Loaded(rows) if rows.is_empty() => {
            html! { <p class="muted">{t("calculator.empty")}</p> }
        }
        ListState::Loaded(rows) => html! {
            <table class="table">
                <thead>
                    <tr>
                        <th>{t("calculator.diameter")}</th>
                        <th>{t("calculator.length")}</th>
                        <th>{t("calculator.actions")}</th>
                    </tr>
                </thead>
                <tbody>
                    { for rows.iter().map(|screw| {
                        let id = screw.id;
                        let on_delete = on_delete.clone();
                        html! {
                            <tr key={id}>
                                <td>{format!("M{}", screw.srednica)}</td>
                                <td>{format!("{} mm", screw.dlugosc)}</td>
                                <td class="actions">
                                    <button class="danger" onclick={Callback::from(move |_| on_delete.emit(id))}>
                                        {t("calculator.delete")}
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
                <h1>{t("calculator.title")}</h1>
                <button class="solid" onclick={on_toggle}>
                    { if *show_form { t("calculator.cancel") } else { t("calculator.addButton") } }
                </button>
            </header>
            <Alert message={(*banner).clone()} />
            {picker}
            {editor}
            <section class="card">
                <h2>{t("calculator.availableScrews")}</h2>
                {body}
            </section>
        </div>
    }
}
