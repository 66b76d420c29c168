use yew::prelude::*;

use crate::app::LocaleCtx;
use crate::i18n::LocaleCode;

/// Two-button language switch; the choice is persisted by the app root.
#[function_component(LocaleToggle)]
pub(crate) fn locale_toggle() -> Html {
    let Some(ctx) = use_context::<LocaleCtx>() else {
        return html! {};
    };
    html! {
        <div class="segmented locale-toggle">
            { for LocaleCode::all().into_iter().map(|locale| {
                let set = ctx.set.clone();
                let active = ctx.current == locale;
                html! {
                    <button
                        class={classes!(active.then_some("active"))}
                        aria-pressed={active.to_string()}
                        onclick={Callback::from(move |_| set.emit(locale))}
                    >
                        {locale.label()}
                    </button>
                }
            }) }
        </div>
    }
}
