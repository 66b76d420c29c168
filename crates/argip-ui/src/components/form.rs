//! Input bindings that copy DOM values into draft state.

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// `oninput` handler writing the input value into one draft field.
pub(crate) fn bind_input<T: Clone + 'static>(
    state: &UseStateHandle<T>,
    apply: fn(&mut T, String),
) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            let mut next = (*state).clone();
            apply(&mut next, input.value());
            state.set(next);
        }
    })
}

/// `onchange` handler forwarding the selected option value.
pub(crate) fn on_select(callback: Callback<String>) -> Callback<Event> {
    Callback::from(move |event: Event| {
        if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
            callback.emit(select.value());
        }
    })
}
