//! Route guard wrapper for protected pages.

use yew::prelude::*;
use yew_router::prelude::Redirect;

use crate::app::{ApiCtx, Route};
use crate::core::guard::GuardState;

#[derive(Properties, PartialEq)]
pub(crate) struct ProtectedProps {
    pub(crate) children: Children,
}

/// Renders children only while a token is stored; otherwise redirects to login.
#[function_component(Protected)]
pub(crate) fn protected(props: &ProtectedProps) -> Html {
    let Some(api_ctx) = use_context::<ApiCtx>() else {
        return html! { <Redirect<Route> to={Route::Login} /> };
    };
    match GuardState::from_store(api_ctx.client.tokens().as_ref()) {
        GuardState::Authenticated => html! { <>{ for props.children.iter() }</> },
        GuardState::Unauthenticated => html! { <Redirect<Route> to={Route::Login} /> },
    }
}
