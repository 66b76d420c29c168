use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct AlertProps {
    pub(crate) message: Option<String>,
    #[prop_or_default]
    pub(crate) success: bool,
}

#[function_component(Alert)]
pub(crate) fn alert(props: &AlertProps) -> Html {
    let Some(message) = props.message.clone() else {
        return html! {};
    };
    let tone = if props.success { "alert-success" } else { "alert-error" };
    html! {
        <div class={classes!("alert", tone)} role="alert">{message}</div>
    }
}
