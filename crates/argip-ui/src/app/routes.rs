//! Routing definitions for the Argip UI.
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/dashboard")]
    Dashboard,
    #[at("/dashboard/ranges")]
    Ranges,
    #[at("/dashboard/nuts")]
    Nuts,
    #[at("/dashboard/calculator")]
    Calculator,
    #[not_found]
    #[at("/404")]
    NotFound,
}
