use dioxus::prelude::*;

use vigor_domain as domain;
use vigor_domain::ProfileService;

use crate::{
    DOMAIN_SERVICE, NO_CONNECTION, Route, component::element::NoConnection as NoConnectionElement,
};

#[component]
pub fn Login() -> Element {
    let profile = use_resource(|| async { DOMAIN_SERVICE.read().get_profile().await });
    let navigator = use_navigator();

    match *profile.read() {
        Some(Ok(_)) => {
            navigator.push(Route::Home {});
        }
        Some(Err(domain::ReadError::Storage(domain::StorageError::NoConnection))) => {
            *NO_CONNECTION.write() = true;
        }
        _ => {}
    }

    rsx! {
        div {
            class: "container has-text-centered",
            if NO_CONNECTION() {
                NoConnectionElement {}
            }
            div {
                class: "block mt-6",
                button {
                    class: "button is-link is-medium",
                    onclick: move |_| {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href("auth/login");
                        }
                    },
                    "Sign in"
                }
            }
        }
    }
}
