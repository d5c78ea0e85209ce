use dioxus::prelude::*;

use vigor_domain as domain;
use vigor_domain::ProfileService;
use vigor_web_app as web_app;
use vigor_web_app::SettingsService;

use crate::{
    DOMAIN_SERVICE, NO_CONNECTION, Route, WEB_APP_SERVICE,
    component::element::{Color, Dialog, ElementWithDescription, ErrorMessage, Icon},
};

use super::element::Loading;

#[component]
pub fn Navbar() -> Element {
    let mut menu_visible = use_signal(|| false);
    let mut settings_visible = use_signal(|| false);
    let profile = use_resource(|| async { DOMAIN_SERVICE.read().get_profile().await });
    let settings = use_resource(|| async { WEB_APP_SERVICE.read().get_settings().await });
    let navigator = use_navigator();

    let user = match *profile.read() {
        Some(Ok(ref profile)) => Some(profile.clone()),
        Some(Err(domain::ReadError::Storage(domain::StorageError::NoConnection))) => {
            *NO_CONNECTION.write() = true;
            None
        }
        Some(Err(_)) | None => None,
    };
    let page_title = match use_route::<Route>() {
        Route::Login {} => "Vigor".to_string(),
        Route::Home {} => {
            if let Some(ref user) = user {
                user.name.clone()
            } else {
                "Home".to_string()
            }
        }
        Route::Sessions { .. } => "Sessions".to_string(),
        Route::Session { .. } => "Session".to_string(),
        Route::SessionPlay { .. } => "Play".to_string(),
        Route::Programs { .. } => "Programs".to_string(),
        Route::Program { .. } => "Program".to_string(),
        Route::Exercises { .. } => "Exercises".to_string(),
        Route::Exercise { .. } => "Exercise".to_string(),
        Route::ExerciseProgression { .. } => "Progression".to_string(),
        Route::BodyWeight { .. } => "Body weight".to_string(),
        Route::NotFound { .. } => String::new(),
    };
    let go_up_target = match use_route::<Route>() {
        Route::Login {} | Route::Home {} => None,
        Route::Sessions { .. }
        | Route::Programs { .. }
        | Route::Exercises { .. }
        | Route::BodyWeight { .. }
        | Route::NotFound { .. } => Some(Route::Home {}),
        Route::Session { .. } => Some(Route::Sessions {
            add: false,
            search: String::new(),
        }),
        Route::SessionPlay { id } => Some(Route::Session { id }),
        Route::Program { .. } => Some(Route::Programs { add: false }),
        Route::Exercise { .. } => Some(Route::Exercises {
            add: false,
            search: String::new(),
        }),
        Route::ExerciseProgression { id } => Some(Route::Exercise { id }),
    };

    rsx! {
        nav {
            class: "navbar is-fixed-top is-primary has-shadow has-text-weight-bold",
            div {
                class: "container",
                div {
                    class: "navbar-brand is-flex-grow-1",
                    a {
                        class: "navbar-item is-size-5",
                        class: if go_up_target.is_none() { "has-text-primary" },
                        Icon {
                            name: "chevron-left",
                            onclick: {
                                let go_up_target = go_up_target.clone();
                                move |_| {
                                    if let Some(go_up_target) = &go_up_target {
                                        navigator.push(go_up_target.clone());
                                    }
                                }
                            },
                        }
                    }
                    div { class: "navbar-item is-size-5", "{page_title}" }
                    div { class: "mx-auto" }
                    if NO_CONNECTION() {
                        a {
                            class: "navbar-item",
                            class: "is-size-5",
                            class: "mx-1",
                            ElementWithDescription {
                                description: "No connection to server",
                                right_aligned: true,
                                Icon { name: "plug-circle-xmark" }
                            }
                        }
                    }
                    a {
                        aria_expanded: menu_visible(),
                        aria_label: "menu",
                        class: "navbar-burger ml-0",
                        class: if menu_visible() { "is-active" },
                        role: "button",
                        onclick: move |_| { *menu_visible.write() = !menu_visible() },
                        span { aria_hidden: "true" }
                        span { aria_hidden: "true" }
                        span { aria_hidden: "true" }
                        span { aria_hidden: "true" }
                    }
                }
                div {
                    class: "navbar-menu is-flex-grow-0",
                    class: if menu_visible() { "is-active" },
                    div {
                        class: "navbar-end",
                        a {
                            class: "navbar-item",
                            onclick: move |_| {
                                *settings_visible.write() = true;
                                *menu_visible.write() = false;
                            },
                            Icon { name: "gear", px: 5 }
                            "Settings"
                        }
                        if let Some(user) = user {
                            a {
                                class: "navbar-item",
                                onclick: move |_| {
                                    *menu_visible.write() = false;
                                    if let Some(window) = web_sys::window() {
                                        let _ = window.location().set_href("auth/logout");
                                    }
                                },
                                Icon { name: "sign-out-alt", px: 5 }
                                "Log out ({user.name})"
                            }
                        }
                    }
                }
            }
        }

        if *settings_visible.read() {
            Settings { settings, settings_visible }
        }

        Outlet::<Route> {}
    }
}

#[component]
fn Settings(
    settings: Resource<Result<web_app::Settings, String>>,
    settings_visible: Signal<bool>,
) -> Element {
    match settings.read().clone() {
        Some(Ok(settings)) => rsx! {
            Dialog {
                color: Color::Primary,
                title: rsx! { "Settings" },
                close_event: move |_| {
                    *settings_visible.write() = false;
                },
                p {
                    h1 { class: "subtitle", "Beep volume" }
                    input {
                        class: "slider is-fullwidth is-info",
                        max: "100",
                        min: "0",
                        r#type: "range",
                        step: "10",
                        value: settings.beep_volume,
                        oninput: move |event| {
                            let mut settings = settings;
                            settings.beep_volume = event.value().parse().unwrap_or(100);
                            async move {
                                let _ = WEB_APP_SERVICE.write().set_settings(settings).await;
                            }
                        },
                    }
                }
                p {
                    class: "mb-5",
                    h1 { class: "subtitle", "Theme" }
                    div {
                        class: "field has-addons",
                        p {
                            class: "control",
                            button {
                                class: "button",
                                class: if settings.theme == web_app::Theme::Light { "is-link" },
                                onclick: move |_| {
                                    let mut settings = settings;
                                    settings.theme = web_app::Theme::Light;
                                    async move {
                                        let _ = WEB_APP_SERVICE.write().set_settings(settings).await;
                                    }
                                },
                                Icon { name: "sun", is_small: true }
                                span { "Light" }
                            }
                        }
                        p {
                            class: "control",
                            span {
                                class: "button",
                                class: if settings.theme == web_app::Theme::Dark { "is-link" },
                                onclick: move |_| {
                                    let mut settings = settings;
                                    settings.theme = web_app::Theme::Dark;
                                    async move {
                                        let _ = WEB_APP_SERVICE.write().set_settings(settings).await;
                                    }
                                },
                                Icon { name: "moon", is_small: true }
                                span { "Dark" }
                            }
                        }
                        p { class: "control",
                            span {
                                class: "button",
                                class: if settings.theme == web_app::Theme::System { "is-link" },
                                onclick: move |_| {
                                    let mut settings = settings;
                                    settings.theme = web_app::Theme::System;
                                    async move {
                                        let _ = WEB_APP_SERVICE.write().set_settings(settings).await;
                                    }
                                },
                                Icon { name: "desktop", is_small: true }
                                span { "System" }
                            }
                        }
                    }
                }
                p {
                    class: "mb-5",
                    h1 { class: "subtitle", "Weight unit" }
                    div {
                        class: "field has-addons",
                        p {
                            class: "control",
                            button {
                                class: "button",
                                class: if settings.weight_unit == domain::WeightUnit::Kg { "is-link" },
                                onclick: move |_| {
                                    let mut settings = settings;
                                    settings.weight_unit = domain::WeightUnit::Kg;
                                    async move {
                                        let _ = WEB_APP_SERVICE.write().set_settings(settings).await;
                                    }
                                },
                                span { "kg" }
                            }
                        }
                        p {
                            class: "control",
                            button {
                                class: "button",
                                class: if settings.weight_unit == domain::WeightUnit::Lbs { "is-link" },
                                onclick: move |_| {
                                    let mut settings = settings;
                                    settings.weight_unit = domain::WeightUnit::Lbs;
                                    async move {
                                        let _ = WEB_APP_SERVICE.write().set_settings(settings).await;
                                    }
                                },
                                span { "lbs" }
                            }
                        }
                    }
                }
            }
        },
        Some(Err(err)) => rsx! {
            ErrorMessage { message: "Failed to get settings: {err}" }
        },
        None => Loading(),
    }
}
