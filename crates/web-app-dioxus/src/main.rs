#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]

use std::sync::{Arc, Mutex};

use dioxus::prelude::*;
use log::error;

use vigor_domain as domain;
use vigor_storage as storage;
use vigor_web_app as web_app;

use component::{
    element::{Color, Dialog},
    navbar::Navbar,
};
use page::{
    body_weight::BodyWeight, exercise::Exercise, exercise_progression::ExerciseProgression,
    exercises::Exercises, home::Home, login::Login, not_found::NotFound, program::Program,
    programs::Programs, session::Session, session_play::SessionPlay, sessions::Sessions,
};

mod component;
mod page;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Navbar)]
    #[route("/")]
    Home {},
    #[route("/login")]
    Login {},
    #[route("/exercises?:add&:search")]
    Exercises { add: bool, search: String },
    #[route("/exercise#:id")]
    Exercise { id: domain::ExerciseID },
    #[route("/exercise_progression#:id")]
    ExerciseProgression { id: domain::ExerciseID },
    #[route("/sessions?:add&:search")]
    Sessions { add: bool, search: String },
    #[route("/session#:id")]
    Session { id: domain::SessionID },
    #[route("/session_play#:id")]
    SessionPlay { id: domain::SessionID },
    #[route("/programs?:add")]
    Programs { add: bool },
    #[route("/program#:id")]
    Program { id: domain::ProgramID },
    #[route("/body_weight?:add")]
    BodyWeight { add: bool },
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

static DOMAIN_SERVICE: GlobalSignal<
    domain::Service<storage::rest::REST<storage::rest::GlooNetSendRequest>>,
> = Signal::global(|| domain::Service::new(storage::rest::REST::new()));
static WEB_APP_SERVICE: GlobalSignal<web_app::Service<storage::local_storage::UI>> =
    Signal::global(|| web_app::Service::new(storage::local_storage::UI));
static PROGRESS_SERVICE: GlobalSignal<web_app::Service<storage::session_storage::Session>> =
    Signal::global(|| web_app::Service::new(storage::session_storage::Session));
static NOTIFICATIONS: GlobalSignal<Vec<String>> = Signal::global(Vec::new);
static NO_CONNECTION: GlobalSignal<bool> = Signal::global(|| false);
static DATA_CHANGED: GlobalSignal<usize> = Signal::global(|| 0);

fn main() {
    init_logging();
    dioxus::launch(App);
}

fn init_logging() {
    let _ = web_app::log::init(Arc::new(Mutex::new(storage::local_storage::Log)));
}

#[component]
fn App() -> Element {
    std::panic::set_hook(Box::new(|info| {
        error!("{info}");
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("main"))
            .map(|el| {
                el.set_inner_html(&format!(
                    "
                    <section class=\"section\">
                        <div class=\"container\">
                            <div class=\"message is-danger\">
                                <div class=\"message-header\">
                                    <p>Something went wrong</p>
                                </div>
                                <div class=\"message-body\">
                                    <div class=\"block\">
                                        An unexpected error occurred and the application cannot continue.
                                    </div>
                                    <div class=\"block\">
                                        <pre>{info}</pre>
                                    </div>
                                    <div class=\"block field is-grouped is-grouped-centered\">
                                        <button class=\"button\" onclick=\"location.reload()\">
                                            <span class=\"icon\">
                                                <i class=\"fa fa-arrow-rotate-right\"></i>
                                            </span>
                                            <span>Reload page</span>
                                        </button>
                                    </div>
                                </div>
                            </div>
                        </div>
                    </section>
                "
                ));
                Some(())
            });
    }));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        div {
            class: "container is-max-desktop py-4",
            Router::<Route> {},
            Notification {}
        }
    }
}

#[component]
fn Notification() -> Element {
    let notification = NOTIFICATIONS.read().last().cloned();

    rsx! {
        if let Some(message) = notification {
            Dialog {
                color: Color::Danger,
                title: rsx! { "Error" },
                close_event: move |_| { let _ = NOTIFICATIONS.write().pop(); },
                div {
                    class: "block",
                    "{message}"
                }
                div {
                    class: "field is-grouped is-grouped-centered",
                    div {
                        class: "control",
                        button {
                            class: "button is-danger",
                            onclick: move |_| { let _ = NOTIFICATIONS.write().pop(); },
                            "Close"
                        }
                    }
                }
            }
        }
    }
}

/// Load the profile of the authenticated user. Without a valid session the
/// user is sent to the login page.
#[macro_export]
macro_rules! ensure_session {
    () => {{
        let profile = use_resource(|| async { DOMAIN_SERVICE.read().get_profile().await });
        match *profile.read() {
            Some(Err(domain::ReadError::Storage(domain::StorageError::NoSession))) => {
                navigator().push(Route::Login {});
            }
            Some(Err(domain::ReadError::Storage(domain::StorageError::NoConnection))) => {
                *NO_CONNECTION.write() = true;
            }
            _ => {}
        }
        profile
    }};
}

fn signal_changed_data() {
    *DATA_CHANGED.write() += 1;
}

#[macro_export]
macro_rules! eh {
    ($($closure:ident),+; $expr:expr) => {{
        $(let $closure = $closure.clone();)+
            move |_| {
                $(let mut $closure = $closure.clone();)+
                $expr
            }
    }};
    (mut $($mut_closure:ident),*; $expr:expr) => {{
        $(let $mut_closure = $mut_closure.clone();)+
            move |_| {
                $(let mut $mut_closure = $mut_closure.clone();)*
                $expr
            }
    }};
    (mut $($mut_closure:ident),*; $($closure:ident),+; $expr:expr) => {{
        $(let $mut_closure = $mut_closure.clone();)+
        $(let $closure = $closure.clone();)+
            move |_| {
                $(let mut $mut_closure = $mut_closure.clone();)*
                $(let $closure = $closure.clone();)*
                $expr
            }
    }};
}
