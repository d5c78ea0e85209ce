use dioxus::prelude::*;

use vigor_domain as domain;
use vigor_domain::ProfileService;
use vigor_domain::{SessionService, WeightService};

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NO_CONNECTION, Route,
    component::element::{Error, ErrorMessage, Loading, LoadingPage},
    ensure_session,
};

#[component]
pub fn Home() -> Element {
    let profile = ensure_session!();
    let sessions = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_sessions().await
    });
    let weight_entries = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_weight_entries().await
    });

    match *profile.read() {
        Some(Ok(_)) => {
            let session_subtitle = match &*sessions.read() {
                Some(Ok(sessions)) => {
                    if sessions.is_empty() {
                        None
                    } else {
                        Some(rsx! { strong { "{sessions.len()}" } " defined" })
                    }
                }
                Some(Err(domain::ReadError::Storage(domain::StorageError::NoConnection))) => None,
                Some(Err(err)) => Some(rsx! { Error { message: "{err}" } }),
                None => Some(rsx! { Loading {} }),
            };

            let weight_subtitle = match &*weight_entries.read() {
                Some(Ok(entries)) => latest_weight(entries).map(|(weight, unit)| {
                    let trend = trend_label(domain::trend(entries));
                    rsx! { strong { "{weight:.1} {unit}" } " ({trend})" }
                }),
                Some(Err(domain::ReadError::Storage(domain::StorageError::NoConnection))) => None,
                Some(Err(err)) => Some(rsx! { Error { message: "{err}" } }),
                None => Some(rsx! { Loading {} }),
            };

            rsx! {
                Tile {
                    title: "Sessions",
                    target: Route::Sessions { add: false, search: String::new() },
                    target_add: Some(Route::Sessions { add: true, search: String::new() }),
                    subtitle: session_subtitle,
                }
                Tile {
                    title: "Programs",
                    target: Route::Programs { add: false },
                    target_add: Some(Route::Programs { add: true }),
                    subtitle: None,
                }
                Tile {
                    title: "Exercises",
                    target: Route::Exercises { add: false, search: String::new() },
                    target_add: Some(Route::Exercises { add: true, search: String::new() }),
                    subtitle: None,
                }
                Tile {
                    title: "Body weight",
                    target: Route::BodyWeight { add: false },
                    target_add: Some(Route::BodyWeight { add: true }),
                    subtitle: weight_subtitle,
                }
            }
        }
        Some(Err(ref err)) => rsx! {
            ErrorMessage { message: err }
        },
        None => rsx! {
            LoadingPage {}
        },
    }
}

#[component]
fn Tile(
    title: String,
    target: Route,
    #[props(!optional)] target_add: Option<Route>,
    #[props(!optional)] subtitle: Option<Element>,
) -> Element {
    let navigator = use_navigator();

    rsx! {
        div {
            class: "grid mx-3 my-3",
            div {
                class: "cell",
                a {
                    class: "box px-4 py-3",
                    onclick: move |_| { navigator.push(target.clone()); },
                    div {
                        class: "is-flex is-justify-content-space-between",
                        div {
                            a { class: "title is-size-5 has-text-link", {title} }
                        }
                        if let Some(target_add) = target_add {
                            div {
                                a {
                                    class: "title is-size-5 has-text-link",
                                    onclick: move |event| { navigator.push(target_add.clone()); event.stop_propagation(); },
                                    span { class: "icon",
                                        i { class: "fas fa-plus-circle" }
                                    }
                                }
                            }
                        }
                    }
                    if let Some(ref subtitle) = subtitle {
                        p { {subtitle} }
                    }
                }
            }
        }
    }
}

fn latest_weight(entries: &[domain::WeightEntry]) -> Option<(f32, domain::WeightUnit)> {
    entries
        .iter()
        .max_by_key(|e| e.date)
        .map(|e| (f32::from(e.weight), e.unit))
}

fn trend_label(trend: domain::WeightTrend) -> &'static str {
    match trend {
        domain::WeightTrend::Increasing => "trending up",
        domain::WeightTrend::Decreasing => "trending down",
        domain::WeightTrend::Stable => "stable",
        domain::WeightTrend::InsufficientData => "no trend yet",
    }
}
