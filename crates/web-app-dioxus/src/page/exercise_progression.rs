use dioxus::prelude::*;

use vigor_domain as domain;
use vigor_domain::ProfileService;
use vigor_domain::{ExerciseService, ExerciseWeightService};

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NO_CONNECTION, Route,
    component::element::{ErrorMessage, LoadingPage, NoConnection, NoData, NoWrap, Table, Title},
    ensure_session,
};

#[component]
pub fn ExerciseProgression(id: domain::ExerciseID) -> Element {
    ensure_session!();

    let exercise = use_resource(move || async move {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_exercise(id).await
    });
    let progression = use_resource(move || async move {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_exercise_progression(id).await
    });

    match (&*exercise.read(), &*progression.read()) {
        (Some(Ok(exercise)), Some(Ok(progression))) => {
            rsx! {
                Title { title: "{exercise.name}" }
                if progression.sessions.is_empty() {
                    NoData {}
                } else {
                    {view_summary(progression)}
                    {view_sessions(progression)}
                }
            }
        }
        (
            Some(Err(domain::ReadError::Storage(domain::StorageError::NoConnection))),
            _,
        ) => {
            rsx! { NoConnection {} }
        }
        (Some(Err(err)), _) | (_, Some(Err(err))) => {
            rsx! { ErrorMessage { message: err } }
        }
        _ => rsx! { LoadingPage {} },
    }
}

fn view_summary(progression: &domain::ExerciseProgression) -> Element {
    let total_volume = progression.total_volume_kg();
    rsx! {
        div {
            class: "block has-text-centered",
            "{progression.total_sessions} sessions, "
            "{total_volume:.1} kg total volume"
        }
    }
}

fn view_sessions(progression: &domain::ExerciseProgression) -> Element {
    let mut sessions = progression.sessions.clone();
    sessions.sort_by(|a, b| b.date.cmp(&a.date));

    let head = vec![rsx! { "Date" }, rsx! { "Sets" }, rsx! { "Max (kg)" }];

    let body = sessions
        .into_iter()
        .map(|session| {
            let date = session.date;
            let max_weight = session.max_weight_kg();
            let mut weights = session.weights;
            weights.sort_by_key(|w| w.set_number);
            vec![
                rsx! { NoWrap { "{date}" } },
                rsx! {
                    div {
                        class: "tags",
                        for weight in &weights {
                            span {
                                class: "tag",
                                NoWrap { "{weight.weight:.1} {weight.unit} × {weight.reps}" }
                            }
                        }
                    }
                },
                rsx! {
                    if let Some(max_weight) = max_weight {
                        NoWrap { "{max_weight:.1}" }
                    } else {
                        "-"
                    }
                },
            ]
        })
        .collect::<Vec<_>>();

    rsx! {
        Table { head, body }
    }
}
