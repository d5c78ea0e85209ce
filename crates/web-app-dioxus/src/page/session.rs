use dioxus::prelude::*;

use vigor_domain as domain;
use vigor_domain::ProfileService;
use vigor_domain::{ExerciseService, SessionService};

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NO_CONNECTION, NOTIFICATIONS, Route,
    component::{
        element::{
            CenteredBlock, Dialog, ErrorMessage, FloatingActionButton, Icon, IconText,
            LoadingPage, MenuOption, NoConnection, OptionsMenu, Title,
        },
        form::{FieldValue, FieldValueState, InputField, SelectField, SelectOption},
    },
    eh, ensure_session, page, signal_changed_data,
};

#[component]
pub fn Session(id: domain::SessionID) -> Element {
    ensure_session!();

    let session = use_resource(move || async move {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_session(id).await
    });
    let exercises = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_exercises().await
    });
    let edit_dialog = use_signal(|| EditDialog::None);
    let mut session_dialog = use_signal(|| page::sessions::SessionDialog::None);

    match (&*session.read(), &*exercises.read()) {
        (Some(Ok(session)), Some(Ok(exercises))) => {
            rsx! {
                Title { title: "{session.name}" }
                {view_items(session, exercises, edit_dialog)}
                if !session.items.is_empty() {
                    CenteredBlock {
                        button {
                            class: "button is-link",
                            onclick: move |_| { navigator().push(Route::SessionPlay { id }); },
                            IconText { icon: "play", text: "Start session" }
                        }
                    }
                }
                {page::sessions::view_dialog(session_dialog, None)}
                {view_edit_dialog(edit_dialog, exercises)}
                FloatingActionButton {
                    icon: "edit".to_string(),
                    onclick: eh!(session; {
                        *session_dialog.write() = page::sessions::SessionDialog::Options(session.clone());
                    }),
                }
            }
        }
        (Some(Err(domain::ReadError::Storage(domain::StorageError::NoConnection))), _) => {
            rsx! { NoConnection {} }
        }
        (Some(Err(err)), _) | (_, Some(Err(err))) => {
            rsx! { ErrorMessage { message: err } }
        }
        (None, _) | (_, None) => rsx! { LoadingPage {} },
    }
}

fn view_items(
    session: &domain::Session,
    exercises: &[domain::Exercise],
    mut edit_dialog: Signal<EditDialog>,
) -> Element {
    rsx! {
        div {
            class: "p-2",
            for (index, item) in session.items.iter().enumerate() {
                div {
                    class: "message is-info mb-0",
                    class: if index > 0 { "mt-3" },
                    div {
                        class: "message-body has-background-scheme-main p-3",
                        div {
                            class: "is-flex is-justify-content-space-between has-text-weight-bold",
                            if let Some(exercise) = exercises.iter().find(|e| e.id == item.exercise_id) {
                                Link {
                                    to: Route::Exercise { id: exercise.id },
                                    "{exercise.name}"
                                }
                            } else {
                                "Exercise {item.exercise_id}"
                            }
                            Icon {
                                name: "ellipsis-vertical",
                                onclick: eh!(mut edit_dialog; session; {
                                    *edit_dialog.write() = EditDialog::Options { session, index };
                                }),
                            }
                        }
                        div {
                            if let (Some(sets), Some(reps)) = (item.sets, item.reps) {
                                span {
                                    class: "icon-text mr-4",
                                    span {
                                        class: "mr-2",
                                        Icon { name: "rotate-left" }
                                        "{sets} ✕ {reps}"
                                    }
                                }
                            }
                            if let Some(duration) = item.duration {
                                span {
                                    class: "icon-text mr-4",
                                    span {
                                        class: "mr-2",
                                        Icon { name: "clock-rotate-left" }
                                        "{duration} s"
                                    }
                                }
                            }
                            if !item.rest.is_zero() {
                                span {
                                    class: "icon-text mr-4",
                                    span {
                                        class: "mr-2",
                                        Icon { name: "hourglass" }
                                        "{item.rest} s"
                                    }
                                }
                            }
                        }
                        if let Some(notes) = &item.notes {
                            div {
                                class: "is-size-7 has-text-grey",
                                "{notes}"
                            }
                        }
                    }
                }
            }
            div {
                class: "has-text-centered",
                button {
                    class: "button is-white-soft",
                    onclick: eh!(mut edit_dialog; session; {
                        *edit_dialog.write() = EditDialog::AddItem {
                            session,
                            exercise_id: None,
                        };
                    }),
                    Icon { name: "plus" }
                }
            }
        }
    }
}

fn view_edit_dialog(mut edit_dialog: Signal<EditDialog>, exercises: &[domain::Exercise]) -> Element {
    let close_dialog = move || {
        *edit_dialog.write() = EditDialog::None;
    };

    match &*edit_dialog.read() {
        EditDialog::None => rsx! {},
        EditDialog::Options { session, index } => {
            let session = session.clone();
            let index = *index;
            let exercise_mode = exercises
                .iter()
                .find(|e| {
                    session
                        .items
                        .get(index)
                        .is_some_and(|item| item.exercise_id == e.id)
                })
                .map_or(domain::ExerciseMode::Reps, |e| e.mode);
            rsx! {
                OptionsMenu {
                    options: vec![
                        rsx! {
                            MenuOption {
                                icon: "arrow-up".to_string(),
                                text: "Move up".to_string(),
                                onclick: eh!(mut session; close_dialog; {
                                    if index > 0 {
                                        session.items.swap(index, index - 1);
                                        domain::renumber(&mut session.items);
                                    }
                                    modify_session_items(session, close_dialog)
                                })
                            },
                            MenuOption {
                                icon: "arrow-down".to_string(),
                                text: "Move down".to_string(),
                                onclick: eh!(mut session; close_dialog; {
                                    if index < session.items.len() - 1 {
                                        session.items.swap(index, index + 1);
                                        domain::renumber(&mut session.items);
                                    }
                                    modify_session_items(session, close_dialog)
                                })
                            },
                            MenuOption {
                                icon: "edit".to_string(),
                                text: "Edit".to_string(),
                                onclick: eh!(mut edit_dialog; session; {
                                    if let Some(item) = session.items.get(index) {
                                        let sets = FieldValue::from_option(item.sets);
                                        let reps = FieldValue::from_option(item.reps);
                                        let duration = FieldValue::from_option(item.duration);
                                        let rest = FieldValue::new(item.rest);
                                        let notes = FieldValue::from_option(item.notes.clone());
                                        *edit_dialog.write() = EditDialog::EditItem {
                                            session,
                                            index,
                                            mode: exercise_mode,
                                            sets,
                                            reps,
                                            duration,
                                            rest,
                                            notes,
                                        };
                                    }
                                })
                            },
                            MenuOption {
                                icon: "times".to_string(),
                                text: "Remove".to_string(),
                                onclick: eh!(mut session; close_dialog; {
                                    session.items.remove(index);
                                    domain::renumber(&mut session.items);
                                    modify_session_items(session, close_dialog)
                                })
                            },
                        },
                    ],
                    close_event: eh!(mut close_dialog; { close_dialog(); })
                }
            }
        }
        EditDialog::AddItem {
            session,
            exercise_id,
        } => {
            let selected_exercise_id = exercise_id.or(exercises.first().map(|e| e.id));
            let save = eh!(mut session; close_dialog; {
                async move {
                    if let Some(exercise_id) = selected_exercise_id {
                        session.items.push(domain::SessionItem {
                            exercise_id,
                            order: session.items.len(),
                            sets: None,
                            reps: None,
                            duration: None,
                            rest: domain::Rest::default(),
                            notes: None,
                        });
                        modify_session_items(session, close_dialog).await;
                    }
                }
            });
            rsx! {
                Dialog {
                    title: rsx! { "Add exercise" },
                    close_event: eh!(mut close_dialog; { close_dialog(); }),
                    SelectField {
                        label: "Exercise".to_string(),
                        options: exercises
                            .iter()
                            .map(|e| rsx! {
                                SelectOption {
                                    text: "{e.name}",
                                    value: "{e.id}",
                                    selected: Some(e.id) == selected_exercise_id,
                                }
                            })
                            .collect::<Vec<_>>(),
                        has_changed: false,
                        onchange: move |event: FormEvent| {
                            if let EditDialog::AddItem { exercise_id, .. } = &mut *edit_dialog.write() {
                                *exercise_id = event.value().parse().ok();
                            }
                        },
                    }
                    div {
                        class: "field is-grouped is-grouped-centered",
                        div {
                            class: "control",
                            onclick: eh!(mut close_dialog; { close_dialog(); }),
                            button { class: "button is-light is-soft", "Cancel" }
                        }
                        div {
                            class: "control",
                            onclick: save,
                            button {
                                class: "button is-primary",
                                disabled: selected_exercise_id.is_none(),
                                "Save"
                            }
                        }
                    }
                }
            }
        }
        EditDialog::EditItem {
            session,
            index,
            mode,
            sets: sets_field,
            reps: reps_field,
            duration: duration_field,
            rest: rest_field,
            notes: notes_field,
        } => {
            let index = *index;
            let save = eh!(mut session; sets_field, reps_field, duration_field, rest_field, notes_field, close_dialog; {
                if let Some(item) = session.items.get_mut(index) {
                    if let Ok(sets) = sets_field.validated {
                        item.sets = sets;
                    }
                    if let Ok(reps) = reps_field.validated {
                        item.reps = reps;
                    }
                    if let Ok(duration) = duration_field.validated {
                        item.duration = duration;
                    }
                    if let Ok(rest) = rest_field.validated {
                        item.rest = rest;
                    }
                    if let Ok(notes) = notes_field.validated {
                        item.notes = notes.filter(|n: &String| !n.trim().is_empty());
                    }
                }
                modify_session_items(session, close_dialog)
            });
            rsx! {
                Dialog {
                    close_event: eh!(mut close_dialog; { close_dialog(); }),
                    if *mode == domain::ExerciseMode::Reps {
                        InputField {
                            label: "Sets".to_string(),
                            right_icon: rsx! { "✕" },
                            inputmode: "numeric".to_string(),
                            value: sets_field.input.clone(),
                            error: if let Err(err) = &sets_field.validated { err.clone() },
                            has_changed: sets_field.changed(),
                            oninput: move |event: FormEvent| {
                                if let EditDialog::EditItem { sets, .. } = &mut *edit_dialog.write() {
                                    sets.input = event.value();
                                    sets.validated = if sets.input.is_empty() {
                                        Ok(None)
                                    } else {
                                        domain::Sets::try_from(sets.input.as_ref())
                                            .map(Some)
                                            .map_err(|err| err.to_string())
                                    };
                                }
                            }
                        }
                        InputField {
                            label: "Reps".to_string(),
                            inputmode: "numeric".to_string(),
                            value: reps_field.input.clone(),
                            error: if let Err(err) = &reps_field.validated { err.clone() },
                            has_changed: reps_field.changed(),
                            oninput: move |event: FormEvent| {
                                if let EditDialog::EditItem { reps, .. } = &mut *edit_dialog.write() {
                                    reps.input = event.value();
                                    reps.validated = if reps.input.is_empty() {
                                        Ok(None)
                                    } else {
                                        domain::Reps::try_from(reps.input.as_ref())
                                            .map(Some)
                                            .map_err(|err| err.to_string())
                                    };
                                }
                            }
                        }
                    } else {
                        InputField {
                            label: "Duration".to_string(),
                            right_icon: rsx! { "s" },
                            inputmode: "numeric".to_string(),
                            value: duration_field.input.clone(),
                            error: if let Err(err) = &duration_field.validated { err.clone() },
                            has_changed: duration_field.changed(),
                            oninput: move |event: FormEvent| {
                                if let EditDialog::EditItem { duration, .. } = &mut *edit_dialog.write() {
                                    duration.input = event.value();
                                    duration.validated = if duration.input.is_empty() {
                                        Ok(None)
                                    } else {
                                        domain::Duration::try_from(duration.input.as_ref())
                                            .map(Some)
                                            .map_err(|err| err.to_string())
                                    };
                                }
                            }
                        }
                    }
                    InputField {
                        label: "Rest".to_string(),
                        right_icon: rsx! { "s" },
                        inputmode: "numeric".to_string(),
                        value: rest_field.input.clone(),
                        error: if let Err(err) = &rest_field.validated { err.clone() },
                        has_changed: rest_field.changed(),
                        oninput: move |event: FormEvent| {
                            if let EditDialog::EditItem { rest, .. } = &mut *edit_dialog.write() {
                                rest.input = event.value();
                                rest.validated = if rest.input.is_empty() {
                                    Ok(domain::Rest::default())
                                } else {
                                    domain::Rest::try_from(rest.input.as_ref())
                                        .map_err(|err| err.to_string())
                                };
                            }
                        }
                    }
                    InputField {
                        label: "Notes".to_string(),
                        value: notes_field.input.clone(),
                        has_changed: notes_field.changed(),
                        oninput: move |event: FormEvent| {
                            if let EditDialog::EditItem { notes, .. } = &mut *edit_dialog.write() {
                                notes.input = event.value();
                                notes.validated = Ok(if notes.input.is_empty() {
                                    None
                                } else {
                                    Some(notes.input.clone())
                                });
                            }
                        }
                    }
                    div {
                        class: "field is-grouped is-grouped-centered",
                        div {
                            class: "control",
                            onclick: eh!(mut close_dialog; { close_dialog(); }),
                            button { class: "button is-light is-soft", "Cancel" }
                        }
                        div {
                            class: "control",
                            onclick: save,
                            button {
                                class: "button is-primary",
                                disabled: !FieldValue::has_valid_changes(&[sets_field as &dyn FieldValueState, reps_field, duration_field, rest_field, notes_field]),
                                "Save"
                            }
                        }
                    }
                }
            }
        }
    }
}

async fn modify_session_items(session: domain::Session, mut close_dialog: impl FnMut()) {
    match DOMAIN_SERVICE
        .read()
        .modify_session(session.id, None, Some(session.items))
        .await
    {
        Ok(_) => {
            signal_changed_data();
        }
        Err(err) => {
            NOTIFICATIONS
                .write()
                .push(format!("Failed to modify session: {err}"));
        }
    };
    close_dialog();
}

#[allow(clippy::large_enum_variant)]
#[derive(Clone)]
pub enum EditDialog {
    None,
    Options {
        session: domain::Session,
        index: usize,
    },
    AddItem {
        session: domain::Session,
        exercise_id: Option<domain::ExerciseID>,
    },
    EditItem {
        session: domain::Session,
        index: usize,
        mode: domain::ExerciseMode,
        sets: FieldValue<Option<domain::Sets>>,
        reps: FieldValue<Option<domain::Reps>>,
        duration: FieldValue<Option<domain::Duration>>,
        rest: FieldValue<domain::Rest>,
        notes: FieldValue<Option<String>>,
    },
}
