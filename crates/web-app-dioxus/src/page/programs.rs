use dioxus::prelude::*;

use vigor_domain as domain;
use vigor_domain::ProfileService;
use vigor_domain::ProgramService;

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NO_CONNECTION, NOTIFICATIONS, Route,
    component::{
        element::{
            DeleteConfirmationDialog, Dialog, ErrorMessage, FloatingActionButton, Icon,
            LoadingPage, MenuOption, NoConnection, OptionsMenu, Table,
        },
        form::{FieldValue, FieldValueState, InputField},
    },
    eh, ensure_session, signal_changed_data,
};

#[component]
pub fn Programs(add: bool) -> Element {
    ensure_session!();

    let programs = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_programs().await
    });
    let mut dialog = use_signal(|| ProgramDialog::None);

    let mut show_add_dialog = move || {
        *dialog.write() = ProgramDialog::Add {
            name: FieldValue::default(),
            goal: FieldValue {
                input: String::new(),
                validated: Ok(None),
                orig: String::new(),
            },
            weeks: FieldValue::default(),
            sessions_per_week: FieldValue::default(),
        };
        navigator().replace(Route::Programs { add: true });
    };

    use_future(move || async move {
        if add {
            show_add_dialog();
        }
    });

    match &*programs.read() {
        Some(Ok(programs)) => {
            rsx! {
                {view_list(programs, dialog)}
                {view_dialog(dialog, Some(Route::Programs { add: false }))}
                FloatingActionButton {
                    icon: "plus".to_string(),
                    onclick: move |_| show_add_dialog(),
                }
            }
        }
        Some(Err(domain::ReadError::Storage(domain::StorageError::NoConnection))) => {
            rsx! { NoConnection {} }
        }
        Some(Err(err)) => {
            rsx! { ErrorMessage { message: err } }
        }
        None => rsx! { LoadingPage {} },
    }
}

fn view_list(programs: &[domain::Program], mut dialog: Signal<ProgramDialog>) -> Element {
    let mut programs = programs.to_vec();
    programs.sort_by(|a, b| a.name.cmp(&b.name));

    let body = programs
        .into_iter()
        .map(|p| {
            vec![
                rsx! {
                    Link {
                        to: Route::Program { id: p.id },
                        "{p.name}"
                    }
                },
                rsx! {
                    span {
                        class: "tag",
                        "{p.weeks} wk ✕ {p.sessions_per_week}"
                    }
                },
                rsx! {
                    div {
                        class: "has-text-right",
                        a {
                            class: "mx-2",
                            onclick: move |_| { *dialog.write() = ProgramDialog::Options(p.clone()); },
                            Icon { name: "ellipsis-vertical"}
                        }
                    }
                },
            ]
        })
        .collect::<Vec<_>>();

    rsx! {
        Table { body }
    }
}

pub fn view_dialog(
    mut dialog: Signal<ProgramDialog>,
    closed_dialog_route: Option<Route>,
) -> Element {
    let mut is_loading = use_signal(|| false);

    let close_dialog = move || {
        *dialog.write() = ProgramDialog::None;
        if let Some(route) = closed_dialog_route {
            navigator().replace(route);
        }
    };

    macro_rules! is_loading {
        ($block:expr) => {
            *is_loading.write() = true;
            $block;
            *is_loading.write() = false;
        };
    }

    let save = eh!(close_dialog; {
        async move {
            let mut saved = false;
            is_loading! {
                match &*dialog.read() {
                    ProgramDialog::Add { name, goal, weeks, sessions_per_week } => {
                        if let (Ok(name), Ok(goal), Ok(weeks), Ok(sessions_per_week)) = (
                            name.validated.clone(),
                            goal.validated.clone(),
                            weeks.validated.clone(),
                            sessions_per_week.validated.clone(),
                        ) {
                            match DOMAIN_SERVICE
                                .read()
                                .create_program(name, goal, weeks, sessions_per_week)
                                .await
                            {
                                Ok(_) => {
                                    saved = true;
                                    signal_changed_data();
                                }
                                Err(err) => {
                                    NOTIFICATIONS
                                        .write()
                                        .push(format!("Failed to add program: {err}"));
                                }
                            }
                        }
                    }
                    ProgramDialog::Rename { program_id, name } => {
                        if let Ok(name) = name.validated.clone() {
                            match DOMAIN_SERVICE
                                .read()
                                .modify_program(*program_id, Some(name), None)
                                .await
                            {
                                Ok(_) => {
                                    saved = true;
                                    signal_changed_data();
                                }
                                Err(err) => {
                                    NOTIFICATIONS
                                        .write()
                                        .push(format!("Failed to rename program: {err}"));
                                }
                            }
                        }
                    }
                    ProgramDialog::EditGoal { program_id, goal } => {
                        let goal = if goal.trim().is_empty() {
                            None
                        } else {
                            Some(goal.trim().to_string())
                        };
                        match DOMAIN_SERVICE
                            .read()
                            .modify_program(*program_id, None, Some(goal))
                            .await
                        {
                            Ok(_) => {
                                saved = true;
                                signal_changed_data();
                            }
                            Err(err) => {
                                NOTIFICATIONS
                                    .write()
                                    .push(format!("Failed to change goal: {err}"));
                            }
                        }
                    }
                    _ => {}
                }
            }
            if saved {
                close_dialog();
            }
        }
    });
    let delete = eh!(close_dialog; {
        async move {
            let mut deleted = false;
            is_loading! {
                if let ProgramDialog::Delete(program) = &*dialog.read() {
                    match DOMAIN_SERVICE.read().delete_program(program.id).await {
                        Ok(_) => {
                            deleted = true;
                            signal_changed_data();
                        },
                        Err(err) => NOTIFICATIONS.write().push(format!("Failed to delete program: {err}"))
                    }
                }
            }
            if deleted {
                close_dialog();
            }
        }
    });

    match &*dialog.read() {
        ProgramDialog::None => rsx! {},
        ProgramDialog::Options(program) => {
            let program = program.clone();
            let program_name = program.name.clone();
            let program_goal = program.goal.clone();
            rsx! {
                OptionsMenu {
                    options: vec![
                        rsx! {
                            MenuOption {
                                icon: "edit".to_string(),
                                text: "Rename program".to_string(),
                                onclick: move |_| {
                                    *dialog.write() = ProgramDialog::Rename {
                                        name: FieldValue::new(program_name.clone()),
                                        program_id: program.id,
                                    };
                                }
                            },
                            MenuOption {
                                icon: "bullseye".to_string(),
                                text: "Edit goal".to_string(),
                                onclick: move |_| {
                                    *dialog.write() = ProgramDialog::EditGoal {
                                        goal: program_goal.clone().unwrap_or_default(),
                                        program_id: program.id,
                                    };
                                }
                            },
                            MenuOption {
                                icon: "times".to_string(),
                                text: "Delete program".to_string(),
                                onclick: move |_| { *dialog.write() = ProgramDialog::Delete(program.clone()); }
                            },
                        },
                    ],
                    close_event: eh!(close_dialog; { close_dialog(); })
                }
            }
        }
        ProgramDialog::Add {
            name,
            goal,
            weeks,
            sessions_per_week,
        } => rsx! {
            Dialog {
                title: rsx! { "Add program" },
                close_event: eh!(close_dialog; { close_dialog(); }),
                InputField {
                    label: "Name".to_string(),
                    value: name.input.clone(),
                    error: if let Err(err) = &name.validated { err.clone() },
                    has_changed: name.changed(),
                    oninput: move |event: FormEvent| {
                        if let ProgramDialog::Add { name, .. } = &mut *dialog.write() {
                            name.input = event.value();
                            name.validated =
                                domain::Name::new(&name.input).map_err(|err| err.to_string());
                        }
                    }
                }
                InputField {
                    label: "Goal".to_string(),
                    help: "Optional".to_string(),
                    value: goal.input.clone(),
                    has_changed: goal.changed(),
                    oninput: move |event: FormEvent| {
                        if let ProgramDialog::Add { goal, .. } = &mut *dialog.write() {
                            goal.input = event.value();
                            goal.validated = Ok(if goal.input.trim().is_empty() {
                                None
                            } else {
                                Some(goal.input.trim().to_string())
                            });
                        }
                    }
                }
                InputField {
                    label: "Weeks".to_string(),
                    inputmode: "numeric".to_string(),
                    value: weeks.input.clone(),
                    error: if let Err(err) = &weeks.validated { err.clone() },
                    has_changed: weeks.changed(),
                    oninput: move |event: FormEvent| {
                        if let ProgramDialog::Add { weeks, .. } = &mut *dialog.write() {
                            weeks.input = event.value();
                            weeks.validated = domain::Weeks::try_from(weeks.input.as_ref())
                                .map_err(|err| err.to_string());
                        }
                    }
                }
                InputField {
                    label: "Sessions per week".to_string(),
                    inputmode: "numeric".to_string(),
                    value: sessions_per_week.input.clone(),
                    error: if let Err(err) = &sessions_per_week.validated { err.clone() },
                    has_changed: sessions_per_week.changed(),
                    oninput: move |event: FormEvent| {
                        if let ProgramDialog::Add { sessions_per_week, .. } = &mut *dialog.write() {
                            sessions_per_week.input = event.value();
                            sessions_per_week.validated =
                                domain::Slot::try_from(sessions_per_week.input.as_ref())
                                    .map_err(|err| err.to_string());
                        }
                    }
                }
                div {
                    class: "field is-grouped is-grouped-centered",
                    div {
                        class: "control",
                        onclick: eh!(close_dialog; { close_dialog(); }),
                        button { class: "button is-light is-soft", "Cancel" }
                    }
                    div {
                        class: "control",
                        onclick: save,
                        button {
                            class: "button is-primary",
                            class: if is_loading() { "is-loading" },
                            disabled: !(name.valid() && weeks.valid() && sessions_per_week.valid()),
                            "Save"
                        }
                    }
                }
            }
        },
        ProgramDialog::Rename { name, .. } => rsx! {
            Dialog {
                title: rsx! { "Rename program" },
                close_event: eh!(close_dialog; { close_dialog(); }),
                InputField {
                    label: "Name".to_string(),
                    value: name.input.clone(),
                    error: if let Err(err) = &name.validated { err.clone() },
                    has_changed: name.changed(),
                    oninput: move |event: FormEvent| {
                        if let ProgramDialog::Rename { name, .. } = &mut *dialog.write() {
                            name.input = event.value();
                            name.validated =
                                domain::Name::new(&name.input).map_err(|err| err.to_string());
                        }
                    }
                }
                div {
                    class: "field is-grouped is-grouped-centered",
                    div {
                        class: "control",
                        onclick: eh!(close_dialog; { close_dialog(); }),
                        button { class: "button is-light is-soft", "Cancel" }
                    }
                    div {
                        class: "control",
                        onclick: save,
                        button {
                            class: "button is-primary",
                            class: if is_loading() { "is-loading" },
                            disabled: !FieldValue::has_valid_changes(&[name as &dyn FieldValueState]),
                            "Save"
                        }
                    }
                }
            }
        },
        ProgramDialog::EditGoal { goal, .. } => rsx! {
            Dialog {
                title: rsx! { "Edit goal" },
                close_event: eh!(close_dialog; { close_dialog(); }),
                div {
                    class: "field",
                    div {
                        class: "control",
                        textarea {
                            class: "textarea",
                            value: "{goal}",
                            oninput: move |event: FormEvent| {
                                if let ProgramDialog::EditGoal { goal, .. } = &mut *dialog.write() {
                                    *goal = event.value();
                                }
                            },
                        }
                    }
                }
                div {
                    class: "field is-grouped is-grouped-centered",
                    div {
                        class: "control",
                        onclick: eh!(close_dialog; { close_dialog(); }),
                        button { class: "button is-light is-soft", "Cancel" }
                    }
                    div {
                        class: "control",
                        onclick: save,
                        button {
                            class: "button is-primary",
                            class: if is_loading() { "is-loading" },
                            "Save"
                        }
                    }
                }
            }
        },
        ProgramDialog::Delete(program) => rsx! {
            DeleteConfirmationDialog {
                element_type: "program".to_string(),
                element_name: rsx! { "{program.name}" },
                delete_event: delete.clone(),
                cancel_event: eh!(close_dialog; { close_dialog(); }),
                is_loading: is_loading(),
            }
        },
    }
}

pub enum ProgramDialog {
    None,
    Options(domain::Program),
    Add {
        name: FieldValue<domain::Name>,
        goal: FieldValue<Option<String>>,
        weeks: FieldValue<domain::Weeks>,
        sessions_per_week: FieldValue<domain::Slot>,
    },
    Rename {
        name: FieldValue<domain::Name>,
        program_id: domain::ProgramID,
    },
    EditGoal {
        goal: String,
        program_id: domain::ProgramID,
    },
    Delete(domain::Program),
}
