use dioxus::prelude::*;

use vigor_domain as domain;
use vigor_domain::ProfileService;
use vigor_domain::{ProgramService, SessionService};

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NO_CONNECTION, NOTIFICATIONS, Route,
    component::{
        element::{
            Dialog, ErrorMessage, FloatingActionButton, LoadingPage, NoConnection, Title,
        },
        form::{SelectField, SelectOption},
    },
    eh, ensure_session, page, signal_changed_data,
};

#[component]
pub fn Program(id: domain::ProgramID) -> Element {
    ensure_session!();

    let program = use_resource(move || async move {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_program(id).await
    });
    let sessions = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_sessions().await
    });
    let mut dialog = use_signal(|| page::programs::ProgramDialog::None);
    let schedule_dialog = use_signal(|| ScheduleDialog::None);

    match (&*program.read(), &*sessions.read()) {
        (Some(Ok(program)), Some(Ok(sessions))) => {
            rsx! {
                Title { title: "{program.name}" }
                if let Some(goal) = &program.goal {
                    div {
                        class: "block mx-4 content",
                        p { "{goal}" }
                    }
                }
                {view_schedule(program, sessions, schedule_dialog)}
                {view_schedule_dialog(schedule_dialog, sessions)}
                {page::programs::view_dialog(dialog, None)}
                FloatingActionButton {
                    icon: "edit".to_string(),
                    onclick: eh!(program; {
                        *dialog.write() = page::programs::ProgramDialog::Options(program.clone());
                    }),
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

fn view_schedule(
    program: &domain::Program,
    sessions: &[domain::Session],
    mut schedule_dialog: Signal<ScheduleDialog>,
) -> Element {
    rsx! {
        div {
            class: "table-container mt-2",
            table {
                class: "table is-fullwidth is-hoverable",
                thead {
                    tr {
                        th { "Week" }
                        for slot in 1..=u32::from(program.sessions_per_week) {
                            th { "{slot}" }
                        }
                    }
                }
                tbody {
                    for week in 1..=u32::from(program.weeks) {
                        tr {
                            th { "{week}" }
                            for slot in 1..=u32::from(program.sessions_per_week) {
                                {
                                    let entry_session_id =
                                        program.entry_at(week, slot).map(|e| e.session_id);
                                    let session_name = entry_session_id
                                        .and_then(|id| sessions.iter().find(|s| s.id == id))
                                        .map(|s| s.name.to_string());
                                    let program = program.clone();
                                    rsx! {
                                        td {
                                            button {
                                                class: "button is-fullwidth is-schedule-cell",
                                                class: if session_name.is_some() { "is-link is-soft" },
                                                onclick: move |_| {
                                                    *schedule_dialog.write() = ScheduleDialog::Cell {
                                                        program: program.clone(),
                                                        week,
                                                        slot,
                                                        session_id: entry_session_id,
                                                    };
                                                },
                                                if let Some(session_name) = &session_name {
                                                    "{session_name}"
                                                } else {
                                                    "—"
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn view_schedule_dialog(
    mut schedule_dialog: Signal<ScheduleDialog>,
    sessions: &[domain::Session],
) -> Element {
    let mut is_loading = use_signal(|| false);

    let close_dialog = move || {
        *schedule_dialog.write() = ScheduleDialog::None;
    };

    macro_rules! is_loading {
        ($block:expr) => {
            *is_loading.write() = true;
            $block;
            *is_loading.write() = false;
        };
    }

    let mut sessions = sessions.to_vec();
    sessions.sort_by(|a, b| a.name.cmp(&b.name));

    match &*schedule_dialog.read() {
        ScheduleDialog::None => rsx! {},
        ScheduleDialog::Cell {
            program,
            week,
            slot,
            session_id,
        } => {
            let week = *week;
            let slot = *slot;
            let cell_occupied = program.entry_at(week, slot).is_some();
            let selected_session_id = session_id.or(sessions.first().map(|s| s.id));
            let save_program = program.clone();
            let clear_program = program.clone();
            let save = eh!(close_dialog; {
                let program = save_program.clone();
                async move {
                    is_loading! {
                        if let Some(session_id) = selected_session_id {
                            assign_cell(program, week, slot, session_id).await;
                        }
                    }
                    close_dialog();
                }
            });
            let clear = eh!(close_dialog; {
                let program = clear_program.clone();
                async move {
                    is_loading! {
                        clear_cell(program, week, slot).await
                    }
                    close_dialog();
                }
            });
            rsx! {
                Dialog {
                    title: rsx! { "Week {week}, session {slot}" },
                    close_event: eh!(close_dialog; { close_dialog(); }),
                    SelectField {
                        label: "Session".to_string(),
                        options: sessions
                            .iter()
                            .map(|s| {
                                rsx! {
                                    SelectOption {
                                        text: "{s.name}",
                                        value: "{s.id}",
                                        selected: selected_session_id == Some(s.id),
                                    }
                                }
                            })
                            .collect::<Vec<_>>(),
                        has_changed: selected_session_id != *session_id,
                        onchange: move |event: FormEvent| {
                            if let ScheduleDialog::Cell { session_id, .. } =
                                &mut *schedule_dialog.write()
                            {
                                *session_id = event.value().parse().ok();
                            }
                        },
                    }
                    div {
                        class: "field is-grouped is-grouped-centered",
                        div {
                            class: "control",
                            onclick: eh!(close_dialog; { close_dialog(); }),
                            button { class: "button is-light is-soft", "Cancel" }
                        }
                        if cell_occupied {
                            div {
                                class: "control",
                                onclick: clear,
                                button {
                                    class: "button is-danger is-soft",
                                    class: if is_loading() { "is-loading" },
                                    "Clear"
                                }
                            }
                        }
                        div {
                            class: "control",
                            onclick: save,
                            button {
                                class: "button is-primary",
                                class: if is_loading() { "is-loading" },
                                disabled: selected_session_id.is_none(),
                                "Save"
                            }
                        }
                    }
                }
            }
        }
    }
}

async fn assign_cell(
    mut program: domain::Program,
    week: u32,
    slot: u32,
    session_id: domain::SessionID,
) {
    // An occupied cell updates its existing entry so the cell never ends up
    // with two entries on the server.
    if let Some(entry) = program.reassign(week, slot, session_id) {
        match DOMAIN_SERVICE
            .read()
            .modify_schedule_entry(program.id, entry)
            .await
        {
            Ok(_) => {
                signal_changed_data();
            }
            Err(err) => {
                NOTIFICATIONS
                    .write()
                    .push(format!("Failed to assign session: {err}"));
            }
        }
        return;
    }
    match program.assign(week, slot, session_id) {
        Ok(entry) => {
            match DOMAIN_SERVICE
                .read()
                .create_schedule_entry(program.id, entry)
                .await
            {
                Ok(_) => {
                    signal_changed_data();
                }
                Err(err) => {
                    NOTIFICATIONS
                        .write()
                        .push(format!("Failed to assign session: {err}"));
                }
            }
        }
        Err(err) => {
            NOTIFICATIONS
                .write()
                .push(format!("Failed to assign session: {err}"));
        }
    }
}

async fn clear_cell(mut program: domain::Program, week: u32, slot: u32) {
    let Some(entry_id) = program.clear(week, slot) else {
        return;
    };
    match DOMAIN_SERVICE
        .read()
        .delete_schedule_entry(program.id, entry_id)
        .await
    {
        Ok(_) => {
            signal_changed_data();
        }
        Err(err) => {
            NOTIFICATIONS
                .write()
                .push(format!("Failed to clear schedule entry: {err}"));
        }
    }
}

#[allow(clippy::large_enum_variant)]
#[derive(Clone)]
enum ScheduleDialog {
    None,
    Cell {
        program: domain::Program,
        week: u32,
        slot: u32,
        session_id: Option<domain::SessionID>,
    },
}
