use dioxus::prelude::*;

use vigor_domain as domain;
use vigor_domain::ProfileService;
use vigor_domain::SessionService;

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NO_CONNECTION, NOTIFICATIONS, Route,
    component::{
        element::{
            DeleteConfirmationDialog, Dialog, ErrorMessage, FloatingActionButton, Icon,
            LoadingPage, MenuOption, NoConnection, OptionsMenu, SearchBox, Table,
        },
        form::{FieldValue, FieldValueState, InputField},
    },
    eh, ensure_session, signal_changed_data,
};

#[component]
pub fn Sessions(add: bool, search: String) -> Element {
    ensure_session!();

    let sessions = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_sessions().await
    });
    let mut dialog = use_signal(|| SessionDialog::None);

    let search_term = search.clone();
    let show_add_dialog = move || {
        let search_term = search_term.clone();
        async move {
            *dialog.write() = SessionDialog::Add {
                name: FieldValue {
                    input: search_term.clone(),
                    validated: domain::Name::new(&search_term).map_err(|err| err.to_string()),
                    orig: search_term.clone(),
                },
            };
            navigator().replace(Route::Sessions {
                add: true,
                search: search_term,
            });
        }
    };

    let show_add_dialog_for_future = show_add_dialog.clone();
    use_future(move || {
        let show_add_dialog = show_add_dialog_for_future.clone();
        async move {
            if add {
                show_add_dialog().await;
            }
        }
    });

    match &*sessions.read() {
        Some(Ok(sessions)) => {
            rsx! {
                {view_search_box(&search)},
                {view_list(sessions, &search, dialog)}
                {view_dialog(dialog, Some(Route::Sessions { add: false, search: search.clone() }))}
                FloatingActionButton {
                    icon: "plus".to_string(),
                    onclick: move |_| { show_add_dialog() },
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

fn view_search_box(search_term: &str) -> Element {
    rsx! {
        div {
            class: "px-4",
            SearchBox {
                search_term,
                oninput: move |event: FormEvent| {
                    navigator().replace(Route::Sessions {
                        add: false,
                        search: event.value(),
                    });
                }
            }
        }
    }
}

fn view_list(
    sessions: &[domain::Session],
    search_term: &str,
    mut dialog: Signal<SessionDialog>,
) -> Element {
    let mut sessions = sessions
        .iter()
        .filter(|s| domain::matches_search_term(search_term, s.name.as_ref()))
        .cloned()
        .collect::<Vec<_>>();
    sessions.sort_by(|a, b| a.name.cmp(&b.name));

    let body = sessions
        .into_iter()
        .map(|s| {
            vec![
                rsx! {
                    Link {
                        to: Route::Session { id: s.id },
                        "{s.name}"
                    }
                },
                rsx! {
                    div {
                        class: "has-text-right",
                        a {
                            class: "mx-2",
                            onclick: move |_| { *dialog.write() = SessionDialog::Options(s.clone()); },
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
    mut dialog: Signal<SessionDialog>,
    closed_dialog_route: Option<Route>,
) -> Element {
    let mut is_loading = use_signal(|| false);

    let close_dialog = move || {
        *dialog.write() = SessionDialog::None;
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
            let mut created_session = None;
            is_loading! {
                if let SessionDialog::Add { name }
                | SessionDialog::Copy { name, .. }
                | SessionDialog::Rename { name, .. } = &*dialog.read()
                {
                    if let Ok(name) = name.validated.clone() {
                        match &*dialog.read() {
                            SessionDialog::Add { .. } => {
                                match DOMAIN_SERVICE.read().create_session(name, vec![]).await {
                                    Ok(session) => {
                                        saved = true;
                                        created_session = Some(session.id);
                                        signal_changed_data();
                                    }
                                    Err(err) => {
                                        NOTIFICATIONS
                                            .write()
                                            .push(format!("Failed to add session: {err}"));
                                    }
                                }
                            }
                            SessionDialog::Copy { session_id, .. } => {
                                match DOMAIN_SERVICE.read().get_session(*session_id).await {
                                    Ok(session) => {
                                        match DOMAIN_SERVICE
                                            .read()
                                            .create_session(name, session.items)
                                            .await
                                        {
                                            Ok(_) => {
                                                saved = true;
                                                signal_changed_data();
                                            }
                                            Err(err) => {
                                                NOTIFICATIONS
                                                    .write()
                                                    .push(format!("Failed to copy session: {err}"));
                                            }
                                        }
                                    }
                                    Err(err) => {
                                        NOTIFICATIONS
                                            .write()
                                            .push(format!("Failed to copy session: {err}"));
                                    }
                                }
                            }
                            SessionDialog::Rename { session_id, .. } => {
                                match DOMAIN_SERVICE
                                    .read()
                                    .modify_session(*session_id, Some(name), None)
                                    .await
                                {
                                    Ok(_) => {
                                        saved = true;
                                        signal_changed_data();
                                    }
                                    Err(err) => {
                                        NOTIFICATIONS
                                            .write()
                                            .push(format!("Failed to rename session: {err}"));
                                    }
                                }
                            }
                            _ => {}
                        }
                    }
                }
            }
            if saved {
                close_dialog();
            }
            if let Some(id) = created_session {
                navigator().push(Route::Session { id });
            }
        }
    });
    let delete = eh!(close_dialog; {
        async move {
            let mut deleted = false;
            is_loading! {
                if let SessionDialog::Delete(session) = &*dialog.read() {
                    match DOMAIN_SERVICE.read().delete_session(session.id).await {
                        Ok(_) => {
                            deleted = true;
                            signal_changed_data();
                        },
                        Err(err) => NOTIFICATIONS.write().push(format!("Failed to delete session: {err}"))
                    }
                }
            }
            if deleted {
                close_dialog();
            }
        }
    });

    match &*dialog.read() {
        SessionDialog::None => rsx! {},
        SessionDialog::Options(session) => {
            let session = session.clone();
            let session_name_copy = session.name.clone();
            let session_name_edit = session.name.clone();
            rsx! {
                OptionsMenu {
                    options: vec![
                        rsx! {
                            MenuOption {
                                icon: "copy".to_string(),
                                text: "Copy session".to_string(),
                                onclick: move |_| {
                                    let session_name = session_name_copy.clone();
                                    *dialog.write() = SessionDialog::Copy {
                                        name: FieldValue {
                                            input: session_name.to_string(),
                                            validated: Ok(session_name.clone()),
                                            orig: session_name.to_string(),
                                        },
                                        session_id: session.id,
                                    };
                                }
                            },
                            MenuOption {
                                icon: "edit".to_string(),
                                text: "Rename session".to_string(),
                                onclick: move |_| {
                                    let session_name = session_name_edit.clone();
                                    *dialog.write() = SessionDialog::Rename {
                                        name: FieldValue::new(session_name),
                                        session_id: session.id,
                                    };
                                }
                            },
                            MenuOption {
                                icon: "times".to_string(),
                                text: "Delete session".to_string(),
                                onclick: move |_| { *dialog.write() = SessionDialog::Delete(session.clone()); }
                            },
                        },
                    ],
                    close_event: eh!(close_dialog; { close_dialog(); })
                }
            }
        }
        SessionDialog::Add { name }
        | SessionDialog::Copy { name, .. }
        | SessionDialog::Rename { name, .. } => rsx! {
            Dialog {
                title: rsx! { match &*dialog.read() { SessionDialog::Add { .. } => { "Add session" }, SessionDialog::Copy { .. } =>  { "Copy session" }, SessionDialog::Rename { .. } =>  { "Rename session" }, _ => "" } },
                close_event: eh!(close_dialog; { close_dialog(); }),
                InputField {
                    label: "Name".to_string(),
                    value: name.input.clone(),
                    error: if let Err(err) = &name.validated { err.clone() },
                    has_changed: name.changed(),
                    oninput: move |event: FormEvent| {
                        if let SessionDialog::Add { name }
                        | SessionDialog::Copy { name, .. }
                        | SessionDialog::Rename { name, .. } = &mut *dialog.write()
                        {
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
                            disabled: !name.valid(),
                            "Save"
                        }
                    }
                }
            }
        },
        SessionDialog::Delete(session) => rsx! {
            DeleteConfirmationDialog {
                element_type: "session".to_string(),
                element_name: rsx! { "{session.name}" },
                delete_event: delete.clone(),
                cancel_event: eh!(close_dialog; { close_dialog(); }),
                is_loading: is_loading(),
            }
        },
    }
}

pub enum SessionDialog {
    None,
    Options(domain::Session),
    Add {
        name: FieldValue<domain::Name>,
    },
    Copy {
        name: FieldValue<domain::Name>,
        session_id: domain::SessionID,
    },
    Rename {
        name: FieldValue<domain::Name>,
        session_id: domain::SessionID,
    },
    Delete(domain::Session),
}
