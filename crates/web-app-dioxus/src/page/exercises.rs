use dioxus::prelude::*;

use vigor_domain as domain;
use vigor_domain::ProfileService;
use vigor_domain::ExerciseService;

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NO_CONNECTION, NOTIFICATIONS, Route,
    component::{
        element::{
            DeleteConfirmationDialog, Dialog, ErrorMessage, FloatingActionButton, Icon,
            LoadingPage, MenuOption, NoConnection, OptionsMenu, SearchBox, Table,
        },
        form::{ButtonSelectField, ButtonSelectOption, FieldValue, FieldValueState, InputField},
    },
    eh, ensure_session, signal_changed_data,
};

#[component]
pub fn Exercises(add: bool, search: String) -> Element {
    ensure_session!();

    let exercises = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_exercises().await
    });
    let mut dialog = use_signal(|| ExerciseDialog::None);
    let mut filter = use_signal(|| domain::ExerciseFilter {
        search_term: search.clone(),
        mode: None,
    });

    let show_add_dialog = move || async move {
        let mut name = FieldValue::default();
        name.validated = DOMAIN_SERVICE
            .read()
            .validate_exercise_name(&name.input, domain::ExerciseID::nil())
            .await
            .map_err(|err| err.to_string());
        *dialog.write() = ExerciseDialog::Add {
            name,
            mode: domain::ExerciseMode::default(),
            image: None,
        };
        navigator().replace(Route::Exercises {
            add: true,
            search: filter.read().search_term.clone(),
        });
    };

    use_future(move || async move {
        if add {
            show_add_dialog().await;
        }
    });

    match &*exercises.read() {
        Some(Ok(exercises)) => {
            let filtered_exercises = filter.read().exercises(exercises.iter());
            rsx! {
                div {
                    class: "field is-grouped px-4",
                    SearchBox {
                        search_term: filter.read().search_term.clone(),
                        oninput: move |event: FormEvent| {
                            filter.write().search_term = event.value();
                            navigator().replace(Route::Exercises {
                                add: false,
                                search: filter.read().search_term.clone(),
                            });
                        }
                    }
                    for (label, mode) in [("All", None), ("Reps", Some(domain::ExerciseMode::Reps)), ("Time", Some(domain::ExerciseMode::Time))] {
                        div {
                            class: "control",
                            button {
                                class: "button",
                                class: if filter.read().mode == mode { "is-link" },
                                onclick: move |_| { filter.write().mode = mode; },
                                "{label}"
                            }
                        }
                    }
                }
                {view_list(&filtered_exercises, dialog)}
                {view_dialog(dialog, Some(Route::Exercises { add: false, search: filter.read().search_term.clone() }))}
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

fn view_list(exercises: &[&domain::Exercise], mut dialog: Signal<ExerciseDialog>) -> Element {
    let mut exercises = exercises.iter().map(|e| (*e).clone()).collect::<Vec<_>>();
    exercises.sort_by(|a, b| a.name.cmp(&b.name));

    let body = exercises
        .into_iter()
        .map(|e| {
            let id = e.id;
            vec![
                rsx! {
                    span {
                        class: "has-text-link",
                        onclick: move |_| { navigator().push(Route::Exercise { id }); },
                        "{e.name}"
                    }
                },
                rsx! {
                    span { class: "tag", "{e.mode}" }
                },
                rsx! {
                    div {
                        class: "has-text-link has-text-right",
                        a {
                            class: "mx-2",
                            onclick: move |_| { *dialog.write() = ExerciseDialog::Options(e.clone()); },
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

pub fn view_dialog(mut dialog: Signal<ExerciseDialog>, closed_dialog_route: Option<Route>) -> Element {
    let mut is_loading = use_signal(|| false);

    macro_rules! is_loading {
        ($block:expr) => {
            *is_loading.write() = true;
            $block;
            *is_loading.write() = false;
        };
    }

    let close_dialog = move || {
        *dialog.write() = ExerciseDialog::None;
        if let Some(route) = closed_dialog_route {
            navigator().replace(route);
        }
    };

    let save = {
        let close_dialog = close_dialog.clone();
        move |_| {
            let close_dialog = close_dialog.clone();
            async move {
                let mut saved = false;
                is_loading! {
                    match &*dialog.read() {
                        ExerciseDialog::Add { name, mode, image } => {
                            if let (Ok(name), Some(image)) = (name.validated.clone(), image.clone()) {
                                match upload_and_create(name, *mode, image).await {
                                    Ok(_) => {
                                        saved = true;
                                        signal_changed_data();
                                    }
                                    Err(err) => {
                                        NOTIFICATIONS
                                            .write()
                                            .push(format!("Failed to add exercise: {err}"));
                                    }
                                }
                            }
                        }
                        ExerciseDialog::Rename { exercise, name } => {
                            if let Ok(name) = name.validated.clone() {
                                let mut exercise = exercise.clone();
                                exercise.name = name;
                                match DOMAIN_SERVICE.read().replace_exercise(exercise).await {
                                    Ok(_) => {
                                        saved = true;
                                        signal_changed_data();
                                    }
                                    Err(err) => {
                                        NOTIFICATIONS
                                            .write()
                                            .push(format!("Failed to rename exercise: {err}"));
                                    }
                                }
                            }
                        }
                        ExerciseDialog::EditNotes { exercise, notes } => {
                            let mut exercise = exercise.clone();
                            exercise.notes = if notes.trim().is_empty() {
                                None
                            } else {
                                Some(notes.trim().to_string())
                            };
                            match DOMAIN_SERVICE.read().replace_exercise(exercise).await {
                                Ok(_) => {
                                    saved = true;
                                    signal_changed_data();
                                }
                                Err(err) => {
                                    NOTIFICATIONS
                                        .write()
                                        .push(format!("Failed to change notes: {err}"));
                                }
                            }
                        }
                        ExerciseDialog::ReplaceImage { exercise, image } => {
                            if let Some(image) = image.clone() {
                                match upload_and_replace(exercise.clone(), image).await {
                                    Ok(_) => {
                                        saved = true;
                                        signal_changed_data();
                                    }
                                    Err(err) => {
                                        NOTIFICATIONS
                                            .write()
                                            .push(format!("Failed to replace image: {err}"));
                                    }
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
        }
    };
    let delete = {
        let close_dialog = close_dialog.clone();
        move |_| {
            let close_dialog = close_dialog.clone();
            async move {
                let mut deleted = false;
                is_loading! {
                    if let ExerciseDialog::Delete(exercise) = &*dialog.read() {
                        match DOMAIN_SERVICE.read().delete_exercise(exercise.id).await {
                            Ok(_) => {
                                deleted = true;
                                signal_changed_data();
                            }
                            Err(err) => NOTIFICATIONS
                                .write()
                                .push(format!("Failed to delete exercise: {err}")),
                        }
                    }
                }
                if deleted {
                    close_dialog();
                }
            }
        }
    };

    match &*dialog.read() {
        ExerciseDialog::None => rsx! {},
        ExerciseDialog::Options(exercise) => {
            let exercise = exercise.clone();
            rsx! {
                OptionsMenu {
                    options: vec![
                        rsx! {
                            MenuOption {
                                icon: "edit".to_string(),
                                text: "Rename exercise".to_string(),
                                onclick: eh!(exercise; {
                                    *dialog.write() = ExerciseDialog::Rename {
                                        name: FieldValue::new(exercise.name.clone()),
                                        exercise,
                                    };
                                })
                            },
                            MenuOption {
                                icon: "comment".to_string(),
                                text: "Edit notes".to_string(),
                                onclick: eh!(exercise; {
                                    *dialog.write() = ExerciseDialog::EditNotes {
                                        notes: exercise.notes.clone().unwrap_or_default(),
                                        exercise,
                                    };
                                })
                            },
                            MenuOption {
                                icon: "image".to_string(),
                                text: "Replace image".to_string(),
                                onclick: eh!(exercise; {
                                    *dialog.write() = ExerciseDialog::ReplaceImage {
                                        exercise,
                                        image: None,
                                    };
                                })
                            },
                            MenuOption {
                                icon: "times".to_string(),
                                text: "Delete exercise".to_string(),
                                onclick: move |_| { *dialog.write() = ExerciseDialog::Delete(exercise.clone()); }
                            },
                        },
                    ],
                    close_event: eh!(close_dialog; { close_dialog(); })
                }
            }
        }
        ExerciseDialog::Add { name, mode, image } => rsx! {
            Dialog {
                title: rsx! { "Add exercise" },
                close_event: eh!(close_dialog; { close_dialog(); }),
                InputField {
                    label: "Name".to_string(),
                    value: name.input.clone(),
                    error: if let Err(err) = &name.validated { err.clone() },
                    has_changed: name.changed(),
                    oninput: move |event: FormEvent| {
                        async move {
                            let validated = DOMAIN_SERVICE
                                .read()
                                .validate_exercise_name(&event.value(), domain::ExerciseID::nil())
                                .await
                                .map_err(|err| err.to_string());
                            if let ExerciseDialog::Add { name, .. } = &mut *dialog.write() {
                                name.input = event.value();
                                name.validated = validated;
                            }
                        }
                    }
                }
                ButtonSelectField::<domain::ExerciseMode> {
                    label: "Mode".to_string(),
                    options: vec![
                        ButtonSelectOption { text: "Reps".to_string(), value: domain::ExerciseMode::Reps },
                        ButtonSelectOption { text: "Time".to_string(), value: domain::ExerciseMode::Time },
                    ],
                    selected: *mode,
                    has_changed: false,
                    onclick: move |(_, value)| {
                        if let ExerciseDialog::Add { mode, .. } = &mut *dialog.write() {
                            *mode = value;
                        }
                    },
                }
                div {
                    class: "field",
                    label { class: "label", "Image" }
                    div {
                        class: "control",
                        input {
                            r#type: "file",
                            accept: "image/*",
                            onchange: move |event: FormEvent| {
                                async move {
                                    let Some(file) = event.files().into_iter().next() else {
                                        return;
                                    };
                                    match file.read_bytes().await {
                                        Ok(data) => {
                                            if let ExerciseDialog::Add { image, .. } =
                                                &mut *dialog.write()
                                            {
                                                *image = Some(ImageFile {
                                                    name: file.name(),
                                                    data: data.to_vec(),
                                                });
                                            }
                                        }
                                        Err(err) => {
                                            NOTIFICATIONS
                                                .write()
                                                .push(format!("Failed to read image file: {err}"));
                                        }
                                    }
                                }
                            },
                        }
                    }
                    if let Some(image) = image {
                        p { class: "help", "{image.name}" }
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
                            disabled: !name.valid() || image.is_none(),
                            "Save"
                        }
                    }
                }
            }
        },
        ExerciseDialog::Rename { exercise, name } => {
            let id = exercise.id;
            rsx! {
                Dialog {
                    title: rsx! { "Rename exercise" },
                    close_event: eh!(close_dialog; { close_dialog(); }),
                    InputField {
                        label: "Name".to_string(),
                        value: name.input.clone(),
                        error: if let Err(err) = &name.validated { err.clone() },
                        has_changed: name.changed(),
                        oninput: move |event: FormEvent| {
                            async move {
                                let validated = DOMAIN_SERVICE
                                    .read()
                                    .validate_exercise_name(&event.value(), id)
                                    .await
                                    .map_err(|err| err.to_string());
                                if let ExerciseDialog::Rename { name, .. } = &mut *dialog.write() {
                                    name.input = event.value();
                                    name.validated = validated;
                                }
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
            }
        }
        ExerciseDialog::EditNotes { exercise, notes } => {
            let unchanged =
                notes.trim() == exercise.notes.clone().unwrap_or_default().trim();
            rsx! {
                Dialog {
                    title: rsx! { "Edit notes" },
                    close_event: eh!(close_dialog; { close_dialog(); }),
                    div {
                        class: "field",
                        div {
                            class: "control",
                            textarea {
                                class: "textarea",
                                value: "{notes}",
                                oninput: move |event: FormEvent| {
                                    if let ExerciseDialog::EditNotes { notes, .. } = &mut *dialog.write() {
                                        *notes = event.value();
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
                                disabled: unchanged,
                                "Save"
                            }
                        }
                    }
                }
            }
        }
        ExerciseDialog::ReplaceImage { image, .. } => rsx! {
            Dialog {
                title: rsx! { "Replace image" },
                close_event: eh!(close_dialog; { close_dialog(); }),
                div {
                    class: "field",
                    div {
                        class: "control",
                        input {
                            r#type: "file",
                            accept: "image/*",
                            onchange: move |event: FormEvent| {
                                async move {
                                    let Some(file) = event.files().into_iter().next() else {
                                        return;
                                    };
                                    match file.read_bytes().await {
                                        Ok(data) => {
                                            if let ExerciseDialog::ReplaceImage { image, .. } =
                                                &mut *dialog.write()
                                            {
                                                *image = Some(ImageFile {
                                                    name: file.name(),
                                                    data: data.to_vec(),
                                                });
                                            }
                                        }
                                        Err(err) => {
                                            NOTIFICATIONS
                                                .write()
                                                .push(format!("Failed to read image file: {err}"));
                                        }
                                    }
                                }
                            },
                        }
                    }
                    if let Some(image) = image {
                        p { class: "help", "{image.name}" }
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
                            disabled: image.is_none(),
                            "Save"
                        }
                    }
                }
            }
        },
        ExerciseDialog::Delete(exercise) => rsx! {
            DeleteConfirmationDialog {
                element_type: "exercise".to_string(),
                element_name: rsx! { "{exercise.name}" },
                delete_event: delete.clone(),
                cancel_event: eh!(close_dialog; { close_dialog(); }),
                is_loading: is_loading(),
            }
        },
    }
}

async fn upload_and_create(
    name: domain::Name,
    mode: domain::ExerciseMode,
    image: ImageFile,
) -> Result<domain::Exercise, domain::CreateError> {
    let content_type = content_type(&image.name);
    let target = DOMAIN_SERVICE
        .read()
        .request_image_upload(&image.name, content_type)
        .await?;
    DOMAIN_SERVICE
        .read()
        .upload_image(&target, content_type, image.data)
        .await?;
    DOMAIN_SERVICE
        .read()
        .create_exercise(name, mode, target.key, None)
        .await
}

async fn upload_and_replace(
    mut exercise: domain::Exercise,
    image: ImageFile,
) -> Result<domain::Exercise, String> {
    let content_type = content_type(&image.name);
    let target = DOMAIN_SERVICE
        .read()
        .request_image_upload(&image.name, content_type)
        .await
        .map_err(|err| err.to_string())?;
    DOMAIN_SERVICE
        .read()
        .upload_image(&target, content_type, image.data)
        .await
        .map_err(|err| err.to_string())?;
    exercise.image_key = target.key;
    DOMAIN_SERVICE
        .read()
        .replace_exercise(exercise)
        .await
        .map_err(|err| err.to_string())
}

fn content_type(file_name: &str) -> &'static str {
    match file_name.rsplit('.').next().map(str::to_lowercase).as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

#[derive(Clone, PartialEq)]
pub struct ImageFile {
    name: String,
    data: Vec<u8>,
}

pub enum ExerciseDialog {
    None,
    Options(domain::Exercise),
    Add {
        name: FieldValue<domain::Name>,
        mode: domain::ExerciseMode,
        image: Option<ImageFile>,
    },
    Rename {
        exercise: domain::Exercise,
        name: FieldValue<domain::Name>,
    },
    EditNotes {
        exercise: domain::Exercise,
        notes: String,
    },
    ReplaceImage {
        exercise: domain::Exercise,
        image: Option<ImageFile>,
    },
    Delete(domain::Exercise),
}
