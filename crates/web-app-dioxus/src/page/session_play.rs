use chrono::Local;
use dioxus::prelude::*;

use vigor_domain as domain;
use vigor_domain::ProfileService;
use vigor_domain::{ExerciseService, ExerciseWeightService, SessionService};
use vigor_web_app as web_app;
use vigor_web_app::{SessionProgressService, SettingsService};

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NO_CONNECTION, NOTIFICATIONS, PROGRESS_SERVICE, Route,
    WEB_APP_SERVICE,
    component::{
        element::{
            CenteredBlock, Dialog, ErrorMessage, Icon, IconText, LoadingPage, NoConnection, Title,
        },
        form::{ButtonSelectField, ButtonSelectOption, FieldValue, FieldValueState, InputField},
        Timer, TimerControl,
    },
    eh, ensure_session, signal_changed_data,
};

#[component]
pub fn SessionPlay(id: domain::SessionID) -> Element {
    ensure_session!();

    let session = use_resource(move || async move {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_session(id).await
    });
    let exercises = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_exercises().await
    });
    let weights = use_resource(move || async move {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE
            .read()
            .get_exercise_weights(None, Some(id))
            .await
    });
    let settings = use_resource(|| async { WEB_APP_SERVICE.read().get_settings().await });
    let memorized_session = use_memo(move || {
        session
            .read()
            .as_ref()
            .and_then(|s| s.as_ref().ok())
            .cloned()
    });

    let mut item_progress = use_signal(|| None::<web_app::SessionProgress>);
    let mut set_progress = use_signal(|| None::<web_app::SetProgress>);
    let mut timer_control = use_signal(TimerControl::new);
    let weight_dialog = use_signal(|| SetWeightDialog::None);

    // Stored set flags may be stale if the session definition changed since
    // the last visit, so they are recalibrated and written back on load.
    use_future(move || async move {
        let Some(session) = memorized_session() else {
            return;
        };
        if item_progress.peek().is_some() {
            return;
        }
        match PROGRESS_SERVICE.read().get_session_progress(session.id).await {
            Ok(progress) => {
                *item_progress.write() = Some(progress);
            }
            Err(err) => {
                NOTIFICATIONS
                    .write()
                    .push(format!("Failed to load session progress: {err}"));
            }
        }
        match PROGRESS_SERVICE.read().get_set_progress(session.id).await {
            Ok(mut progress) => {
                progress.recalibrate(&session.expected_set_counts());
                if let Err(err) = PROGRESS_SERVICE
                    .read()
                    .set_set_progress(session.id, &progress)
                    .await
                {
                    NOTIFICATIONS
                        .write()
                        .push(format!("Failed to save set progress: {err}"));
                }
                *set_progress.write() = Some(progress);
            }
            Err(err) => {
                NOTIFICATIONS
                    .write()
                    .push(format!("Failed to load set progress: {err}"));
            }
        }
    });

    use_effect(move || {
        if let Some(Ok(settings)) = &*settings.read() {
            timer_control.write().set_beep_volume(settings.beep_volume);
        }
    });

    match (
        &*session.read(),
        &*exercises.read(),
        &*item_progress.read(),
        &*set_progress.read(),
    ) {
        (Some(Ok(session)), Some(Ok(exercises)), Some(item_progress_value), Some(_)) => {
            let item_count = session.items.len();
            let completed = item_progress_value.is_completed(item_count);
            // Logged set weights enrich the view but never block it.
            let logged_weights = weights
                .read()
                .as_ref()
                .and_then(|result| result.as_ref().ok())
                .cloned()
                .unwrap_or_default();
            let default_unit = if let Some(Ok(settings)) = &*settings.read() {
                settings.weight_unit
            } else {
                domain::WeightUnit::default()
            };
            rsx! {
                Title { title: "{session.name}" }
                div {
                    class: "block has-text-centered",
                    "{item_progress_value.completed_count()} of {item_count} exercises done"
                }
                if completed {
                    div {
                        class: "notification is-success has-text-centered mx-2",
                        IconText { icon: "trophy", text: "Session completed" }
                    }
                }
                Timer { control: timer_control }
                {view_items(
                    session,
                    exercises,
                    &logged_weights,
                    default_unit,
                    item_progress,
                    set_progress,
                    timer_control,
                    weight_dialog,
                )}
                {view_weight_dialog(weight_dialog, id)}
                CenteredBlock {
                    div {
                        class: "buttons is-centered",
                        if !completed {
                            button {
                                class: "button is-light is-soft",
                                onclick: move |_| {
                                    async move {
                                        complete_all(id, item_count, item_progress, set_progress)
                                            .await;
                                    }
                                },
                                IconText { icon: "check-double", text: "Complete all" }
                            }
                        }
                        button {
                            class: "button is-light is-soft",
                            onclick: move |_| {
                                async move {
                                    reset_progress(id, memorized_session, item_progress, set_progress)
                                        .await;
                                }
                            },
                            IconText { icon: "rotate-left", text: "Reset progress" }
                        }
                    }
                }
            }
        }
        (Some(Err(domain::ReadError::Storage(domain::StorageError::NoConnection))), _, _, _) => {
            rsx! { NoConnection {} }
        }
        (Some(Err(err)), _, _, _) | (_, Some(Err(err)), _, _) => {
            rsx! { ErrorMessage { message: err } }
        }
        _ => rsx! { LoadingPage {} },
    }
}

#[allow(clippy::too_many_arguments)]
fn view_items(
    session: &domain::Session,
    exercises: &[domain::Exercise],
    logged_weights: &[domain::ExerciseWeight],
    default_unit: domain::WeightUnit,
    mut item_progress: Signal<Option<web_app::SessionProgress>>,
    mut set_progress: Signal<Option<web_app::SetProgress>>,
    mut timer_control: Signal<TimerControl>,
    mut weight_dialog: Signal<SetWeightDialog>,
) -> Element {
    let session_id = session.id;
    rsx! {
        div {
            class: "p-2",
            for (item_index, item) in session.items.iter().enumerate() {
                {
                    let item_completed = item_progress
                        .read()
                        .as_ref()
                        .is_some_and(|p| p.is_item_completed(item_index));
                    let sets = set_progress
                        .read()
                        .as_ref()
                        .map(|p| p.sets(item_index).to_vec())
                        .unwrap_or_default();
                    let rest_seconds = u32::from(item.rest);
                    let item_rest = item.rest;
                    let item_reps = item.reps;
                    rsx! {
                        div {
                            class: "message mb-0",
                            class: if item_index > 0 { "mt-3" },
                            class: if item_completed { "is-success" } else { "is-info" },
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
                                    if sets.is_empty() {
                                        Icon {
                                            name: (if item_completed { "square-check" } else { "square" }).to_string(),
                                            onclick: move |_| {
                                                async move {
                                                    {
                                                        let mut guard = item_progress.write();
                                                        if let Some(progress) = guard.as_mut() {
                                                            progress.toggle(item_index);
                                                        }
                                                    }
                                                    persist_progress(session_id, item_progress, set_progress).await;
                                                }
                                            },
                                        }
                                    }
                                }
                                div {
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
                                if !sets.is_empty() {
                                    div {
                                        class: "buttons are-small mt-2",
                                        for (set_index, set_completed) in sets.iter().copied().enumerate() {
                                            {
                                                let set_number =
                                                    u32::try_from(set_index + 1).unwrap_or(u32::MAX);
                                                let exercise_id = item.exercise_id;
                                                let logged = logged_weights
                                                    .iter()
                                                    .find(|w| {
                                                        w.exercise_id == exercise_id
                                                            && w.set_number == set_number
                                                    })
                                                    .cloned();
                                                let chip_logged = logged.clone();
                                                rsx! {
                                                    button {
                                                        class: "button",
                                                        class: if set_completed { "is-success" } else { "is-success is-outlined" },
                                                        onclick: move |_| {
                                                            async move {
                                                                toggle_set(
                                                                    session_id,
                                                                    item_index,
                                                                    set_index,
                                                                    item_rest,
                                                                    item_progress,
                                                                    set_progress,
                                                                    timer_control,
                                                                )
                                                                .await;
                                                            }
                                                        },
                                                        if let Some(reps) = item_reps {
                                                            "{reps}"
                                                        } else {
                                                            "{set_number}"
                                                        }
                                                    }
                                                    button {
                                                        class: "button",
                                                        class: if logged.is_some() { "is-link is-soft" } else { "is-light" },
                                                        onclick: move |_| {
                                                            *weight_dialog.write() = SetWeightDialog::Set {
                                                                exercise_id,
                                                                set_number,
                                                                weight: chip_logged
                                                                    .as_ref()
                                                                    .map_or_else(FieldValue::default, |w| FieldValue::new(w.weight)),
                                                                reps: chip_logged
                                                                    .as_ref()
                                                                    .map_or_else(FieldValue::default, |w| FieldValue::new(w.reps)),
                                                                unit: chip_logged.as_ref().map_or(default_unit, |w| w.unit),
                                                                logged: chip_logged.clone(),
                                                            };
                                                        },
                                                        if let Some(logged) = &logged {
                                                            "{logged.weight:.1} {logged.unit}"
                                                        } else {
                                                            Icon { name: "weight-hanging" }
                                                        }
                                                    }
                                                }
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
                }
            }
        }
    }
}

fn view_weight_dialog(
    mut weight_dialog: Signal<SetWeightDialog>,
    session_id: domain::SessionID,
) -> Element {
    let mut is_loading = use_signal(|| false);

    let close_dialog = move || {
        *weight_dialog.write() = SetWeightDialog::None;
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
                if let SetWeightDialog::Set { exercise_id, set_number, logged, weight, reps, unit } =
                    &*weight_dialog.read()
                {
                    if let (Ok(weight), Ok(reps)) =
                        (weight.validated.clone(), reps.validated.clone())
                    {
                        let result = match logged {
                            Some(logged) => DOMAIN_SERVICE
                                .read()
                                .modify_exercise_weight(
                                    logged.id,
                                    Some(weight),
                                    Some(reps),
                                    Some(*unit),
                                )
                                .await
                                .map_err(|err| err.to_string()),
                            None => DOMAIN_SERVICE
                                .read()
                                .create_exercise_weight(
                                    *exercise_id,
                                    session_id,
                                    *set_number,
                                    weight,
                                    reps,
                                    *unit,
                                    Local::now().date_naive(),
                                )
                                .await
                                .map_err(|err| err.to_string()),
                        };
                        match result {
                            Ok(_) => {
                                saved = true;
                                signal_changed_data();
                            }
                            Err(err) => {
                                NOTIFICATIONS
                                    .write()
                                    .push(format!("Failed to save set weight: {err}"));
                            }
                        }
                    }
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
                if let SetWeightDialog::Set { logged: Some(logged), .. } = &*weight_dialog.read() {
                    match DOMAIN_SERVICE.read().delete_exercise_weight(logged.id).await {
                        Ok(_) => {
                            deleted = true;
                            signal_changed_data();
                        }
                        Err(err) => {
                            NOTIFICATIONS
                                .write()
                                .push(format!("Failed to delete set weight: {err}"));
                        }
                    }
                }
            }
            if deleted {
                close_dialog();
            }
        }
    });

    match &*weight_dialog.read() {
        SetWeightDialog::None => rsx! {},
        SetWeightDialog::Set {
            set_number,
            logged,
            weight,
            reps,
            unit,
            ..
        } => {
            rsx! {
                Dialog {
                    title: rsx! { "Set {set_number} weight" },
                    close_event: eh!(close_dialog; { close_dialog(); }),
                    InputField {
                        label: "Weight".to_string(),
                        inputmode: "decimal".to_string(),
                        value: weight.input.clone(),
                        error: if let Err(err) = &weight.validated { err.clone() },
                        has_changed: weight.changed(),
                        oninput: move |event: FormEvent| {
                            if let SetWeightDialog::Set { weight, .. } = &mut *weight_dialog.write() {
                                weight.input = event.value();
                                weight.validated = domain::Load::try_from(weight.input.as_ref())
                                    .map_err(|err| err.to_string());
                            }
                        },
                    }
                    InputField {
                        label: "Reps".to_string(),
                        inputmode: "numeric".to_string(),
                        value: reps.input.clone(),
                        error: if let Err(err) = &reps.validated { err.clone() },
                        has_changed: reps.changed(),
                        oninput: move |event: FormEvent| {
                            if let SetWeightDialog::Set { reps, .. } = &mut *weight_dialog.write() {
                                reps.input = event.value();
                                reps.validated = domain::Reps::try_from(reps.input.as_ref())
                                    .map_err(|err| err.to_string());
                            }
                        },
                    }
                    ButtonSelectField::<domain::WeightUnit> {
                        label: "Unit".to_string(),
                        options: vec![
                            ButtonSelectOption { text: "kg".to_string(), value: domain::WeightUnit::Kg },
                            ButtonSelectOption { text: "lbs".to_string(), value: domain::WeightUnit::Lbs },
                        ],
                        selected: *unit,
                        has_changed: false,
                        onclick: move |(_, value)| {
                            if let SetWeightDialog::Set { unit, .. } = &mut *weight_dialog.write() {
                                *unit = value;
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
                        if logged.is_some() {
                            div {
                                class: "control",
                                onclick: delete.clone(),
                                button {
                                    class: "button is-danger is-soft",
                                    class: if is_loading() { "is-loading" },
                                    "Delete"
                                }
                            }
                        }
                        div {
                            class: "control",
                            onclick: save,
                            button {
                                class: "button is-primary",
                                class: if is_loading() { "is-loading" },
                                disabled: !(weight.valid() && reps.valid()),
                                "Save"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Flip one set flag, mirror a resulting item completion change into the
/// item-level progress and start the rest timer if the completed set was not
/// the item's last one.
async fn toggle_set(
    session_id: domain::SessionID,
    item_index: usize,
    set_index: usize,
    rest: domain::Rest,
    mut item_progress: Signal<Option<web_app::SessionProgress>>,
    mut set_progress: Signal<Option<web_app::SetProgress>>,
    mut timer_control: Signal<TimerControl>,
) {
    let mut set_turned_on = false;
    let mut item_complete = false;
    let mut completion_changed = None;
    {
        let mut guard = set_progress.write();
        if let Some(progress) = guard.as_mut() {
            let was_set = progress
                .sets(item_index)
                .get(set_index)
                .copied()
                .unwrap_or(false);
            completion_changed = progress.toggle_set(item_index, set_index);
            set_turned_on = !was_set;
            item_complete = progress.is_item_complete(item_index);
        }
    }
    if let Some(status) = completion_changed {
        let mut guard = item_progress.write();
        if let Some(progress) = guard.as_mut() {
            progress.set(item_index, status);
        }
    }
    if set_turned_on && !item_complete && !rest.is_zero() {
        timer_control.write().start(u32::from(rest));
    }
    persist_progress(session_id, item_progress, set_progress).await;
}

async fn persist_progress(
    session_id: domain::SessionID,
    item_progress: Signal<Option<web_app::SessionProgress>>,
    set_progress: Signal<Option<web_app::SetProgress>>,
) {
    let item = item_progress.peek().clone();
    let set = set_progress.peek().clone();
    if let Some(progress) = item {
        if let Err(err) = PROGRESS_SERVICE
            .read()
            .set_session_progress(session_id, &progress)
            .await
        {
            NOTIFICATIONS
                .write()
                .push(format!("Failed to save session progress: {err}"));
        }
    }
    if let Some(progress) = set {
        if let Err(err) = PROGRESS_SERVICE
            .read()
            .set_set_progress(session_id, &progress)
            .await
        {
            NOTIFICATIONS
                .write()
                .push(format!("Failed to save set progress: {err}"));
        }
    }
}

enum SetWeightDialog {
    None,
    Set {
        exercise_id: domain::ExerciseID,
        set_number: u32,
        logged: Option<domain::ExerciseWeight>,
        weight: FieldValue<domain::Load>,
        reps: FieldValue<domain::Reps>,
        unit: domain::WeightUnit,
    },
}

async fn complete_all(
    session_id: domain::SessionID,
    item_count: usize,
    mut item_progress: Signal<Option<web_app::SessionProgress>>,
    mut set_progress: Signal<Option<web_app::SetProgress>>,
) {
    {
        let mut guard = item_progress.write();
        if let Some(progress) = guard.as_mut() {
            progress.set_all(true, item_count);
        }
    }
    {
        let mut guard = set_progress.write();
        if let Some(progress) = guard.as_mut() {
            progress.set_all(true);
        }
    }
    persist_progress(session_id, item_progress, set_progress).await;
}

async fn reset_progress(
    session_id: domain::SessionID,
    memorized_session: Memo<Option<domain::Session>>,
    mut item_progress: Signal<Option<web_app::SessionProgress>>,
    mut set_progress: Signal<Option<web_app::SetProgress>>,
) {
    let expected_set_counts = memorized_session
        .peek()
        .as_ref()
        .map(domain::Session::expected_set_counts)
        .unwrap_or_default();
    *item_progress.write() = Some(web_app::SessionProgress::default());
    *set_progress.write() = Some(web_app::SetProgress::new(&expected_set_counts));
    if let Err(err) = PROGRESS_SERVICE.read().delete_progress(session_id).await {
        NOTIFICATIONS
            .write()
            .push(format!("Failed to reset progress: {err}"));
    }
}
