use chrono::{Local, NaiveDate};
use dioxus::prelude::*;

use vigor_domain as domain;
use vigor_domain::ProfileService;
use vigor_domain::WeightService;
use vigor_web_app as web_app;
use vigor_web_app::{Settings, SettingsService};

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NO_CONNECTION, NOTIFICATIONS, Route, WEB_APP_SERVICE,
    component::{
        element::{
            Chart, ChartLabel, DeleteConfirmationDialog, Dialog, ErrorMessage,
            FloatingActionButton, Icon, IconText, LoadingPage, MenuOption, NoConnection, NoWrap,
            OptionsMenu, Table,
        },
        form::{ButtonSelectField, ButtonSelectOption, FieldValue, FieldValueState, InputField},
    },
    eh, ensure_session, signal_changed_data,
};

#[component]
pub fn BodyWeight(add: bool) -> Element {
    ensure_session!();

    let entries = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_weight_entries().await
    });
    let settings = use_resource(|| async { WEB_APP_SERVICE.read().get_settings().await });
    let mut dialog = use_signal(|| WeightDialog::None);

    let mut show_add_dialog = move || {
        let unit = if let Some(Ok(settings)) = &*settings.peek() {
            settings.weight_unit
        } else {
            domain::WeightUnit::default()
        };
        let mut date = FieldValue::new(Local::now().date_naive());
        date.validated = DOMAIN_SERVICE
            .read()
            .validate_weight_date(&date.input)
            .map_err(|err| err.to_string());
        *dialog.write() = WeightDialog::Add {
            date,
            weight: FieldValue::default(),
            unit,
            notes: String::new(),
        };
        navigator().replace(Route::BodyWeight { add: true });
    };

    use_future(move || async move {
        if add {
            show_add_dialog();
        }
    });

    match &*entries.read() {
        Some(Ok(entries)) => {
            rsx! {
                {view_chart(entries, settings)}
                {view_trend(entries)}
                {view_table(entries, dialog)}
                {view_dialog(dialog)}
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

fn view_chart(
    entries: &[domain::WeightEntry],
    settings: Resource<Result<Settings, String>>,
) -> Element {
    let interval = web_app::chart::Interval {
        first: entries.iter().map(|e| e.date).min().unwrap_or_default(),
        last: entries.iter().map(|e| e.date).max().unwrap_or_default(),
    };
    let values = entries
        .iter()
        .map(|e| (e.date, e.weight_in_kg()))
        .collect::<Vec<_>>();
    rsx! {
        Chart {
            labels: vec![
                ChartLabel {
                    name: "Weight (kg)".to_string(),
                    color: web_app::chart::COLOR_BODY_WEIGHT,
                    opacity: web_app::chart::OPACITY_LINE,
                },
            ],
            chart: web_app::chart::plot_line(
                &values,
                &interval,
                web_app::chart::COLOR_BODY_WEIGHT,
                &if let Some(Ok(settings)) = &*settings.read() {
                    settings.current_theme()
                } else {
                    web_app::Theme::Light
                },
            )
            .map_err(|err| err.to_string()),
            no_data_label: true,
        }
    }
}

fn view_trend(entries: &[domain::WeightEntry]) -> Element {
    let (icon, text) = match DOMAIN_SERVICE.read().weight_trend(entries) {
        domain::WeightTrend::Increasing => ("arrow-trend-up", "Trending up"),
        domain::WeightTrend::Decreasing => ("arrow-trend-down", "Trending down"),
        domain::WeightTrend::Stable => ("arrows-left-right", "Stable"),
        domain::WeightTrend::InsufficientData => return rsx! {},
    };
    rsx! {
        div {
            class: "block has-text-centered",
            IconText { icon: icon.to_string(), text: text.to_string() }
        }
    }
}

fn view_table(entries: &[domain::WeightEntry], mut dialog: Signal<WeightDialog>) -> Element {
    let mut entries = entries.to_vec();
    entries.sort_by(|a, b| b.date.cmp(&a.date));

    let head = vec![
        rsx! { "Date" },
        rsx! { "Weight" },
        rsx! { "Notes" },
        rsx! {},
    ];

    let body = entries
        .into_iter()
        .map(|entry| {
            let date = entry.date;
            let weight = entry.weight;
            let unit = entry.unit;
            let notes = entry.notes.clone();
            vec![
                rsx! { NoWrap { "{date}" } },
                rsx! { NoWrap { "{weight:.1} {unit}" } },
                rsx! {
                    if let Some(notes) = &notes {
                        "{notes}"
                    } else {
                        "-"
                    }
                },
                rsx! {
                    a {
                        class: "mx-2",
                        onclick: move |_| { *dialog.write() = WeightDialog::Options(entry.clone()); },
                        Icon { name: "ellipsis-vertical"}
                    }
                },
            ]
        })
        .collect::<Vec<_>>();

    rsx! {
        Table { head, body }
    }
}

fn view_dialog(mut dialog: Signal<WeightDialog>) -> Element {
    let mut is_loading = use_signal(|| false);

    let close_dialog = move || {
        *dialog.write() = WeightDialog::None;
        navigator().replace(Route::BodyWeight { add: false });
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
                    WeightDialog::Add { date, weight, unit, notes } => {
                        if let (Ok(date), Ok(weight)) =
                            (date.validated.clone(), weight.validated.clone())
                        {
                            let notes = if notes.trim().is_empty() {
                                None
                            } else {
                                Some(notes.trim().to_string())
                            };
                            match DOMAIN_SERVICE
                                .read()
                                .create_weight_entry(date, weight, *unit, notes)
                                .await
                            {
                                Ok(_) => {
                                    saved = true;
                                    signal_changed_data();
                                }
                                Err(err) => {
                                    NOTIFICATIONS
                                        .write()
                                        .push(format!("Failed to add weight entry: {err}"));
                                }
                            }
                        }
                    }
                    WeightDialog::Edit { entry, date, weight, unit, notes } => {
                        if let (Ok(date), Ok(weight)) =
                            (date.validated.clone(), weight.validated.clone())
                        {
                            let entry = domain::WeightEntry {
                                id: entry.id,
                                date,
                                weight,
                                unit: *unit,
                                notes: if notes.trim().is_empty() {
                                    None
                                } else {
                                    Some(notes.trim().to_string())
                                },
                            };
                            match DOMAIN_SERVICE.read().replace_weight_entry(entry).await {
                                Ok(_) => {
                                    saved = true;
                                    signal_changed_data();
                                }
                                Err(err) => {
                                    NOTIFICATIONS
                                        .write()
                                        .push(format!("Failed to edit weight entry: {err}"));
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
    });
    let delete = eh!(close_dialog; {
        async move {
            let mut deleted = false;
            is_loading! {
                if let WeightDialog::Delete(entry) = &*dialog.read() {
                    match DOMAIN_SERVICE.read().delete_weight_entry(entry.id).await {
                        Ok(_) => {
                            deleted = true;
                            signal_changed_data();
                        },
                        Err(err) => NOTIFICATIONS.write().push(format!("Failed to delete weight entry: {err}"))
                    }
                }
            }
            if deleted {
                close_dialog();
            }
        }
    });

    match &*dialog.read() {
        WeightDialog::None => rsx! {},
        WeightDialog::Options(entry) => {
            let entry_edit = entry.clone();
            let entry_delete = entry.clone();
            rsx! {
                OptionsMenu {
                    options: vec![
                        rsx! {
                            MenuOption {
                                icon: "edit".to_string(),
                                text: "Edit weight entry".to_string(),
                                onclick: move |_| {
                                    *dialog.write() = WeightDialog::Edit {
                                        date: FieldValue::new(entry_edit.date),
                                        weight: FieldValue::new(entry_edit.weight),
                                        unit: entry_edit.unit,
                                        notes: entry_edit.notes.clone().unwrap_or_default(),
                                        entry: entry_edit.clone(),
                                    };
                                }
                            },
                            MenuOption {
                                icon: "times".to_string(),
                                text: "Delete weight entry".to_string(),
                                onclick: move |_| { *dialog.write() = WeightDialog::Delete(entry_delete.clone()); }
                            },
                        },
                    ],
                    close_event: eh!(close_dialog; { close_dialog(); })
                }
            }
        }
        WeightDialog::Add {
            date,
            weight,
            unit,
            notes,
        }
        | WeightDialog::Edit {
            date,
            weight,
            unit,
            notes,
            ..
        } => {
            let unchanged = if let WeightDialog::Edit { entry, .. } = &*dialog.read() {
                !date.changed()
                    && !weight.changed()
                    && *unit == entry.unit
                    && notes.trim() == entry.notes.as_deref().unwrap_or_default().trim()
            } else {
                false
            };
            let unit_changed = if let WeightDialog::Edit { entry, .. } = &*dialog.read() {
                *unit != entry.unit
            } else {
                false
            };
            rsx! {
                Dialog {
                    title: rsx! { if let WeightDialog::Add { .. } = &*dialog.read() { "Add weight entry" } else { "Edit weight entry" } },
                    close_event: eh!(close_dialog; { close_dialog(); }),
                    InputField {
                        label: "Date".to_string(),
                        r#type: "date".to_string(),
                        max: Local::now().date_naive().to_string(),
                        value: date.input.clone(),
                        error: if let Err(err) = &date.validated { err.clone() },
                        has_changed: date.changed(),
                        oninput: move |event: FormEvent| {
                            if let WeightDialog::Add { date, .. }
                            | WeightDialog::Edit { date, .. } = &mut *dialog.write()
                            {
                                date.input = event.value();
                                date.validated = DOMAIN_SERVICE
                                    .read()
                                    .validate_weight_date(&date.input)
                                    .map_err(|err| err.to_string());
                            }
                        },
                    }
                    InputField {
                        label: "Weight".to_string(),
                        inputmode: "decimal".to_string(),
                        value: weight.input.clone(),
                        error: if let Err(err) = &weight.validated { err.clone() },
                        has_changed: weight.changed(),
                        oninput: move |event: FormEvent| {
                            if let WeightDialog::Add { weight, .. }
                            | WeightDialog::Edit { weight, .. } = &mut *dialog.write()
                            {
                                weight.input = event.value();
                                weight.validated =
                                    domain::BodyWeight::try_from(weight.input.as_ref())
                                        .map_err(|err| err.to_string());
                            }
                        }
                    }
                    ButtonSelectField::<domain::WeightUnit> {
                        label: "Unit".to_string(),
                        options: vec![
                            ButtonSelectOption { text: "kg".to_string(), value: domain::WeightUnit::Kg },
                            ButtonSelectOption { text: "lbs".to_string(), value: domain::WeightUnit::Lbs },
                        ],
                        selected: *unit,
                        has_changed: unit_changed,
                        onclick: move |(_, value)| {
                            if let WeightDialog::Add { unit, .. }
                            | WeightDialog::Edit { unit, .. } = &mut *dialog.write()
                            {
                                *unit = value;
                            }
                        },
                    }
                    InputField {
                        label: "Notes".to_string(),
                        help: "Optional".to_string(),
                        value: notes.clone(),
                        has_changed: false,
                        oninput: move |event: FormEvent| {
                            if let WeightDialog::Add { notes, .. }
                            | WeightDialog::Edit { notes, .. } = &mut *dialog.write()
                            {
                                *notes = event.value();
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
                                disabled: !(date.valid() && weight.valid()) || unchanged,
                                "Save"
                            }
                        }
                    }
                }
            }
        }
        WeightDialog::Delete(entry) => rsx! {
            DeleteConfirmationDialog {
                element_type: "weight entry".to_string(),
                element_name: rsx! { span { "of " NoWrap { "{entry.date}" } } },
                delete_event: delete.clone(),
                cancel_event: eh!(close_dialog; { close_dialog(); }),
                is_loading: is_loading(),
            }
        },
    }
}

enum WeightDialog {
    None,
    Options(domain::WeightEntry),
    Add {
        date: FieldValue<NaiveDate>,
        weight: FieldValue<domain::BodyWeight>,
        unit: domain::WeightUnit,
        notes: String,
    },
    Edit {
        entry: domain::WeightEntry,
        date: FieldValue<NaiveDate>,
        weight: FieldValue<domain::BodyWeight>,
        unit: domain::WeightUnit,
        notes: String,
    },
    Delete(domain::WeightEntry),
}
