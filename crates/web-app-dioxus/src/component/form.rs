use dioxus::prelude::*;

#[component]
pub fn InputField(
    label: Option<String>,
    help: Option<String>,
    left_icon: Option<Element>,
    right_icon: Option<Element>,
    r#type: Option<String>,
    inputmode: Option<String>,
    size: Option<usize>,
    min: Option<String>,
    max: Option<String>,
    step: Option<usize>,
    value: String,
    error: Option<String>,
    has_changed: bool,
    has_text_right: Option<bool>,
    is_disabled: Option<bool>,
    oninput: EventHandler<FormEvent>,
) -> Element {
    // An empty error string means "invalid but nothing to show yet".
    let error = error.filter(|error| !error.is_empty());
    let has_error = error.is_some();
    rsx! {
        div {
            class: "field",
            if let Some(label) = label { label { class: "label", "{label}" } }
            div {
                class: "control",
                class: if left_icon.is_some() { "has-icons-left" },
                class: if right_icon.is_some() { "has-icons-right" },
                input {
                    class: "input",
                    class: if has_error { "is-danger" },
                    class: if has_changed { "is-info" },
                    class: if has_text_right.unwrap_or_default() { "has-text-right" },
                    disabled: if let Some(is_disabled) = is_disabled { is_disabled },
                    r#type: if let Some(r#type) = r#type { r#type } else { "text" },
                    inputmode: if let Some(inputmode) = inputmode { inputmode },
                    size: if let Some(size) = size { size },
                    min: if let Some(min) = min { min },
                    max: if let Some(max) = max { max },
                    step: if let Some(step) = step { step },
                    value: "{value}",
                    oninput,
                }
                if let Some(ref left_icon) = left_icon {
                    span {
                        class: "icon is-left",
                        {left_icon}
                    }
                }
                if let Some(ref right_icon) = right_icon {
                    span {
                        class: "icon is-right",
                        {right_icon}
                    }
                }
            }
            if let Some(ref error) = error {
                p { class: "help is-danger", "{error}" }
            } else if let Some(ref help) = help {
                p { class: "help", "{help}" }
            }
        }
    }
}

#[component]
pub fn SelectField(
    label: String,
    options: Vec<Element>,
    has_changed: bool,
    onchange: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        div {
            class: "field",
            label { class: "label", "{label}" }
            div {
                class: "control",
                div {
                    class: "select",
                    select {
                        class: if has_changed { "has-text-info" },
                        onchange,
                        for option in options {
                            {option}
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn SelectOption(text: String, value: String, selected: bool) -> Element {
    rsx! {
        option {
            selected,
            value,
            "{text}"
        }
    }
}

/// A row of mutually exclusive buttons, used where a select would hide the
/// few possible values behind a click.
#[component]
pub fn ButtonSelectField<T: Clone + PartialEq + 'static>(
    label: String,
    options: Vec<ButtonSelectOption<T>>,
    selected: T,
    error: Option<String>,
    has_changed: bool,
    onclick: EventHandler<(MouseEvent, T)>,
) -> Element {
    let error = error.filter(|error| !error.is_empty());
    let has_error = error.is_some();
    rsx! {
        div {
            class: "field",
            label { class: "label", "{label}" }
            div {
                class: "field has-addons",
                for option in options {
                    div {
                        class: "control",
                        div {
                            class: "button",
                            class: if option.value == selected && has_error { "is-danger" },
                            class: if option.value == selected && !has_error { "is-link" },
                            class: if option.value != selected && has_changed { "is-link is-outlined" },
                            onclick: {
                                let value = option.value.clone();
                                move |event| {
                                    let value = value.clone();
                                    onclick((event, value));
                                }
                            },
                            {option.text}
                        }
                    }
                }
            }
            if let Some(ref error) = error {
                p { class: "help is-danger", "{error}" }
            }
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct ButtonSelectOption<T> {
    pub text: String,
    pub value: T,
}

/// A form field's raw input together with its validation result and the
/// value the field started out with, for change detection.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue<T> {
    pub input: String,
    pub validated: Result<T, String>,
    pub orig: String,
}

impl<T> Default for FieldValue<T> {
    /// An empty field is invalid but shows no error message.
    fn default() -> Self {
        Self {
            input: String::new(),
            validated: Err(String::new()),
            orig: String::new(),
        }
    }
}

impl<T: ToString> FieldValue<T> {
    pub fn new(value: T) -> Self {
        let input = value.to_string();
        Self {
            orig: input.clone(),
            input,
            validated: Ok(value),
        }
    }
}

impl<T: ToString> FieldValue<Option<T>> {
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => {
                let input = value.to_string();
                Self {
                    orig: input.clone(),
                    input,
                    validated: Ok(Some(value)),
                }
            }
            None => Self {
                input: String::new(),
                validated: Ok(None),
                orig: String::new(),
            },
        }
    }
}

impl FieldValue<()> {
    /// True when at least one field differs from its original value and
    /// none of the fields is invalid, gating a form's save button.
    pub fn has_valid_changes(values: &[&dyn FieldValueState]) -> bool {
        values.iter().any(|v| v.changed()) && values.iter().all(|v| v.valid())
    }
}

pub trait FieldValueState {
    fn valid(&self) -> bool;
    fn changed(&self) -> bool;
}

impl<T> FieldValueState for FieldValue<T> {
    fn valid(&self) -> bool {
        self.validated.is_ok()
    }

    fn changed(&self) -> bool {
        self.input.trim() != self.orig.trim()
    }
}
