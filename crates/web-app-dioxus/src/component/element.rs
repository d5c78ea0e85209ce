use dioxus::prelude::*;
use plotters::style::{Color as PlottersColor, Palette, Palette99};
use strum::Display;

/// Bulma color modifier, rendered into `is-{color}` / `has-text-{color}`
/// class names.
#[allow(dead_code)]
#[derive(Display, Clone, Copy, PartialEq)]
pub enum Color {
    #[strum(to_string = "text")]
    Text,
    #[strum(to_string = "link")]
    Link,
    #[strum(to_string = "primary")]
    Primary,
    #[strum(to_string = "info")]
    Info,
    #[strum(to_string = "success")]
    Success,
    #[strum(to_string = "warning")]
    Warning,
    #[strum(to_string = "danger")]
    Danger,
    #[strum(to_string = "dark")]
    Dark,
}

#[component]
pub fn CenteredBlock(children: Element) -> Element {
    rsx! {
        div { class: "block has-text-centered", {children} }
    }
}

#[component]
pub fn Loading() -> Element {
    rsx! {
        div {
            class: "is-size-4 has-text-centered",
            i { class: "fas fa-spinner fa-pulse" }
        }
    }
}

#[component]
pub fn LoadingPage() -> Element {
    rsx! {
        div {
            class: "is-size-2 has-text-centered m-6",
            i { class: "fas fa-spinner fa-pulse" }
        }
    }
}

#[component]
pub fn Error(message: String) -> Element {
    rsx! {
        IconText { icon: "triangle-exclamation", text: message, color: Color::Danger }
    }
}

#[component]
pub fn ErrorMessage(message: String) -> Element {
    rsx! {
        div {
            class: "message is-danger mx-2",
            div {
                class: "message-body has-text-dark",
                div {
                    class: "title has-text-danger is-size-4",
                    "{message}"
                }
            }
        }
    }
}

#[component]
pub fn NotFound(element: String) -> Element {
    rsx! {
        ErrorMessage { message: "{element} not found" }
    }
}

#[component]
pub fn NoData() -> Element {
    rsx! {
        div {
            class: "block is-size-7 has-text-centered has-text-grey-light mb-6",
            "No data"
        }
    }
}

#[component]
pub fn NoConnection() -> Element {
    rsx! {
        div {
            class: "block has-text-centered has-text-grey-light mb-6",
            IconText { icon: "plug-circle-xmark", text: "No connection to server" }
        }
    }
}

#[component]
pub fn Icon(
    name: String,
    is_small: Option<bool>,
    px: Option<u8>,
    onclick: Option<EventHandler<MouseEvent>>,
) -> Element {
    rsx! {
        span {
            class: "icon",
            class: if is_small.unwrap_or_default() { "is-small" },
            class: if let Some(px) = px { "px-{px}" },
            onclick: move |event| {
                if let Some(onclick) = onclick {
                    onclick.call(event);
                }
            },
            i { class: "fas fa-{name}" }
        }
    }
}

#[component]
pub fn IconText(
    icon: String,
    text: String,
    color: Option<Color>,
    onclick: Option<EventHandler<MouseEvent>>,
) -> Element {
    rsx! {
        span {
            class: "icon-text",
            class: if let Some(color) = color { "has-text-{color}" },
            onclick: move |event| {
                if let Some(onclick) = onclick {
                    onclick.call(event);
                }
            },
            Icon { name: icon }
            span { {text} }
        }
    }
}

#[component]
pub fn ElementWithDescription(
    children: Element,
    description: String,
    right_aligned: Option<bool>,
) -> Element {
    rsx! {
        div {
            class: "dropdown is-hoverable",
            class: if right_aligned.unwrap_or_default() { "is-right" },
            div {
                class: "dropdown-trigger",
                div {
                    class: "control is-clickable",
                    {children}
                }
            }
            if !description.is_empty() {
                div {
                    class: "dropdown-menu has-no-min-width",
                    div {
                        class: "dropdown-content",
                        div {
                            class: "dropdown-item",
                            "{description}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn FloatingActionButton(icon: String, onclick: EventHandler<MouseEvent>) -> Element {
    rsx! {
        button {
            class: "button is-fab is-medium is-link",
            onclick,
            Icon { name: icon }
        }
    }
}

#[component]
pub fn Dialog(
    children: Element,
    title: Option<Element>,
    close_event: EventHandler<MouseEvent>,
    color: Option<Color>,
) -> Element {
    let color = color.unwrap_or(Color::Primary);
    rsx! {
        div {
            class: "modal is-active",
            div {
                class: "modal-background",
                onclick: close_event
            }
            div {
                class: "modal-content",
                div {
                    class: "message is-{color} mx-2",
                    div {
                        class: "message-body has-text-text-bold has-background-scheme-main",
                        if let Some(title) = title {
                            div {
                                class: "title has-text-{color}",
                                {title}
                            }
                        }
                        {children}
                    }
                }
            }
            button {
                aria_label: "close",
                class: "modal-close",
                onclick: close_event,
            }
        }
    }
}

#[component]
pub fn DeleteConfirmationDialog(
    element_type: String,
    element_name: Element,
    delete_event: EventHandler<MouseEvent>,
    cancel_event: EventHandler<MouseEvent>,
    is_loading: bool,
) -> Element {
    rsx! {
        Dialog {
            title: rsx! {
                span {
                    "Delete the {element_type} "
                    {element_name}
                    "?"
                }
            },
            close_event: move |event| cancel_event.call(event),
            color: Color::Danger,
            div {
                class: "block",
                "The {element_type} and all elements that depend on it will be permanently deleted."
            }
            div {
                class: "field is-grouped is-grouped-centered",
                div {
                    class: "control",
                    onclick: move |event| cancel_event.call(event),
                    button {
                        class: "button is-light is-soft",
                        "No"
                    }
                }
                div {
                    class: "control",
                    onclick: move |event| delete_event.call(event),
                    button {
                        class: "button is-danger",
                        class: if is_loading { "is-loading" },
                        "Yes, delete {element_type}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn Title(title: String, class: Option<String>) -> Element {
    rsx! {
        CenteredBlock {
            div {
                class: "container",
                h1 {
                    class: "title is-5",
                    class: if let Some(c) = &class { "{c}" },
                    "{title}"
                }
            }
        }
    }
}

#[component]
pub fn Table(head: Option<Vec<Element>>, body: Vec<Vec<Element>>) -> Element {
    rsx! {
        div {
            class: "table-container mt-4",
            table {
                class: "table is-fullwidth is-hoverable",
                if let Some(head) = head {
                    thead {
                        tr {
                            for element in head {
                                th {
                                    {element}
                                }
                            }
                        }
                    }
                }
                tbody {
                    for row in body {
                        tr {
                            for element in row {
                                td {
                                    {element}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn OptionsMenu(options: Vec<Element>, close_event: EventHandler<MouseEvent>) -> Element {
    rsx! {
        div {
            class: "modal is-active",
            div {
                class: "modal-background",
                onclick: move |event| close_event.call(event),
            }
            div {
                class: "modal-content",
                div {
                    class: "box mx-2 py-3",
                    for option in options {
                        {option}
                    }
                    button {
                        aria_label: "close",
                        class: "modal-close",
                        onclick: move |event| close_event.call(event),
                    }
                }
            }
        }
    }
}

#[component]
pub fn MenuOption(icon: String, text: String, onclick: EventHandler<MouseEvent>) -> Element {
    rsx! {
        p {
            class: "py-2",
            a {
                class: "has-text-weight-bold",
                onclick: move |event| onclick.call(event),
                IconText { icon, text }
            }
        }
    }
}

#[component]
pub fn SearchBox(search_term: String, oninput: EventHandler<FormEvent>) -> Element {
    rsx! {
        div {
            class: "control has-icons-left is-flex-grow-1",
            span {
                class: "icon is-left",
                i { class: "fas fa-search" }
            }
            input {
                class: "input",
                r#type: "text",
                value: search_term,
                oninput,
            }
        }
    }
}

/// Legend plus a pre-rendered SVG. `chart` carries the rendering result:
/// `Ok(None)` means there was nothing to plot.
#[component]
pub fn Chart(
    labels: Vec<ChartLabel>,
    chart: Result<Option<String>, String>,
    no_data_label: bool,
) -> Element {
    match chart {
        Ok(None) if no_data_label => rsx! { NoData {} },
        Ok(None) => rsx! {},
        Ok(Some(svg)) => rsx! {
            div {
                class: "container has-text-centered",
                h1 {
                    class: "is-size-6 has-text-weight-bold",
                    for label in &labels {
                        {
                            let color = legend_color(label);
                            rsx! {
                                span {
                                    class: "icon-text mx-1",
                                    span {
                                        class: "icon",
                                        style: "color:{color}",
                                        i { class: "fas fa-square" }
                                    }
                                    span { "{label.name}" }
                                }
                            }
                        }
                    }
                }
                div {
                    dangerous_inner_html: svg,
                }
            }
        },
        Err(err) => rsx! { Error { message: err } },
    }
}

/// CSS color matching the palette color the line was plotted with.
fn legend_color(label: &ChartLabel) -> String {
    let plotters::style::RGBAColor(r, g, b, a) = Palette99::pick(label.color).mix(label.opacity);
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    let a = (a * 255.0) as u8;
    format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
}

#[derive(Clone, PartialEq)]
pub struct ChartLabel {
    pub name: String,
    pub color: usize,
    pub opacity: f64,
}

#[component]
pub fn NoWrap(children: Element) -> Element {
    rsx! {
        span { style: "white-space:nowrap", {children} }
    }
}
