use dioxus::prelude::*;

use vigor_domain as domain;
use vigor_domain::ProfileService;
use vigor_domain::ExerciseService;
use vigor_web_app as web_app;

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NO_CONNECTION, Route,
    component::element::{
        CenteredBlock, ErrorMessage, FloatingActionButton, IconText, LoadingPage, NoConnection,
        Title,
    },
    eh, ensure_session, page,
};

/// Base path of the image CDN, served by the reverse proxy.
const CDN_BASE: &str = "media";

#[component]
pub fn Exercise(id: domain::ExerciseID) -> Element {
    ensure_session!();

    let exercise = use_resource(move || async move {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_exercise(id).await
    });
    let mut dialog = use_signal(|| page::exercises::ExerciseDialog::None);

    match &*exercise.read() {
        Some(Ok(exercise)) => {
            rsx! {
                Title { title: "{exercise.name}" }
                CenteredBlock {
                    img {
                        class: "exercise-image",
                        src: web_app::image::image_url(
                            CDN_BASE,
                            &exercise.image_key,
                            web_app::image::ImageSize::Md,
                        ),
                        srcset: web_app::image::image_src_set(CDN_BASE, &exercise.image_key),
                        sizes: "(max-width: 768px) 100vw, 768px",
                        alt: "{exercise.name}",
                    }
                }
                div {
                    class: "tags is-centered m-2",
                    span { class: "tag is-link", "{exercise.mode}" }
                }
                if let Some(notes) = &exercise.notes {
                    div {
                        class: "block mx-4 content",
                        p { "{notes}" }
                    }
                }
                CenteredBlock {
                    Link {
                        to: Route::ExerciseProgression { id },
                        IconText { icon: "chart-line".to_string(), text: "Progression".to_string() }
                    }
                }
                {page::exercises::view_dialog(dialog, None)}
                FloatingActionButton {
                    icon: "edit".to_string(),
                    onclick: eh!(exercise; {
                        *dialog.write() = page::exercises::ExerciseDialog::Options(exercise.clone());
                    }),
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
