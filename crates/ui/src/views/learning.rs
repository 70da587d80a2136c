use dioxus::prelude::*;

use crate::components::{LearningProgressCard, LearningProgressSkeleton, StoreRevision};
use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};

const SKELETON_COUNT: usize = 3;

#[component]
pub fn LearningView() -> Element {
    let ctx = use_context::<AppContext>();
    let revision = use_context_provider(StoreRevision::default);
    let dashboard = ctx.dashboard();

    let mut resource = use_resource(move || {
        let dashboard = dashboard.clone();
        async move {
            dashboard
                .load_learning_progress()
                .await
                .map(|_| ())
                .map_err(|_| ViewError::Unknown)
        }
    });

    let state = view_state_from_resource(resource);

    // Store and banner are read on every revision bump.
    let _ = revision.current();
    let documents = ctx.learning_store().list();
    let loading_message = ctx.page_loading().message();

    rsx! {
        div { class: "page",
            h2 { "Learning progress" }

            if let Some(message) = loading_message {
                div { class: "page-loading", role: "status", "{message}" }
            }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    div { class: "learning-grid",
                        for i in 0..SKELETON_COUNT {
                            LearningProgressSkeleton { key: "{i}" }
                        }
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if documents.is_empty() {
                        p { "No learning progress yet." }
                    } else {
                        div { class: "learning-grid",
                            for document in documents {
                                LearningProgressCard {
                                    key: "{document.resource().progress_key()}",
                                    resource: document.clone(),
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        r#type: "button",
                        onclick: move |_| resource.restart(),
                        "Retry"
                    }
                },
            }
        }
    }
}
