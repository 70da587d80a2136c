use dioxus::prelude::*;
use progress_core::model::ResourceProgress;
use services::UserActivity;

use crate::components::ResourceProgressCard;
use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn ActivityView() -> Element {
    let ctx = use_context::<AppContext>();
    let dashboard = ctx.dashboard();

    let mut resource = use_resource(move || {
        let dashboard = dashboard.clone();
        async move {
            dashboard
                .load_activity()
                .await
                .map_err(|_| ViewError::Unknown)
        }
    });

    let state: ViewState<UserActivity> = view_state_from_resource(resource);
    let on_cleared = move |()| resource.restart();

    rsx! {
        div { class: "page",
            h2 { "Activity" }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(activity) => rsx! {
                    ProgressSection {
                        heading: "Roadmaps",
                        items: activity.learning.roadmaps,
                        on_cleared,
                    }
                    ProgressSection {
                        heading: "Best Practices",
                        items: activity.learning.best_practices,
                        on_cleared,
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

#[component]
fn ProgressSection(
    heading: &'static str,
    items: Vec<ResourceProgress>,
    on_cleared: EventHandler<()>,
) -> Element {
    if items.is_empty() {
        return rsx! {};
    }
    rsx! {
        section { class: "progress-section",
            h3 { "{heading}" }
            div { class: "progress-list",
                for progress in items {
                    ResourceProgressCard {
                        key: "{progress.resource().progress_key()}",
                        progress: progress.clone(),
                        on_cleared,
                    }
                }
            }
        }
    }
}
