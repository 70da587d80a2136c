use dioxus::prelude::*;

use progress_core::model::{ClearFlow, UserResourceProgressDocument};

use crate::context::AppContext;
use crate::vm::map_learning_progress;

/// Bumped whenever shared stores change so views that read them re-render.
#[derive(Clone, Copy, PartialEq)]
pub struct StoreRevision(Signal<u64>);

impl StoreRevision {
    #[must_use]
    pub fn new() -> Self {
        Self(Signal::new(0))
    }

    /// Reads the revision, subscribing the current component to changes.
    #[must_use]
    pub fn current(&self) -> u64 {
        *self.0.read()
    }

    pub fn bump(&mut self) {
        *self.0.write() += 1;
    }
}

impl Default for StoreRevision {
    fn default() -> Self {
        Self::new()
    }
}

/// Learning-dashboard card with a one-click clear button.
#[component]
pub fn LearningProgressCard(resource: UserResourceProgressDocument) -> Element {
    let ctx = use_context::<AppContext>();
    let vm = map_learning_progress(&resource, &ctx.clock());

    let mut flow = use_signal(ClearFlow::new);
    let revision = try_use_context::<StoreRevision>();

    let clear_service = ctx.clear_progress();
    let clear = use_callback(move |()| {
        let start = flow.write().start_immediate();
        if !start {
            return;
        }
        let mut revision = revision;
        let service = clear_service.clone();
        let document = resource.clone();
        // Show the banner before the request is awaited.
        service.begin_learning_clear();
        if let Some(revision) = revision.as_mut() {
            revision.bump();
        }
        spawn(async move {
            if let Err(err) = service.finish_learning_clear(&document).await {
                tracing::debug!(error = %err, "learning progress kept after failed clear");
            }
            flow.write().settle();
            if let Some(revision) = revision.as_mut() {
                revision.bump();
            }
        });
    });

    #[cfg(test)]
    {
        let path = vm.href.clone();
        use_hook(move || {
            if let Some(handles) = try_consume_context::<crate::components::ClearTestHandles>() {
                handles.register_learning(path, clear);
            }
        });
    }

    rsx! {
        div { class: "learning-progress",
            div { class: "learning-progress__header",
                a { class: "learning-progress__title", href: "{vm.href}", "{vm.title}" }
            }
            div { class: "learning-progress__meta",
                span { class: "learning-progress__fraction", "{vm.fraction_label}" }
                p { class: "learning-progress__updated", "{vm.updated_label}" }
            }
            div { class: "learning-progress__track",
                div { class: "learning-progress__rail",
                    div { class: "learning-progress__bar", style: "{vm.bar_style}" }
                }
            }
            button {
                r#type: "button",
                class: "learning-progress__clear",
                title: "close",
                onclick: move |_| clear.call(()),
                "×"
            }
        }
    }
}

/// Placeholder shown while learning progress loads.
#[component]
pub fn LearningProgressSkeleton() -> Element {
    rsx! {
        div { class: "learning-progress learning-progress--skeleton",
            div { class: "learning-progress__header",
                div { class: "skeleton-bar skeleton-bar--title" }
            }
            div { class: "learning-progress__meta",
                div { class: "skeleton-bar skeleton-bar--quarter" }
                div { class: "skeleton-bar skeleton-bar--quarter" }
            }
            div { class: "learning-progress__track",
                div { class: "learning-progress__rail",
                    div { class: "learning-progress__bar learning-progress__bar--skeleton" }
                }
            }
        }
    }
}
