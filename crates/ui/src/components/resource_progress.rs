use dioxus::prelude::*;

use progress_core::model::{ClearFlow, ClearPhase, ResourceProgress};

use crate::context::AppContext;
use crate::vm::{ClearLabels, map_resource_progress};

/// Shown when clearing fails; the control drops back to its idle state.
pub const CLEAR_FAILED_ALERT: &str = "Error clearing progress. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearIntent {
    /// "Clear progress" pressed.
    Request,
    /// "Yes" pressed on the confirmation prompt.
    Confirm,
    /// "No" pressed on the confirmation prompt.
    Cancel,
}

/// Activity card: progress bar, status counts and a confirm-gated clear action.
#[component]
pub fn ResourceProgressCard(progress: ResourceProgress, on_cleared: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let translations = ctx.translations();
    let vm = map_resource_progress(&progress, &translations, &ctx.clock());
    let labels = ClearLabels::from_translations(&translations);

    let mut flow = use_signal(ClearFlow::new);
    let mut alert = use_signal(|| None::<&'static str>);

    let clear_service = ctx.clear_progress();
    let resource = progress.resource();
    let dispatch = use_callback(move |intent: ClearIntent| match intent {
        ClearIntent::Request => {
            alert.set(None);
            flow.write().request_clear();
        }
        ClearIntent::Cancel => flow.write().cancel(),
        ClearIntent::Confirm => {
            let send = flow.write().confirm();
            if !send {
                return;
            }
            let service = clear_service.clone();
            let resource = resource.clone();
            spawn(async move {
                let result = service.clear_resource(&resource).await;
                flow.write().settle();
                match result {
                    Ok(()) => on_cleared.call(()),
                    Err(_) => alert.set(Some(CLEAR_FAILED_ALERT)),
                }
            });
        }
    });

    #[cfg(test)]
    {
        let path = vm.href.clone();
        use_hook(move || {
            if let Some(handles) = try_consume_context::<crate::components::ClearTestHandles>() {
                handles.register_resource(path, dispatch);
            }
        });
    }

    let phase = flow.read().phase();
    let clearing = phase == ClearPhase::Clearing;

    rsx! {
        div { class: "resource-progress",
            a { class: "resource-progress__link", href: "{vm.href}",
                span { class: "resource-progress__bar", style: "{vm.bar_style}" }
                span { class: "resource-progress__title", "{vm.title}" }
                span {
                    class: "resource-progress__updated",
                    title: "{vm.updated_at_str}",
                    "{vm.updated_label}"
                }
            }
            p { class: "resource-progress__footer",
                span { class: "resource-progress__counts",
                    for segment in vm.segments.iter() {
                        span { "{segment}" }
                        " • "
                    }
                    span { "{vm.total_label}" }
                }
                if phase == ClearPhase::Confirming {
                    span { class: "resource-progress__confirm",
                        "{labels.are_you_sure} "
                        button {
                            r#type: "button",
                            class: "resource-progress__action resource-progress__action--yes",
                            onclick: move |_| dispatch.call(ClearIntent::Confirm),
                            "{labels.yes}"
                        }
                        " "
                        button {
                            r#type: "button",
                            class: "resource-progress__action",
                            onclick: move |_| dispatch.call(ClearIntent::Cancel),
                            "{labels.no}"
                        }
                    }
                } else {
                    button {
                        r#type: "button",
                        class: "resource-progress__clear",
                        disabled: clearing,
                        onclick: move |_| dispatch.call(ClearIntent::Request),
                        if clearing {
                            "{labels.processing}"
                        } else {
                            "{labels.clear} "
                            span { "×" }
                        }
                    }
                }
            }
            if let Some(message) = alert() {
                p { class: "resource-progress__alert", role: "alert", "{message}" }
            }
        }
    }
}
