use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use progress_core::Clock;
use progress_core::model::{ResourceProgress, UserResourceProgressDocument};
use progress_core::time::fixed_now;
use services::{
    AppServices, ClearProgressService, DashboardService, LearningProgressStore, PageLoading,
    ProgressApi,
};
use storage::repository::Storage;

use crate::components::{
    ClearIntent, ClearTestHandles, LearningProgressCard, LearningProgressSkeleton,
    ResourceProgressCard,
};
use crate::context::{UiApp, build_app_context};
use crate::i18n::Translations;
use crate::views::{ActivityView, LearningView};

struct TestApp {
    translations: Arc<Translations>,
    services: AppServices,
}

impl UiApp for TestApp {
    fn clock(&self) -> Clock {
        Clock::fixed(fixed_now())
    }

    fn translations(&self) -> Arc<Translations> {
        Arc::clone(&self.translations)
    }

    fn clear_progress(&self) -> Arc<ClearProgressService> {
        self.services.clear_progress()
    }

    fn dashboard(&self) -> Arc<DashboardService> {
        self.services.dashboard()
    }

    fn learning_store(&self) -> Arc<dyn LearningProgressStore> {
        self.services.learning_store()
    }

    fn page_loading(&self) -> Arc<dyn PageLoading> {
        self.services.page_loading()
    }
}

#[derive(Clone, PartialEq)]
pub enum ViewKind {
    Activity,
    Learning,
    ResourceCard(ResourceProgress),
    LearningCard(UserResourceProgressDocument),
    Skeleton,
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    handles: ClearTestHandles,
    cleared: Rc<Cell<u32>>,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn HarnessRoot(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    let cleared = props.cleared.clone();

    match props.view.clone() {
        ViewKind::Activity => rsx! { ActivityView {} },
        ViewKind::Learning => rsx! { LearningView {} },
        ViewKind::ResourceCard(progress) => rsx! {
            ResourceProgressCard {
                progress,
                on_cleared: move |()| cleared.set(cleared.get() + 1),
            }
        },
        ViewKind::LearningCard(document) => rsx! {
            LearningProgressCard { resource: document }
        },
        ViewKind::Skeleton => rsx! { LearningProgressSkeleton {} },
    }
}

pub struct Harness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub services: AppServices,
    pub handles: ClearTestHandles,
    pub cleared: Rc<Cell<u32>>,
}

impl Harness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Let spawned tasks and resources run to completion.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn resource_intent(&mut self, path: &str, intent: ClearIntent) {
        let dispatch = self.handles.resource_dispatch(path);
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub fn learning_clear(&mut self, path: &str) {
        let clear = self.handles.learning_clear(path);
        self.dom.in_runtime(|| clear.call(()));
        drive_dom(&mut self.dom);
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_harness(view: ViewKind, storage: Storage, api: Arc<dyn ProgressApi>) -> Harness {
    let services = AppServices::from_parts(&storage, api);
    let app = Arc::new(TestApp {
        translations: Arc::new(Translations::english()),
        services: services.clone(),
    });
    let handles = ClearTestHandles::default();
    let cleared = Rc::new(Cell::new(0));

    let dom = VirtualDom::new_with_props(
        HarnessRoot,
        HarnessProps {
            app,
            view,
            handles: handles.clone(),
            cleared: Rc::clone(&cleared),
        },
    );

    Harness {
        dom,
        storage,
        services,
        handles,
        cleared,
    }
}
