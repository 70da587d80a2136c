use std::sync::Arc;

use progress_core::Clock;
use services::{ClearProgressService, DashboardService, LearningProgressStore, PageLoading};

use crate::i18n::Translations;

pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;
    fn translations(&self) -> Arc<Translations>;

    fn clear_progress(&self) -> Arc<ClearProgressService>;
    fn dashboard(&self) -> Arc<DashboardService>;
    fn learning_store(&self) -> Arc<dyn LearningProgressStore>;
    fn page_loading(&self) -> Arc<dyn PageLoading>;
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    translations: Arc<Translations>,

    clear_progress: Arc<ClearProgressService>,
    dashboard: Arc<DashboardService>,
    learning_store: Arc<dyn LearningProgressStore>,
    page_loading: Arc<dyn PageLoading>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            translations: app.translations(),
            clear_progress: app.clear_progress(),
            dashboard: app.dashboard(),
            learning_store: app.learning_store(),
            page_loading: app.page_loading(),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn translations(&self) -> Arc<Translations> {
        Arc::clone(&self.translations)
    }

    #[must_use]
    pub fn clear_progress(&self) -> Arc<ClearProgressService> {
        Arc::clone(&self.clear_progress)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn learning_store(&self) -> Arc<dyn LearningProgressStore> {
        Arc::clone(&self.learning_store)
    }

    #[must_use]
    pub fn page_loading(&self) -> Arc<dyn PageLoading> {
        Arc::clone(&self.page_loading)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
