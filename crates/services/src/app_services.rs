use std::sync::Arc;

use storage::repository::Storage;

use crate::clear_progress_service::ClearProgressService;
use crate::dashboard_service::DashboardService;
use crate::error::AppServicesError;
use crate::progress_api::{ApiConfig, HttpProgressApi, ProgressApi};
use crate::stores::{InMemoryLearningStore, LearningProgressStore, PageLoading, PageLoadingMessage};

/// Assembles app-facing services around one API and one storage backend.
#[derive(Clone)]
pub struct AppServices {
    clear_progress: Arc<ClearProgressService>,
    dashboard: Arc<DashboardService>,
    learning_store: Arc<dyn LearningProgressStore>,
    page_loading: Arc<dyn PageLoading>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the HTTP API.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, api: ApiConfig) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_parts(&storage, Arc::new(HttpProgressApi::new(api))))
    }

    #[must_use]
    pub fn from_parts(storage: &Storage, api: Arc<dyn ProgressApi>) -> Self {
        let learning_store: Arc<dyn LearningProgressStore> = Arc::new(InMemoryLearningStore::new());
        let page_loading: Arc<dyn PageLoading> = Arc::new(PageLoadingMessage::new());

        let clear_progress = Arc::new(ClearProgressService::new(
            Arc::clone(&api),
            Arc::clone(&storage.progress_cache),
            Arc::clone(&learning_store),
            Arc::clone(&page_loading),
        ));
        let dashboard = Arc::new(DashboardService::new(api, Arc::clone(&learning_store)));

        Self {
            clear_progress,
            dashboard,
            learning_store,
            page_loading,
        }
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
