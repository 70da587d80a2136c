use std::sync::Arc;

use progress_core::model::UserResourceProgressDocument;

use crate::error::DashboardError;
use crate::progress_api::{ProgressApi, UserActivity};
use crate::stores::LearningProgressStore;

/// Loads the data behind the activity and learning pages.
#[derive(Clone)]
pub struct DashboardService {
    api: Arc<dyn ProgressApi>,
    store: Arc<dyn LearningProgressStore>,
}

impl DashboardService {
    #[must_use]
    pub fn new(api: Arc<dyn ProgressApi>, store: Arc<dyn LearningProgressStore>) -> Self {
        Self { api, store }
    }

    /// Fetch roadmap and best-practice progress counts.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Api` if the request fails.
    pub async fn load_activity(&self) -> Result<UserActivity, DashboardError> {
        let activity = self.api.fetch_user_activity().await?;
        tracing::debug!(
            roadmaps = activity.learning.roadmaps.len(),
            best_practices = activity.learning.best_practices.len(),
            "loaded user activity"
        );
        Ok(activity)
    }

    /// Fetch learning-progress documents and publish them to the store.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Api` if the request fails; the store is left
    /// as it was.
    pub async fn load_learning_progress(
        &self,
    ) -> Result<Vec<UserResourceProgressDocument>, DashboardError> {
        let documents = self.api.fetch_learning_progress().await?;
        tracing::debug!(count = documents.len(), "loaded learning progress");
        self.store.replace_all(documents.clone());
        Ok(documents)
    }
}
