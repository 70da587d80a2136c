use std::sync::Arc;

use progress_core::model::{ResourceRef, UserResourceProgressDocument};
use storage::repository::ProgressCacheRepository;

use crate::error::ClearProgressError;
use crate::progress_api::{ClearProgressRequest, ProgressApi};
use crate::stores::{LearningProgressStore, PageLoading};

/// Page-loading text shown while a learning-progress clear is in flight.
pub const CLEARING_PROGRESS_MESSAGE: &str = "Clearing Progress";

/// Clears a resource's progress remotely, then locally.
#[derive(Clone)]
pub struct ClearProgressService {
    api: Arc<dyn ProgressApi>,
    cache: Arc<dyn ProgressCacheRepository>,
    store: Arc<dyn LearningProgressStore>,
    page_loading: Arc<dyn PageLoading>,
}

impl ClearProgressService {
    #[must_use]
    pub fn new(
        api: Arc<dyn ProgressApi>,
        cache: Arc<dyn ProgressCacheRepository>,
        store: Arc<dyn LearningProgressStore>,
        page_loading: Arc<dyn PageLoading>,
    ) -> Self {
        Self {
            api,
            cache,
            store,
            page_loading,
        }
    }

    /// Clear progress for the activity card of `resource`.
    ///
    /// On success the cached `{kind}-{id}-progress` entry is deleted. The
    /// server is the source of truth, so a failed cache delete is only logged.
    ///
    /// # Errors
    ///
    /// Returns `ClearProgressError::Api` if the request fails; the cache is
    /// left untouched in that case.
    pub async fn clear_resource(&self, resource: &ResourceRef) -> Result<(), ClearProgressError> {
        let request = ClearProgressRequest::from(resource);
        tracing::debug!(
            resource_type = %resource.kind,
            resource_id = %resource.id,
            "clearing resource progress"
        );

        if let Err(err) = self.api.clear_resource_progress(&request).await {
            tracing::error!(
                resource_type = %resource.kind,
                resource_id = %resource.id,
                error = %err,
                "failed to clear resource progress"
            );
            return Err(err.into());
        }

        let key = resource.progress_key();
        match self.cache.remove_progress(&key).await {
            Ok(removed) => tracing::info!(%key, removed, "cleared resource progress"),
            Err(err) => tracing::warn!(%key, error = %err, "cached progress could not be removed"),
        }
        Ok(())
    }

    /// Show the page-loading message for a learning clear.
    ///
    /// `finish_learning_clear` hides it again. Callers that re-render on
    /// store changes call this first so the message is visible while the
    /// request is in flight.
    pub fn begin_learning_clear(&self) {
        self.page_loading.set(CLEARING_PROGRESS_MESSAGE);
    }

    /// Clear progress for a learning-dashboard document.
    ///
    /// The page-loading message is shown for the duration of the request and
    /// cleared whatever the outcome. On success the document is removed from
    /// the learning-progress store.
    ///
    /// # Errors
    ///
    /// Returns `ClearProgressError::Api` if the request fails; the store keeps
    /// the document in that case.
    pub async fn clear_learning(
        &self,
        document: &UserResourceProgressDocument,
    ) -> Result<(), ClearProgressError> {
        self.begin_learning_clear();
        self.finish_learning_clear(document).await
    }

    /// Send the clear request started by `begin_learning_clear`.
    ///
    /// # Errors
    ///
    /// Returns `ClearProgressError::Api` if the request fails; the store keeps
    /// the document in that case.
    pub async fn finish_learning_clear(
        &self,
        document: &UserResourceProgressDocument,
    ) -> Result<(), ClearProgressError> {
        let resource = document.resource();
        let request = ClearProgressRequest::from(&resource);
        let result = self.api.clear_resource_progress(&request).await;

        match result {
            Ok(_) => {
                self.store.remove_progress(document);
                self.page_loading.clear();
                tracing::info!(
                    resource_type = %resource.kind,
                    resource_id = %resource.id,
                    "cleared learning progress"
                );
                Ok(())
            }
            Err(err) => {
                self.page_loading.clear();
                tracing::error!(
                    resource_type = %resource.kind,
                    resource_id = %resource.id,
                    error = %err,
                    "failed to clear learning progress"
                );
                Err(err.into())
            }
        }
    }
}
