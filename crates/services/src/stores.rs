//! Process-wide UI state shared between views, injected as trait objects.

use std::sync::{Mutex, MutexGuard, PoisonError};

use progress_core::model::UserResourceProgressDocument;

/// Learning-progress documents currently shown on the dashboard.
pub trait LearningProgressStore: Send + Sync {
    fn replace_all(&self, documents: Vec<UserResourceProgressDocument>);

    fn list(&self) -> Vec<UserResourceProgressDocument>;

    /// Drop the document for the same resource. Returns whether one was found.
    fn remove_progress(&self, document: &UserResourceProgressDocument) -> bool;
}

#[derive(Default)]
pub struct InMemoryLearningStore {
    documents: Mutex<Vec<UserResourceProgressDocument>>,
}

impl InMemoryLearningStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<UserResourceProgressDocument>> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LearningProgressStore for InMemoryLearningStore {
    fn replace_all(&self, documents: Vec<UserResourceProgressDocument>) {
        *self.lock() = documents;
    }

    fn list(&self) -> Vec<UserResourceProgressDocument> {
        self.lock().clone()
    }

    fn remove_progress(&self, document: &UserResourceProgressDocument) -> bool {
        let mut documents = self.lock();
        let before = documents.len();
        documents.retain(|d| !d.is_same_resource(document));
        documents.len() != before
    }
}

/// Page-wide "loading" banner text.
pub trait PageLoading: Send + Sync {
    fn set(&self, message: &str);

    fn clear(&self);

    /// The current message, `None` when cleared.
    fn message(&self) -> Option<String>;
}

#[derive(Default)]
pub struct PageLoadingMessage {
    message: Mutex<String>,
}

impl PageLoadingMessage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, String> {
        self.message.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PageLoading for PageLoadingMessage {
    fn set(&self, message: &str) {
        *self.lock() = message.to_owned();
    }

    fn clear(&self) {
        self.lock().clear();
    }

    fn message(&self) -> Option<String> {
        let message = self.lock();
        (!message.is_empty()).then(|| message.clone())
    }
}
