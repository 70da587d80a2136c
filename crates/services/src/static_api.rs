use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use progress_core::model::{
    ResourceError, ResourceId, ResourceKind, ResourceProgress, UserResourceProgressDocument,
};

use crate::error::ProgressApiError;
use crate::progress_api::{
    ClearProgressRequest, ClearProgressResponse, LearningActivity, ProgressApi, UserActivity,
};

/// How a `StaticProgressApi` should fail clear requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticFailure {
    /// Behave like a transport error carrying this message.
    Rejected(String),
    /// Answer without a body.
    EmptyResponse,
}

#[derive(Default)]
struct StaticState {
    activity: UserActivity,
    learning: Vec<UserResourceProgressDocument>,
    clear_requests: Vec<ClearProgressRequest>,
    failure: Option<StaticFailure>,
}

/// In-memory `ProgressApi` for tests and the offline demo.
///
/// Successful clears drop the resource from the served data, so reloading
/// after a clear reflects the change. Every clear request is recorded.
#[derive(Clone, Default)]
pub struct StaticProgressApi {
    state: Arc<Mutex<StaticState>>,
}

impl StaticProgressApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_activity(self, activity: UserActivity) -> Self {
        self.lock_state().activity = activity;
        self
    }

    #[must_use]
    pub fn with_learning(self, documents: Vec<UserResourceProgressDocument>) -> Self {
        self.lock_state().learning = documents;
        self
    }

    /// Make every following clear request fail.
    pub fn fail_with(&self, failure: StaticFailure) {
        self.lock_state().failure = Some(failure);
    }

    pub fn succeed(&self) {
        self.lock_state().failure = None;
    }

    #[must_use]
    pub fn clear_requests(&self) -> Vec<ClearProgressRequest> {
        self.lock_state().clear_requests.clone()
    }

    /// Sample data: two roadmaps, one best practice and matching documents.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError` if a sample id is rejected.
    pub fn demo(now: DateTime<Utc>) -> Result<Self, ResourceError> {
        let roadmaps = vec![
            demo_progress(
                ResourceKind::Roadmap,
                ("frontend", "Frontend Developer"),
                now - Duration::minutes(5),
                (120, 48, 6, 2),
            )?,
            demo_progress(
                ResourceKind::Roadmap,
                ("rust", "Rust"),
                now - Duration::days(3),
                (80, 10, 4, 0),
            )?,
        ];
        let best_practices = vec![demo_progress(
            ResourceKind::BestPractice,
            ("api-security", "API Security"),
            now - Duration::days(40),
            (60, 12, 0, 9),
        )?];
        let learning = vec![
            demo_document(
                ResourceKind::Roadmap,
                ("frontend", "Frontend Developer"),
                now - Duration::minutes(5),
                &["internet", "html", "css"],
                12,
            )?,
            demo_document(
                ResourceKind::BestPractice,
                ("api-security", "API Security"),
                now - Duration::days(40),
                &["authentication"],
                8,
            )?,
        ];

        Ok(Self::new()
            .with_activity(UserActivity {
                learning: LearningActivity {
                    roadmaps,
                    best_practices,
                },
            })
            .with_learning(learning))
    }

    fn lock_state(&self) -> MutexGuard<'_, StaticState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl ProgressApi for StaticProgressApi {
    async fn clear_resource_progress(
        &self,
        request: &ClearProgressRequest,
    ) -> Result<ClearProgressResponse, ProgressApiError> {
        let mut state = self.lock_state();
        state.clear_requests.push(request.clone());

        match &state.failure {
            Some(StaticFailure::Rejected(message)) => {
                return Err(ProgressApiError::Rejected(message.clone()));
            }
            Some(StaticFailure::EmptyResponse) => return Err(ProgressApiError::EmptyResponse),
            None => {}
        }

        let matches = |kind: ResourceKind, id: &ResourceId| {
            kind == request.resource_type && *id == request.resource_id
        };
        let learning = &mut state.activity.learning;
        learning
            .roadmaps
            .retain(|p| !matches(p.resource_type, &p.resource_id));
        learning
            .best_practices
            .retain(|p| !matches(p.resource_type, &p.resource_id));
        state
            .learning
            .retain(|d| !matches(d.resource_type, &d.resource_id));

        Ok(ClearProgressResponse::ok())
    }

    async fn fetch_user_activity(&self) -> Result<UserActivity, ProgressApiError> {
        Ok(self.lock_state().activity.clone())
    }

    async fn fetch_learning_progress(
        &self,
    ) -> Result<Vec<UserResourceProgressDocument>, ProgressApiError> {
        Ok(self.lock_state().learning.clone())
    }
}

fn demo_progress(
    kind: ResourceKind,
    (id, title): (&str, &str),
    updated_at: DateTime<Utc>,
    (total, done, learning, skipped): (u32, u32, u32, u32),
) -> Result<ResourceProgress, ResourceError> {
    Ok(ResourceProgress {
        resource_type: kind,
        resource_id: ResourceId::new(id)?,
        title: title.to_owned(),
        updated_at,
        total_count: total,
        done_count: done,
        learning_count: learning,
        skipped_count: skipped,
    })
}

fn demo_document(
    kind: ResourceKind,
    (id, title): (&str, &str),
    updated_at: DateTime<Utc>,
    done: &[&str],
    total_group_count: u32,
) -> Result<UserResourceProgressDocument, ResourceError> {
    Ok(UserResourceProgressDocument {
        resource_id: ResourceId::new(id)?,
        resource_type: kind,
        title: title.to_owned(),
        updated_at,
        done: done.iter().map(|group| (*group).to_owned()).collect(),
        total_group_count,
    })
}
