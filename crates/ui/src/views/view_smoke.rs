use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Duration;
use progress_core::model::{
    ResourceId, ResourceKind, ResourceProgress, UserResourceProgressDocument,
};
use progress_core::time::fixed_now;
use services::{
    CLEARING_PROGRESS_MESSAGE, ClearProgressRequest, ClearProgressResponse, ProgressApi,
    ProgressApiError, StaticFailure, StaticProgressApi, UserActivity,
};
use storage::repository::{CachedProgress, ProgressCacheRepository, Storage};

use super::test_harness::{ViewKind, setup_harness};
use crate::components::{CLEAR_FAILED_ALERT, ClearIntent};

fn frontend_progress() -> ResourceProgress {
    ResourceProgress {
        resource_type: ResourceKind::Roadmap,
        resource_id: ResourceId::new("frontend").unwrap(),
        title: "Frontend Developer".into(),
        updated_at: fixed_now() - Duration::hours(2),
        total_count: 10,
        done_count: 3,
        learning_count: 1,
        skipped_count: 2,
    }
}

fn document(kind: ResourceKind, id: &str, title: &str) -> UserResourceProgressDocument {
    UserResourceProgressDocument {
        resource_id: ResourceId::new(id).unwrap(),
        resource_type: kind,
        title: title.into(),
        updated_at: fixed_now() - Duration::days(1),
        done: vec!["a".into(), "b".into()],
        total_group_count: 4,
    }
}

async fn seeded_storage(progress: &ResourceProgress) -> Storage {
    let storage = Storage::in_memory();
    storage
        .progress_cache
        .put_progress(&CachedProgress::new(
            progress.resource().progress_key(),
            r#"{"done":["internet"]}"#,
            fixed_now(),
        ))
        .await
        .expect("seed cache");
    storage
}

/// Clear requests never complete. Learning progress is served only when
/// documents are given; otherwise that request never completes either.
#[derive(Default)]
struct PendingApi {
    learning: Option<Vec<UserResourceProgressDocument>>,
    clear_calls: AtomicUsize,
}

impl PendingApi {
    fn with_learning(documents: Vec<UserResourceProgressDocument>) -> Self {
        Self {
            learning: Some(documents),
            ..Self::default()
        }
    }

    fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProgressApi for PendingApi {
    async fn clear_resource_progress(
        &self,
        _request: &ClearProgressRequest,
    ) -> Result<ClearProgressResponse, ProgressApiError> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }

    async fn fetch_user_activity(&self) -> Result<UserActivity, ProgressApiError> {
        Ok(UserActivity::default())
    }

    async fn fetch_learning_progress(
        &self,
    ) -> Result<Vec<UserResourceProgressDocument>, ProgressApiError> {
        match &self.learning {
            Some(documents) => Ok(documents.clone()),
            None => std::future::pending().await,
        }
    }
}

#[tokio::test(flavor = "current_thread")]
async fn resource_card_renders_counts_and_bar() {
    let mut harness = setup_harness(
        ViewKind::ResourceCard(frontend_progress()),
        Storage::in_memory(),
        Arc::new(StaticProgressApi::new()),
    );

    harness.rebuild();
    let html = harness.render();
    for expected in [
        "Frontend Developer",
        "href=\"/frontend\"",
        "width: 50%",
        "3 done",
        "1 in progress",
        "2 skipped",
        "10 total",
        "2 hours ago",
        "Clear Progress",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(!html.contains("Are you sure?"), "unexpected prompt in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn resource_card_asks_before_clearing() {
    let api = StaticProgressApi::new();
    let mut harness = setup_harness(
        ViewKind::ResourceCard(frontend_progress()),
        Storage::in_memory(),
        Arc::new(api.clone()),
    );
    harness.rebuild();

    harness.resource_intent("/frontend", ClearIntent::Request);
    let html = harness.render();
    assert!(html.contains("Are you sure?"), "missing prompt in {html}");
    assert!(html.contains("Yes") && html.contains("No"), "missing answers in {html}");
    assert!(api.clear_requests().is_empty());

    harness.resource_intent("/frontend", ClearIntent::Cancel);
    harness.settle().await;
    let html = harness.render();
    assert!(!html.contains("Are you sure?"), "prompt still shown in {html}");
    assert!(html.contains("Clear Progress"), "missing clear button in {html}");
    assert!(api.clear_requests().is_empty());
    assert_eq!(harness.cleared.get(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn confirmed_clear_sends_one_request_and_notifies_parent() {
    let progress = frontend_progress();
    let storage = seeded_storage(&progress).await;
    let api = StaticProgressApi::new();
    let mut harness = setup_harness(
        ViewKind::ResourceCard(progress.clone()),
        storage,
        Arc::new(api.clone()),
    );
    harness.rebuild();

    harness.resource_intent("/frontend", ClearIntent::Request);
    harness.resource_intent("/frontend", ClearIntent::Confirm);
    harness.resource_intent("/frontend", ClearIntent::Confirm);
    harness.settle().await;

    let requests = api.clear_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].resource_id.as_str(), "frontend");
    assert_eq!(requests[0].resource_type, ResourceKind::Roadmap);
    assert_eq!(harness.cleared.get(), 1);
    assert!(
        harness
            .storage
            .progress_cache
            .get_progress(&progress.resource().progress_key())
            .await
            .unwrap()
            .is_none()
    );

    let html = harness.render();
    assert!(html.contains("Clear Progress"), "not back to idle in {html}");
    assert!(!html.contains(CLEAR_FAILED_ALERT), "unexpected alert in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn failed_clear_shows_alert_and_keeps_cache() {
    let progress = frontend_progress();
    let storage = seeded_storage(&progress).await;
    let api = StaticProgressApi::new();
    api.fail_with(StaticFailure::Rejected("network down".into()));
    let mut harness = setup_harness(
        ViewKind::ResourceCard(progress.clone()),
        storage,
        Arc::new(api.clone()),
    );
    harness.rebuild();

    harness.resource_intent("/frontend", ClearIntent::Request);
    harness.resource_intent("/frontend", ClearIntent::Confirm);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains(CLEAR_FAILED_ALERT), "missing alert in {html}");
    assert!(html.contains("role=\"alert\""), "alert role missing in {html}");
    assert!(html.contains("Clear Progress"), "not back to idle in {html}");
    assert_eq!(api.clear_requests().len(), 1);
    assert_eq!(harness.cleared.get(), 0);
    assert!(
        harness
            .storage
            .progress_cache
            .get_progress(&progress.resource().progress_key())
            .await
            .unwrap()
            .is_some()
    );

    // A new attempt hides the previous alert.
    harness.resource_intent("/frontend", ClearIntent::Request);
    let html = harness.render();
    assert!(!html.contains(CLEAR_FAILED_ALERT), "stale alert in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn in_flight_clear_shows_processing_label() {
    let mut harness = setup_harness(
        ViewKind::ResourceCard(frontend_progress()),
        Storage::in_memory(),
        Arc::new(PendingApi::default()),
    );
    harness.rebuild();

    harness.resource_intent("/frontend", ClearIntent::Request);
    harness.resource_intent("/frontend", ClearIntent::Confirm);
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Processing..."), "missing processing label in {html}");
    assert!(!html.contains("Are you sure?"), "prompt still shown in {html}");
    assert_eq!(harness.cleared.get(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn learning_card_renders_fraction_and_clears_per_click() {
    let api = StaticProgressApi::new();
    let doc = document(ResourceKind::BestPractice, "api-security", "API Security");
    let mut harness = setup_harness(
        ViewKind::LearningCard(doc),
        Storage::in_memory(),
        Arc::new(api.clone()),
    );
    harness.rebuild();

    let html = harness.render();
    for expected in [
        "API Security",
        "href=\"/best-practices/api-security\"",
        "2 / 4",
        "width: 50%",
        "a day ago",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }

    harness.learning_clear("/best-practices/api-security");
    harness.settle().await;

    let requests = api.clear_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].resource_id.as_str(), "api-security");
    assert_eq!(requests[0].resource_type, ResourceKind::BestPractice);
    assert_eq!(harness.services.page_loading().message(), None);

    // Once settled, a new click is a new request.
    harness.learning_clear("/best-practices/api-security");
    harness.settle().await;
    assert_eq!(api.clear_requests().len(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn learning_card_ignores_clicks_while_clearing() {
    let api = Arc::new(PendingApi::default());
    let doc = document(ResourceKind::BestPractice, "api-security", "API Security");
    let mut harness = setup_harness(ViewKind::LearningCard(doc), Storage::in_memory(), api.clone());
    harness.rebuild();

    harness.learning_clear("/best-practices/api-security");
    harness.drive_async().await;
    harness.learning_clear("/best-practices/api-security");
    harness.learning_clear("/best-practices/api-security");
    harness.settle().await;

    assert_eq!(api.clear_calls(), 1);
    assert_eq!(
        harness.services.page_loading().message().as_deref(),
        Some(CLEARING_PROGRESS_MESSAGE)
    );
}

#[tokio::test(flavor = "current_thread")]
async fn learning_view_shows_banner_while_clearing() {
    let api = Arc::new(PendingApi::with_learning(vec![
        document(ResourceKind::Roadmap, "frontend", "Frontend Developer"),
        document(ResourceKind::BestPractice, "api-security", "API Security"),
    ]));
    let mut harness = setup_harness(ViewKind::Learning, Storage::in_memory(), api.clone());

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(!html.contains(CLEARING_PROGRESS_MESSAGE), "banner shown too early in {html}");

    harness.learning_clear("/frontend");
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains(CLEARING_PROGRESS_MESSAGE), "missing banner in {html}");
    assert!(html.contains("role=\"status\""), "banner role missing in {html}");
    assert!(html.contains("Frontend Developer"), "document dropped before clear in {html}");
    assert_eq!(api.clear_calls(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn learning_view_shows_skeletons_while_loading() {
    let mut harness = setup_harness(
        ViewKind::Learning,
        Storage::in_memory(),
        Arc::new(PendingApi::default()),
    );

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert_eq!(
        html.matches("learning-progress--skeleton").count(),
        3,
        "expected three skeletons in {html}"
    );
    assert!(!html.contains("No learning progress yet."), "empty state shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn learning_view_drops_cleared_document() {
    let api = StaticProgressApi::new().with_learning(vec![
        document(ResourceKind::Roadmap, "frontend", "Frontend Developer"),
        document(ResourceKind::BestPractice, "api-security", "API Security"),
    ]);
    let mut harness = setup_harness(ViewKind::Learning, Storage::in_memory(), Arc::new(api.clone()));

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Frontend Developer"), "missing roadmap in {html}");
    assert!(html.contains("API Security"), "missing best practice in {html}");

    harness.learning_clear("/frontend");
    harness.settle().await;

    let html = harness.render();
    assert!(!html.contains("Frontend Developer"), "cleared document still shown in {html}");
    assert!(html.contains("API Security"), "other document dropped in {html}");
    assert!(!html.contains(CLEARING_PROGRESS_MESSAGE), "loading banner left in {html}");
    assert_eq!(api.clear_requests().len(), 1);
    assert_eq!(harness.services.learning_store().list().len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn learning_view_keeps_document_when_clear_fails() {
    let api = StaticProgressApi::new().with_learning(vec![document(
        ResourceKind::Roadmap,
        "frontend",
        "Frontend Developer",
    )]);
    api.fail_with(StaticFailure::EmptyResponse);
    let mut harness = setup_harness(ViewKind::Learning, Storage::in_memory(), Arc::new(api.clone()));

    harness.rebuild();
    harness.settle().await;
    harness.learning_clear("/frontend");
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Frontend Developer"), "document dropped in {html}");
    assert!(!html.contains(CLEARING_PROGRESS_MESSAGE), "loading banner left in {html}");
    assert_eq!(api.clear_requests().len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn learning_view_reports_empty_list() {
    let mut harness = setup_harness(
        ViewKind::Learning,
        Storage::in_memory(),
        Arc::new(StaticProgressApi::new()),
    );

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No learning progress yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn activity_view_reloads_after_clear() {
    let api = StaticProgressApi::demo(fixed_now()).unwrap();
    let mut harness = setup_harness(ViewKind::Activity, Storage::in_memory(), Arc::new(api.clone()));

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    for expected in ["Roadmaps", "Best Practices", "Frontend Developer", "API Security"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }

    harness.resource_intent("/frontend", ClearIntent::Request);
    harness.resource_intent("/frontend", ClearIntent::Confirm);
    harness.settle().await;

    let html = harness.render();
    assert!(!html.contains("Frontend Developer"), "cleared roadmap still shown in {html}");
    assert!(html.contains("API Security"), "best practice dropped in {html}");
    assert_eq!(api.clear_requests().len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn skeleton_renders_placeholder_bars() {
    let mut harness = setup_harness(
        ViewKind::Skeleton,
        Storage::in_memory(),
        Arc::new(StaticProgressApi::new()),
    );

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("learning-progress--skeleton"), "missing skeleton in {html}");
    assert!(html.contains("skeleton-bar--title"), "missing title bar in {html}");
    assert!(!html.contains("<button"), "skeleton should not be interactive: {html}");
}
