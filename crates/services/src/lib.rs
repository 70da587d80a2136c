#![forbid(unsafe_code)]

pub mod app_services;
pub mod clear_progress_service;
pub mod dashboard_service;
pub mod error;
pub mod progress_api;
pub mod static_api;
pub mod stores;

pub use progress_core::Clock;

pub use app_services::AppServices;
pub use clear_progress_service::{CLEARING_PROGRESS_MESSAGE, ClearProgressService};
pub use dashboard_service::DashboardService;
pub use error::{AppServicesError, ClearProgressError, DashboardError, ProgressApiError};
pub use progress_api::{
    ApiConfig, ClearProgressRequest, ClearProgressResponse, HttpProgressApi, LearningActivity,
    ProgressApi, UserActivity,
};
pub use static_api::{StaticFailure, StaticProgressApi};
pub use stores::{InMemoryLearningStore, LearningProgressStore, PageLoading, PageLoadingMessage};
