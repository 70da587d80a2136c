mod learning_progress;
mod resource_progress;

pub use learning_progress::{LearningProgressCard, LearningProgressSkeleton, StoreRevision};
pub use resource_progress::{CLEAR_FAILED_ALERT, ClearIntent, ResourceProgressCard};

#[cfg(test)]
pub(crate) use test_handles::ClearTestHandles;
