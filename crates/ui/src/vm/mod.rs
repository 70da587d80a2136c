mod progress_vm;
mod time_fmt;

pub use progress_vm::{
    ClearLabels, LearningProgressVm, ResourceProgressVm, map_learning_progress,
    map_resource_progress,
};
pub use time_fmt::{format_datetime, format_relative};
