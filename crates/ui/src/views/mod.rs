mod activity;
mod learning;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use activity::ActivityView;
pub use learning::LearningView;
pub use state::{ViewError, ViewState, view_state_from_resource};
