mod clear_flow;
mod ids;
mod progress;
mod resource;

pub use ids::ResourceId;

pub use clear_flow::{ClearFlow, ClearPhase};
pub use progress::{ResourceProgress, UserResourceProgressDocument};
pub use resource::{ProgressKey, ResourceError, ResourceKind, ResourceRef};
