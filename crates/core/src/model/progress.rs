use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::ResourceId;
use crate::model::resource::{ResourceKind, ResourceRef};

//
// ─── RESOURCE PROGRESS ────────────────────────────────────────────────────────
//

/// Aggregate progress counts for one resource, as reported by the activity API.
///
/// `done_count + learning_count + skipped_count <= total_count` is expected
/// from the producer and not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceProgress {
    pub resource_type: ResourceKind,
    pub resource_id: ResourceId,
    pub title: String,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub done_count: u32,
    #[serde(default)]
    pub learning_count: u32,
    #[serde(default)]
    pub skipped_count: u32,
}

impl ResourceProgress {
    #[must_use]
    pub fn resource(&self) -> ResourceRef {
        ResourceRef::new(self.resource_type, self.resource_id.clone())
    }

    /// Items that count towards completion: done plus skipped.
    #[must_use]
    pub fn marked_count(&self) -> u64 {
        u64::from(self.done_count) + u64::from(self.skipped_count)
    }

    /// Share of marked items, rounded half up to a whole percent.
    ///
    /// A resource without items reports 0 and the result never exceeds 100.
    #[must_use]
    pub fn progress_percentage(&self) -> u8 {
        let total = u64::from(self.total_count);
        if total == 0 {
            return 0;
        }
        let rounded = (self.marked_count() * 200 + total) / (total * 2);
        u8::try_from(rounded.min(100)).unwrap_or(100)
    }
}

//
// ─── LEARNING PROGRESS DOCUMENT ───────────────────────────────────────────────
//

/// A user's progress record for one resource, listing completed groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResourceProgressDocument {
    pub resource_id: ResourceId,
    pub resource_type: ResourceKind,
    pub title: String,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub done: Vec<String>,
    #[serde(default)]
    pub total_group_count: u32,
}

impl UserResourceProgressDocument {
    #[must_use]
    pub fn resource(&self) -> ResourceRef {
        ResourceRef::new(self.resource_type, self.resource_id.clone())
    }

    /// Returns true if both documents describe the same resource.
    #[must_use]
    pub fn is_same_resource(&self, other: &Self) -> bool {
        self.resource_type == other.resource_type && self.resource_id == other.resource_id
    }

    #[must_use]
    pub fn done_count(&self) -> u32 {
        u32::try_from(self.done.len()).unwrap_or(u32::MAX)
    }

    /// Completed groups over total groups, 0.0 when there are no groups.
    #[must_use]
    pub fn completion_ratio(&self) -> f64 {
        if self.total_group_count == 0 {
            return 0.0;
        }
        f64::from(self.done_count()) / f64::from(self.total_group_count)
    }

    /// Width of the progress bar in percent, unrounded and capped at 100.
    #[must_use]
    pub fn bar_width_percent(&self) -> f64 {
        (self.completion_ratio() * 100.0).min(100.0)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
