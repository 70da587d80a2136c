use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::ResourceId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised while building resource identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("resource id cannot be empty")]
    EmptyId,
    #[error("unknown resource type: {0}")]
    UnknownKind(String),
}

//
// ─── RESOURCE KIND ────────────────────────────────────────────────────────────
//

/// The two kinds of resources a learner can track progress against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    #[serde(rename = "roadmap")]
    Roadmap,
    #[serde(rename = "best-practice")]
    BestPractice,
}

impl ResourceKind {
    /// Wire name, also used as the cache key prefix.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Roadmap => "roadmap",
            ResourceKind::BestPractice => "best-practice",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "roadmap" => Ok(Self::Roadmap),
            "best-practice" => Ok(Self::BestPractice),
            other => Err(ResourceError::UnknownKind(other.to_owned())),
        }
    }
}

//
// ─── RESOURCE REF ─────────────────────────────────────────────────────────────
//

/// A resource addressed by kind and id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub id: ResourceId,
}

impl ResourceRef {
    #[must_use]
    pub fn new(kind: ResourceKind, id: ResourceId) -> Self {
        Self { kind, id }
    }

    /// Site path of the resource page.
    ///
    /// Roadmaps live at the root, best practices under `/best-practices`.
    #[must_use]
    pub fn resource_path(&self) -> String {
        match self.kind {
            ResourceKind::Roadmap => format!("/{}", self.id),
            ResourceKind::BestPractice => format!("/best-practices/{}", self.id),
        }
    }

    #[must_use]
    pub fn progress_key(&self) -> ProgressKey {
        ProgressKey::new(self.kind, &self.id)
    }
}

//
// ─── PROGRESS KEY ─────────────────────────────────────────────────────────────
//

/// Key of a locally cached progress entry: `{kind}-{id}-progress`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgressKey(String);

impl ProgressKey {
    #[must_use]
    pub fn new(kind: ResourceKind, id: &ResourceId) -> Self {
        Self(format!("{kind}-{id}-progress"))
    }

    /// Wraps a key read back from storage.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProgressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
