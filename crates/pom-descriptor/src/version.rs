//! Module status derived from the declared version.

use serde::Serialize;
use std::fmt;

pub const DEFAULT_SNAPSHOT_QUALIFIER: &str = "SNAPSHOT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStatus {
    #[default]
    Integration,
    Release,
}

impl ModuleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integration => "integration",
            Self::Release => "release",
        }
    }
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A module without a version, or whose version ends with the snapshot
/// qualifier, is still under integration. An empty qualifier stands for
/// [`DEFAULT_SNAPSHOT_QUALIFIER`].
pub fn status_for(version: Option<&str>, snapshot_qualifier: &str) -> ModuleStatus {
    let snapshot_qualifier = if snapshot_qualifier.is_empty() {
        DEFAULT_SNAPSHOT_QUALIFIER
    } else {
        snapshot_qualifier
    };
    match version {
        None => ModuleStatus::Integration,
        Some(v) if v.ends_with(snapshot_qualifier) => ModuleStatus::Integration,
        Some(_) => ModuleStatus::Release,
    }
}
