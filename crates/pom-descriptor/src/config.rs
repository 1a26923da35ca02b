//! Builder settings.

use crate::error::Result;
use crate::version::DEFAULT_SNAPSHOT_QUALIFIER;
use serde::Deserialize;

/// Tunables for [`PomDescriptorBuilder`](crate::PomDescriptorBuilder).
///
/// Deserializes from the host tool's JSON settings; every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuilderSettings {
    /// Packagings published as `.jar` on top of the built-in set.
    pub extra_jar_packagings: Vec<String>,
    /// Version suffix marking a module as `integration` rather than `release`.
    pub snapshot_qualifier: String,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            extra_jar_packagings: Vec::new(),
            snapshot_qualifier: DEFAULT_SNAPSHOT_QUALIFIER.to_string(),
        }
    }
}

impl BuilderSettings {
    /// An empty `snapshotQualifier` falls back to the default one.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut settings: Self = serde_json::from_str(json)?;
        if settings.snapshot_qualifier.is_empty() {
            settings.snapshot_qualifier = DEFAULT_SNAPSHOT_QUALIFIER.to_string();
        }
        Ok(settings)
    }
}
