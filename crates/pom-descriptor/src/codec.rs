//! Flat key encoding for data the descriptor has no native slot for.
//!
//! Dependency management entries are stored as
//! `m:dependency.management__{group}__{artifact}__{classifier}__{field}`
//! where `field` is `version`, `scope` or `exclusion_{index}`. Exclusion
//! content is `{group}__{artifact}`. Properties use
//! `m:properties__{name}` and plugins are joined into a single
//! `m:maven.plugins` entry as `{group}__{artifact}__{version}|...`.
//!
//! Field values are not escaped. A group, artifact or classifier that
//! itself contains `__` produces a key that cannot be decoded
//! unambiguously; such keys fail the part-count check on decode.

use crate::error::{PomError, Result};
use crate::types::{ClassifiedCoordinate, ModuleId, PluginRecord};

pub const DEPENDENCY_MANAGEMENT_TAG: &str = "m:dependency.management";
pub const PROPERTIES_TAG: &str = "m:properties";
pub const PLUGINS_TAG: &str = "m:maven.plugins";
pub const DELIMITER: &str = "__";
pub const PLUGIN_SEPARATOR: char = '|';

/// Stands in for an absent classifier inside encoded keys.
pub const NO_CLASSIFIER: &str = "null";

const MANAGEMENT_KEY_PARTS: usize = 5;
const EXCLUSION_FIELD: &str = "exclusion_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagementField {
    Version,
    Scope,
    Exclusion(usize),
}

impl ManagementField {
    fn encode(self) -> String {
        match self {
            Self::Version => "version".to_string(),
            Self::Scope => "scope".to_string(),
            Self::Exclusion(index) => format!("{EXCLUSION_FIELD}{index}"),
        }
    }

    fn decode(key: &str, field: &str) -> Result<Self> {
        match field {
            "version" => Ok(Self::Version),
            "scope" => Ok(Self::Scope),
            _ => field
                .strip_prefix(EXCLUSION_FIELD)
                .and_then(|i| i.parse().ok())
                .map(Self::Exclusion)
                .ok_or_else(|| PomError::UnknownManagementField {
                    key: key.to_string(),
                    field: field.to_string(),
                }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagementKey {
    pub coordinate: ClassifiedCoordinate,
    pub field: ManagementField,
}

impl ManagementKey {
    pub fn new(coordinate: ClassifiedCoordinate, field: ManagementField) -> Self {
        Self { coordinate, field }
    }

    pub fn encode(&self) -> String {
        format!(
            "{}{}",
            management_prefix(&self.coordinate),
            self.field.encode()
        )
    }

    /// Decodes a metadata entry name.
    ///
    /// Returns `Ok(None)` for names outside the dependency management
    /// namespace, and an error for names inside it that do not split into
    /// exactly five parts or carry an unknown field.
    pub fn decode(key: &str) -> Result<Option<Self>> {
        if !is_management_key(key) {
            return Ok(None);
        }
        let parts: Vec<&str> = key.split(DELIMITER).collect();
        let [_, group, artifact, classifier, field] = parts.as_slice() else {
            return Err(PomError::MalformedManagementKey {
                key: key.to_string(),
                parts: parts.len(),
                expected: MANAGEMENT_KEY_PARTS,
            });
        };
        let field = ManagementField::decode(key, field)?;
        Ok(Some(Self {
            coordinate: ClassifiedCoordinate::new(*group, *artifact, decode_classifier(classifier)),
            field,
        }))
    }
}

pub fn is_management_key(key: &str) -> bool {
    key.strip_prefix(DEPENDENCY_MANAGEMENT_TAG)
        .is_some_and(|rest| rest.starts_with(DELIMITER))
}

/// Common prefix of every management key for `coordinate`, ending in the delimiter.
pub fn management_prefix(coordinate: &ClassifiedCoordinate) -> String {
    format!(
        "{DEPENDENCY_MANAGEMENT_TAG}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}",
        coordinate.group_id,
        coordinate.artifact_id,
        coordinate.classifier().unwrap_or(NO_CLASSIFIER)
    )
}

/// Prefix shared by the indexed exclusion keys of `coordinate`.
pub fn exclusion_prefix(coordinate: &ClassifiedCoordinate) -> String {
    format!("{}{EXCLUSION_FIELD}", management_prefix(coordinate))
}

fn decode_classifier(classifier: &str) -> Option<String> {
    (classifier != NO_CLASSIFIER).then(|| classifier.to_string())
}

pub fn encode_exclusion(module: &ModuleId) -> String {
    format!("{}{DELIMITER}{}", module.group_id, module.artifact_id)
}

pub fn decode_exclusion(content: &str) -> Result<ModuleId> {
    let parts: Vec<&str> = content.split(DELIMITER).collect();
    match parts.as_slice() {
        [group, artifact] => Ok(ModuleId::new(*group, *artifact)),
        _ => Err(PomError::MalformedExclusion {
            content: content.to_string(),
            parts: parts.len(),
        }),
    }
}

pub fn property_key(name: &str) -> String {
    format!("{PROPERTIES_TAG}{DELIMITER}{name}")
}

/// Property name carried by `key`, if it is a property entry.
pub fn decode_property_key(key: &str) -> Option<&str> {
    key.strip_prefix(PROPERTIES_TAG)?.strip_prefix(DELIMITER)
}

/// A missing plugin version is encoded as an empty field.
pub fn encode_plugin(plugin: &PluginRecord) -> String {
    format!(
        "{}{DELIMITER}{}{DELIMITER}{}",
        plugin.group_id,
        plugin.artifact_id,
        plugin.version.as_deref().unwrap_or_default()
    )
}

pub fn decode_plugin(entry: &str) -> Result<PluginRecord> {
    let parts: Vec<&str> = entry.split(DELIMITER).collect();
    match parts.as_slice() {
        [group, artifact, version] => Ok(PluginRecord::new(
            *group,
            *artifact,
            (!version.is_empty()).then(|| (*version).to_string()),
        )),
        _ => Err(PomError::MalformedPlugin {
            entry: entry.to_string(),
            parts: parts.len(),
        }),
    }
}

/// Appends `plugin` to an existing `|`-joined plugin list.
pub fn append_plugin(existing: Option<&str>, plugin: &PluginRecord) -> String {
    let value = encode_plugin(plugin);
    match existing {
        Some(list) if !list.is_empty() => format!("{list}{PLUGIN_SEPARATOR}{value}"),
        _ => value,
    }
}
