//! Coordinate and record types fed to the descriptor builder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pattern value matching any group or artifact.
pub const WILDCARD: &str = "*";

/// A module identity without version: `{groupId}:{artifactId}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ModuleId {
    pub group_id: String,
    pub artifact_id: String,
}

impl ModuleId {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }

    /// The `*:*` exclusion, meaning "no transitive dependencies at all".
    pub fn wildcard() -> Self {
        Self::new(WILDCARD, WILDCARD)
    }

    pub fn is_wildcard(&self) -> bool {
        self.group_id == WILDCARD && self.artifact_id == WILDCARD
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// Module coordinates. The version may be unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ModuleCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
}

impl ModuleCoordinate {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version,
        }
    }

    pub fn module_id(&self) -> ModuleId {
        ModuleId::new(self.group_id.clone(), self.artifact_id.clone())
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl fmt::Display for ModuleCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}:{}:{}", self.group_id, self.artifact_id, v),
            None => write!(f, "{}:{}", self.group_id, self.artifact_id),
        }
    }
}

/// Key for dependency management lookups: management is scoped by
/// classifier, not by version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ClassifiedCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub classifier: Option<String>,
}

impl ClassifiedCoordinate {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        classifier: Option<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            classifier,
        }
    }

    pub fn module_id(&self) -> ModuleId {
        ModuleId::new(self.group_id.clone(), self.artifact_id.clone())
    }

    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }
}

impl fmt::Display for ClassifiedCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.classifier {
            Some(c) => write!(f, "{}:{}:{}", self.group_id, self.artifact_id, c),
            None => write!(f, "{}:{}", self.group_id, self.artifact_id),
        }
    }
}

/// Treats `Some("")` the same as `None`; parsers emit both for absent elements.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// A `<dependency>` declaration as emitted by the pom parser.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyRecord {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: Option<String>,
    pub optional: bool,
    pub classifier: Option<String>,
    #[serde(rename = "type")]
    pub dep_type: Option<String>,
    pub exclusions: Vec<ModuleId>,
}

impl DependencyRecord {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    #[must_use]
    pub fn with_type(mut self, dep_type: impl Into<String>) -> Self {
        self.dep_type = Some(dep_type.into());
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn exclude(mut self, group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        self.exclusions.push(ModuleId::new(group_id, artifact_id));
        self
    }

    pub fn version(&self) -> Option<&str> {
        non_empty(self.version.as_deref())
    }

    pub fn scope(&self) -> Option<&str> {
        non_empty(self.scope.as_deref())
    }

    pub fn classifier(&self) -> Option<&str> {
        non_empty(self.classifier.as_deref())
    }

    pub fn dep_type(&self) -> Option<&str> {
        non_empty(self.dep_type.as_deref())
    }

    pub fn module_id(&self) -> ModuleId {
        ModuleId::new(self.group_id.clone(), self.artifact_id.clone())
    }

    pub fn classified_coordinate(&self) -> ClassifiedCoordinate {
        ClassifiedCoordinate::new(
            self.group_id.clone(),
            self.artifact_id.clone(),
            self.classifier().map(str::to_owned),
        )
    }

    /// A classifier, or any type other than `jar`, selects an artifact
    /// other than the module's main jar.
    pub fn is_non_default_artifact(&self) -> bool {
        self.classifier().is_some() || self.dep_type().is_some_and(|t| t != "jar")
    }
}

/// A `<dependencyManagement>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagementRecord {
    pub group_id: String,
    pub artifact_id: String,
    pub classifier: Option<String>,
    pub version: Option<String>,
    pub scope: Option<String>,
    pub exclusions: Vec<ModuleId>,
}

impl ManagementRecord {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    #[must_use]
    pub fn exclude(mut self, group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        self.exclusions.push(ModuleId::new(group_id, artifact_id));
        self
    }

    pub fn version(&self) -> Option<&str> {
        non_empty(self.version.as_deref())
    }

    pub fn scope(&self) -> Option<&str> {
        non_empty(self.scope.as_deref())
    }

    pub fn module_id(&self) -> ModuleId {
        ModuleId::new(self.group_id.clone(), self.artifact_id.clone())
    }

    pub fn classified_coordinate(&self) -> ClassifiedCoordinate {
        ClassifiedCoordinate::new(
            self.group_id.clone(),
            self.artifact_id.clone(),
            non_empty(self.classifier.as_deref()).map(str::to_owned),
        )
    }
}

/// A `<build><plugins><plugin>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginRecord {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
}

impl PluginRecord {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    pub url: Option<String>,
}
