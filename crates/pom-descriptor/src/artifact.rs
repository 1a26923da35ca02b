//! Published and dependency artifacts, and the packaging-to-extension table.

use crate::types::ModuleCoordinate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Extra attribute carrying the Maven classifier of an artifact.
pub const CLASSIFIER_ATTRIBUTE: &str = "m:classifier";

/// Packagings whose artifact is a plain jar.
pub static JAR_PACKAGINGS: [&str; 8] = [
    "ejb",
    "bundle",
    "maven-plugin",
    "eclipse-plugin",
    "jbi-component",
    "jbi-shared-library",
    "orbit",
    "hk2-jar",
];

pub fn is_jar_packaging(packaging: &str, extra_jar_packagings: &[String]) -> bool {
    JAR_PACKAGINGS.contains(&packaging) || extra_jar_packagings.iter().any(|p| p == packaging)
}

/// File extension of the main artifact for `packaging`.
///
/// `pom` packaging publishes no artifact of its own and yields `None`;
/// whether an implicit jar exists is for the caller to find out.
pub fn extension_for_packaging<'a>(
    packaging: &'a str,
    extra_jar_packagings: &[String],
) -> Option<&'a str> {
    match packaging {
        "pom" => None,
        "pear" => Some("phar"),
        p if is_jar_packaging(p, extra_jar_packagings) => Some("jar"),
        p => Some(p),
    }
}

/// An artifact published by the module itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub module: ModuleCoordinate,
    pub name: String,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub ext: String,
    pub extra_attributes: BTreeMap<String, String>,
    pub publication_date: Option<u64>,
}

impl Artifact {
    pub fn new(
        module: ModuleCoordinate,
        name: impl Into<String>,
        artifact_type: impl Into<String>,
        ext: impl Into<String>,
        publication_date: Option<u64>,
    ) -> Self {
        Self {
            module,
            name: name.into(),
            artifact_type: artifact_type.into(),
            ext: ext.into(),
            extra_attributes: BTreeMap::new(),
            publication_date,
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.extra_attributes
            .insert(CLASSIFIER_ATTRIBUTE.to_string(), classifier.into());
        self
    }

    pub fn classifier(&self) -> Option<&str> {
        self.extra_attributes
            .get(CLASSIFIER_ATTRIBUTE)
            .map(String::as_str)
    }

    /// `{name}-sources.jar`
    pub fn sources(module: ModuleCoordinate, publication_date: Option<u64>) -> Self {
        let name = module.artifact_id.clone();
        Self::new(module, name, "source", "jar", publication_date).with_classifier("sources")
    }

    /// `{name}-src.jar`, the older source classifier.
    pub fn src(module: ModuleCoordinate, publication_date: Option<u64>) -> Self {
        let name = module.artifact_id.clone();
        Self::new(module, name, "source", "jar", publication_date).with_classifier("src")
    }

    pub fn javadoc(module: ModuleCoordinate, publication_date: Option<u64>) -> Self {
        let name = module.artifact_id.clone();
        Self::new(module, name, "javadoc", "jar", publication_date).with_classifier("javadoc")
    }
}

/// An artifact of a dependency that the owning module asks for explicitly.
///
/// A dependency without any of these implicitly means "the default jar".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyArtifact {
    pub name: String,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub ext: String,
    pub url: Option<String>,
    pub extra_attributes: BTreeMap<String, String>,
    pub confs: Vec<String>,
}

impl DependencyArtifact {
    fn new(
        name: impl Into<String>,
        artifact_type: impl Into<String>,
        ext: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            artifact_type: artifact_type.into(),
            ext: ext.into(),
            url: None,
            extra_attributes: BTreeMap::new(),
            confs: Vec::new(),
        }
    }

    pub fn default_jar(name: impl Into<String>) -> Self {
        Self::new(name, "jar", "jar")
    }

    /// Artifact for a dependency declaring a classifier and/or a type.
    ///
    /// `test-jar` becomes a `jar` with the `tests` classifier; jar-like
    /// packagings use the `jar` extension. An explicit classifier wins over
    /// the one implied by `test-jar`.
    pub fn for_dependency(
        name: impl Into<String>,
        dep_type: Option<&str>,
        classifier: Option<&str>,
        extra_jar_packagings: &[String],
    ) -> Self {
        let artifact_type = dep_type.unwrap_or("jar");
        let mut artifact = match artifact_type {
            "test-jar" => {
                Self::new(name, artifact_type, "jar").with_attribute(CLASSIFIER_ATTRIBUTE, "tests")
            }
            t if is_jar_packaging(t, extra_jar_packagings) => Self::new(name, t, "jar"),
            t => Self::new(name, t, t),
        };
        if let Some(classifier) = classifier {
            artifact = artifact.with_attribute(CLASSIFIER_ATTRIBUTE, classifier);
        }
        artifact
    }

    fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.extra_attributes.insert(key.to_string(), value.to_string());
        self
    }

    pub fn classifier(&self) -> Option<&str> {
        self.extra_attributes
            .get(CLASSIFIER_ATTRIBUTE)
            .map(String::as_str)
    }

    /// Same artifact regardless of the configurations it is attached to.
    pub fn same_artifact(&self, other: &Self) -> bool {
        self.name == other.name
            && self.artifact_type == other.artifact_type
            && self.ext == other.ext
            && self.extra_attributes == other.extra_attributes
    }
}
