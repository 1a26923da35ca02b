//! The module descriptor produced by the builder.
//!
//! [`PomModuleDescriptor`] is only mutated through the crate-internal
//! methods the builder calls; once handed out by
//! [`PomDescriptorBuilder::build`](crate::PomDescriptorBuilder::build) it is
//! read-only.

use crate::artifact::{Artifact, DependencyArtifact};
use crate::configuration::{Configuration, MAVEN2_CONFIGURATIONS};
use crate::extra_info::ExtraInfoStore;
use crate::management::ManagementSource;
use crate::types::{
    ClassifiedCoordinate, DependencyRecord, License, ManagementRecord, ModuleCoordinate, ModuleId,
    WILDCARD,
};
use crate::version::ModuleStatus;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Namespace prefix for pom-specific extra attributes and metadata names.
pub const MAVEN_NAMESPACE_PREFIX: &str = "m";
pub const MAVEN_NAMESPACE_URI: &str = "http://ant.apache.org/ivy/maven";

/// Read access shared by every descriptor representation.
///
/// Descriptors built here keep dependency management as structured records;
/// descriptors obtained elsewhere may only carry the flat metadata store.
/// [`management_source`](Self::management_source) tells readers which one
/// they are looking at.
pub trait ModuleDescriptor {
    fn module(&self) -> Option<&ModuleCoordinate>;

    fn extra_info(&self) -> &ExtraInfoStore;

    fn management_source(&self) -> ManagementSource<'_>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternMatcher {
    Exact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludeRule {
    pub module: ModuleId,
    pub artifact: String,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub ext: String,
    pub matcher: PatternMatcher,
}

impl ExcludeRule {
    /// Excludes every artifact of `module`.
    pub fn for_module(module: ModuleId) -> Self {
        Self {
            module,
            artifact: WILDCARD.to_string(),
            artifact_type: WILDCARD.to_string(),
            ext: WILDCARD.to_string(),
            matcher: PatternMatcher::Exact,
        }
    }
}

/// Forces the version of a module whenever it shows up transitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionOverride {
    pub module: ModuleId,
    pub matcher: PatternMatcher,
    pub version: Option<String>,
}

/// One dependency of the module, merged across all declarations that
/// resolve to the same target coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyDescriptor {
    dependency: ModuleCoordinate,
    force: bool,
    changing: bool,
    transitive: bool,
    record: Option<DependencyRecord>,
    conf_mappings: IndexMap<String, Vec<String>>,
    artifacts: Vec<DependencyArtifact>,
    exclude_rules: IndexMap<String, Vec<ExcludeRule>>,
}

impl DependencyDescriptor {
    pub fn new(dependency: ModuleCoordinate, transitive: bool) -> Self {
        Self {
            dependency,
            force: false,
            changing: false,
            transitive,
            record: None,
            conf_mappings: IndexMap::new(),
            artifacts: Vec::new(),
            exclude_rules: IndexMap::new(),
        }
    }

    pub(crate) fn from_record(
        record: DependencyRecord,
        dependency: ModuleCoordinate,
        transitive: bool,
    ) -> Self {
        Self {
            record: Some(record),
            ..Self::new(dependency, transitive)
        }
    }

    pub fn dependency(&self) -> &ModuleCoordinate {
        &self.dependency
    }

    pub fn is_force(&self) -> bool {
        self.force
    }

    pub fn is_changing(&self) -> bool {
        self.changing
    }

    pub fn is_transitive(&self) -> bool {
        self.transitive
    }

    /// The declaration that first created this entry.
    pub fn record(&self) -> Option<&DependencyRecord> {
        self.record.as_ref()
    }

    /// Owning-module configurations this dependency is attached to.
    pub fn module_configurations(&self) -> impl Iterator<Item = &str> {
        self.conf_mappings.keys().map(String::as_str)
    }

    pub fn dependency_configurations(&self, module_conf: &str) -> &[String] {
        self.conf_mappings
            .get(module_conf)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn conf_mappings(&self) -> &IndexMap<String, Vec<String>> {
        &self.conf_mappings
    }

    pub fn artifacts(&self) -> &[DependencyArtifact] {
        &self.artifacts
    }

    pub fn artifacts_for(&self, module_conf: &str) -> impl Iterator<Item = &DependencyArtifact> {
        self.artifacts
            .iter()
            .filter(move |a| a.confs.iter().any(|c| c == module_conf))
    }

    pub fn exclude_rules(&self, module_conf: &str) -> &[ExcludeRule] {
        self.exclude_rules
            .get(module_conf)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn all_exclude_rules(&self) -> impl Iterator<Item = &ExcludeRule> {
        self.exclude_rules.values().flatten()
    }

    #[must_use]
    pub fn with_dependency_configuration(
        mut self,
        module_conf: impl Into<String>,
        dependency_conf: impl Into<String>,
    ) -> Self {
        self.add_dependency_configuration(module_conf, dependency_conf);
        self
    }

    pub(crate) fn add_dependency_configuration(
        &mut self,
        module_conf: impl Into<String>,
        dependency_conf: impl Into<String>,
    ) {
        let dependency_conf = dependency_conf.into();
        let confs = self.conf_mappings.entry(module_conf.into()).or_default();
        if !confs.contains(&dependency_conf) {
            confs.push(dependency_conf);
        }
    }

    /// Attaches `artifact` to `module_conf`, reusing an identical artifact
    /// already recorded under another configuration.
    pub(crate) fn add_dependency_artifact(
        &mut self,
        module_conf: &str,
        artifact: DependencyArtifact,
    ) {
        let index = match self.artifacts.iter().position(|a| a.same_artifact(&artifact)) {
            Some(index) => index,
            None => {
                self.artifacts.push(artifact);
                self.artifacts.len() - 1
            }
        };
        let target = &mut self.artifacts[index];
        if !target.confs.iter().any(|c| c == module_conf) {
            target.confs.push(module_conf.to_string());
        }
    }

    pub(crate) fn add_exclude_rule(&mut self, module_conf: &str, rule: ExcludeRule) {
        let rules = self.exclude_rules.entry(module_conf.to_string()).or_default();
        if !rules.contains(&rule) {
            rules.push(rule);
        }
    }

    /// Folds another entry for the same target into this one. Flags and the
    /// originating record of `self` are kept.
    pub(crate) fn merge(&mut self, other: Self) {
        for (module_conf, confs) in other.conf_mappings {
            for dependency_conf in confs {
                self.add_dependency_configuration(module_conf.as_str(), dependency_conf);
            }
        }
        for mut artifact in other.artifacts {
            let confs = std::mem::take(&mut artifact.confs);
            for module_conf in &confs {
                self.add_dependency_artifact(module_conf, artifact.clone());
            }
        }
        for (module_conf, rules) in other.exclude_rules {
            for rule in rules {
                self.add_exclude_rule(&module_conf, rule);
            }
        }
    }
}

fn serialize_values<K, V, S>(map: &IndexMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    V: Serialize,
    S: Serializer,
{
    serializer.collect_seq(map.values())
}

#[derive(Debug, Clone, Serialize)]
pub struct PomModuleDescriptor {
    module: Option<ModuleCoordinate>,
    status: ModuleStatus,
    home_page: Option<String>,
    description: Option<String>,
    licenses: Vec<License>,
    publication_date: Option<u64>,
    configurations: Vec<Configuration>,
    mapping_override: bool,
    extra_attribute_namespaces: IndexMap<String, String>,
    dependencies: Vec<DependencyDescriptor>,
    #[serde(skip)]
    dependency_index: HashMap<ModuleCoordinate, usize>,
    artifacts: IndexMap<String, Vec<Artifact>>,
    extra_info: ExtraInfoStore,
    #[serde(serialize_with = "serialize_values")]
    dependency_management: IndexMap<ClassifiedCoordinate, ManagementRecord>,
    #[serde(serialize_with = "serialize_values")]
    mediators: IndexMap<ModuleId, VersionOverride>,
}

impl PomModuleDescriptor {
    pub(crate) fn new(publication_date: Option<u64>) -> Self {
        let mut extra_attribute_namespaces = IndexMap::new();
        extra_attribute_namespaces.insert(
            MAVEN_NAMESPACE_PREFIX.to_string(),
            MAVEN_NAMESPACE_URI.to_string(),
        );
        Self {
            module: None,
            status: ModuleStatus::default(),
            home_page: None,
            description: None,
            licenses: Vec::new(),
            publication_date,
            configurations: MAVEN2_CONFIGURATIONS.to_vec(),
            mapping_override: true,
            extra_attribute_namespaces,
            dependencies: Vec::new(),
            dependency_index: HashMap::new(),
            artifacts: IndexMap::new(),
            extra_info: ExtraInfoStore::new(),
            dependency_management: IndexMap::new(),
            mediators: IndexMap::new(),
        }
    }

    pub fn status(&self) -> ModuleStatus {
        self.status
    }

    pub fn home_page(&self) -> Option<&str> {
        self.home_page.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn licenses(&self) -> &[License] {
        &self.licenses
    }

    /// Last-modified time of the source document, in milliseconds since the epoch.
    pub fn publication_date(&self) -> Option<u64> {
        self.publication_date
    }

    pub fn configurations(&self) -> &[Configuration] {
        &self.configurations
    }

    pub fn is_mapping_override(&self) -> bool {
        self.mapping_override
    }

    pub fn extra_attribute_namespaces(&self) -> &IndexMap<String, String> {
        &self.extra_attribute_namespaces
    }

    pub fn dependencies(&self) -> &[DependencyDescriptor] {
        &self.dependencies
    }

    pub fn dependency(&self, coordinate: &ModuleCoordinate) -> Option<&DependencyDescriptor> {
        self.dependency_index
            .get(coordinate)
            .map(|&i| &self.dependencies[i])
    }

    /// Published artifacts grouped by configuration, in declaration order.
    pub fn artifacts(&self) -> &IndexMap<String, Vec<Artifact>> {
        &self.artifacts
    }

    pub fn artifacts_for(&self, conf: &str) -> &[Artifact] {
        self.artifacts
            .get(conf)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn dependency_management(
        &self,
    ) -> &IndexMap<ClassifiedCoordinate, ManagementRecord> {
        &self.dependency_management
    }

    /// Version overrides keyed by the module they apply to, in first-seen order.
    pub fn mediators(&self) -> &IndexMap<ModuleId, VersionOverride> {
        &self.mediators
    }

    /// Version a transitive request for `module` is mediated to, if managed.
    pub fn mediated_version(&self, module: &ModuleId) -> Option<&str> {
        self.mediators
            .get(module)
            .and_then(|m| m.version.as_deref())
    }

    /// Management data for `coordinate`: the structured record when there
    /// is one, otherwise whatever the flat store carries (e.g. inherited
    /// from a parent document).
    pub(crate) fn management_for(&self, coordinate: &ClassifiedCoordinate) -> ManagementSource<'_> {
        if self.dependency_management.contains_key(coordinate) {
            ManagementSource::Structured(&self.dependency_management)
        } else {
            ManagementSource::Flat(&self.extra_info)
        }
    }

    pub(crate) fn dependency_position(&self, coordinate: &ModuleCoordinate) -> Option<usize> {
        self.dependency_index.get(coordinate).copied()
    }

    pub(crate) fn dependency_at_mut(&mut self, index: usize) -> &mut DependencyDescriptor {
        &mut self.dependencies[index]
    }

    pub(crate) fn set_module(&mut self, module: ModuleCoordinate, status: ModuleStatus) {
        self.module = Some(module);
        self.status = status;
    }

    pub(crate) fn set_home_page(&mut self, home_page: String) {
        self.home_page = Some(home_page);
    }

    pub(crate) fn set_description(&mut self, description: String) {
        self.description = Some(description);
    }

    pub(crate) fn add_license(&mut self, license: License) {
        self.licenses.push(license);
    }

    pub(crate) fn add_artifact(&mut self, conf: &str, artifact: Artifact) {
        self.artifacts
            .entry(conf.to_string())
            .or_default()
            .push(artifact);
    }

    /// Registers `dependency`, or merges it into the entry already indexed
    /// for the same target coordinate.
    pub(crate) fn add_dependency(&mut self, dependency: DependencyDescriptor) {
        match self.dependency_position(&dependency.dependency) {
            Some(index) => self.dependencies[index].merge(dependency),
            None => {
                self.dependency_index
                    .insert(dependency.dependency.clone(), self.dependencies.len());
                self.dependencies.push(dependency);
            }
        }
    }

    pub(crate) fn add_dependency_management(&mut self, record: ManagementRecord) {
        self.dependency_management
            .insert(record.classified_coordinate(), record);
    }

    pub(crate) fn add_mediator(&mut self, mediator: VersionOverride) {
        self.mediators.insert(mediator.module.clone(), mediator);
    }

    pub(crate) fn extra_info_mut(&mut self) -> &mut ExtraInfoStore {
        &mut self.extra_info
    }
}

impl ModuleDescriptor for PomModuleDescriptor {
    fn module(&self) -> Option<&ModuleCoordinate> {
        self.module.as_ref()
    }

    fn extra_info(&self) -> &ExtraInfoStore {
        &self.extra_info
    }

    fn management_source(&self) -> ManagementSource<'_> {
        ManagementSource::Structured(&self.dependency_management)
    }
}

/// A descriptor known only through its metadata store, e.g. one read back
/// from a serialized file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericModuleDescriptor {
    module: Option<ModuleCoordinate>,
    extra_info: ExtraInfoStore,
}

impl GenericModuleDescriptor {
    pub fn new(module: Option<ModuleCoordinate>, extra_info: ExtraInfoStore) -> Self {
        Self { module, extra_info }
    }
}

impl From<ExtraInfoStore> for GenericModuleDescriptor {
    fn from(extra_info: ExtraInfoStore) -> Self {
        Self::new(None, extra_info)
    }
}

impl ModuleDescriptor for GenericModuleDescriptor {
    fn module(&self) -> Option<&ModuleCoordinate> {
        self.module.as_ref()
    }

    fn extra_info(&self) -> &ExtraInfoStore {
        &self.extra_info
    }

    fn management_source(&self) -> ManagementSource<'_> {
        ManagementSource::Flat(&self.extra_info)
    }
}
