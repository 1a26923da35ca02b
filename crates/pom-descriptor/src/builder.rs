//! Incremental construction of a [`PomModuleDescriptor`].
//!
//! A pom parser drives one builder per document, calling the operations
//! below in document order: coordinates, metadata, dependency management,
//! plugins, dependencies, then artifacts. [`PomDescriptorBuilder::build`]
//! hands the finished descriptor over as a read-only value.
//!
//! # Merging
//!
//! Several `<dependency>` elements may resolve to the same target
//! coordinate (typically the same module with different classifiers).
//! They are merged into a single [`DependencyDescriptor`] carrying one
//! explicit artifact per declaration, so the default jar is never lost
//! when a classified variant is declared next to it.

use crate::artifact::{Artifact, DependencyArtifact, extension_for_packaging};
use crate::codec::{self, ManagementField, ManagementKey, PLUGINS_TAG};
use crate::config::BuilderSettings;
use crate::descriptor::{
    DependencyDescriptor, ExcludeRule, ModuleDescriptor, PatternMatcher, PomModuleDescriptor,
    VersionOverride,
};
use crate::extra_info::ExtraInfo;
use crate::resolver::{self, ArtifactLocator};
use crate::scope::Scope;
use crate::types::{
    ClassifiedCoordinate, DependencyRecord, License, ManagementRecord, ModuleCoordinate, ModuleId,
    PluginRecord,
};
use crate::version::status_for;

/// Outcome of looking up the target coordinate of a declaration.
enum MergeTarget {
    Created(Box<DependencyDescriptor>),
    Reused(usize),
}

/// What an entry looked like before the current declaration touched it.
struct ExistingEntry {
    confs: Vec<String>,
    had_artifacts: bool,
}

pub struct PomDescriptorBuilder {
    descriptor: PomModuleDescriptor,
    settings: BuilderSettings,
    locator: Option<Box<dyn ArtifactLocator>>,
    main_artifact: Option<Artifact>,
}

impl PomDescriptorBuilder {
    /// `last_modified` is the source document's modification time in
    /// milliseconds since the epoch; it becomes the publication date.
    pub fn new(settings: BuilderSettings, last_modified: Option<u64>) -> Self {
        Self {
            descriptor: PomModuleDescriptor::new(last_modified),
            settings,
            locator: None,
            main_artifact: None,
        }
    }

    /// Lookup used to probe for the implicit jar of `pom`-packaged modules.
    #[must_use]
    pub fn with_locator(mut self, locator: impl ArtifactLocator + 'static) -> Self {
        self.locator = Some(Box::new(locator));
        self
    }

    pub fn module_descriptor(&self) -> &PomModuleDescriptor {
        &self.descriptor
    }

    pub fn build(self) -> PomModuleDescriptor {
        self.descriptor
    }

    pub fn set_module_rev_id(&mut self, group_id: &str, artifact_id: &str, version: Option<&str>) {
        let status = status_for(version, &self.settings.snapshot_qualifier);
        let module = ModuleCoordinate::new(group_id, artifact_id, version.map(str::to_owned));
        tracing::debug!("Building descriptor for {} ({})", module, status);
        self.descriptor.set_module(module, status);
    }

    pub fn set_home_page(&mut self, home_page: impl Into<String>) {
        self.descriptor.set_home_page(home_page.into());
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.descriptor.set_description(description.into());
    }

    pub fn set_licenses(&mut self, licenses: impl IntoIterator<Item = License>) {
        for license in licenses {
            self.descriptor.add_license(license);
        }
    }

    fn module(&self) -> ModuleCoordinate {
        self.descriptor.module().cloned().unwrap_or_default()
    }

    /// Registers the module's own artifact under `master`.
    ///
    /// `pom` packaging publishes nothing, unless the locator finds a jar
    /// next to the pom anyway.
    pub fn add_main_artifact(&mut self, artifact_id: &str, packaging: &str) {
        let module = self.module();
        let publication_date = self.descriptor.publication_date();

        let extra = &self.settings.extra_jar_packagings;
        let artifact = match extension_for_packaging(packaging, extra) {
            Some(ext) => Artifact::new(module, artifact_id, packaging, ext, publication_date),
            None => {
                let candidate = Artifact::new(module, artifact_id, "jar", "jar", publication_date);
                if !resolver::exists(self.locator.as_deref(), &candidate) {
                    tracing::debug!("No implicit jar for pom-packaged {}", candidate.module);
                    return;
                }
                candidate
            }
        };

        self.main_artifact = Some(artifact.clone());
        self.descriptor.add_artifact("master", artifact);
    }

    pub fn main_artifact(&self) -> Option<&Artifact> {
        self.main_artifact.as_ref()
    }

    pub fn source_artifact(&self) -> Artifact {
        Artifact::sources(self.module(), self.descriptor.publication_date())
    }

    pub fn src_artifact(&self) -> Artifact {
        Artifact::src(self.module(), self.descriptor.publication_date())
    }

    pub fn javadoc_artifact(&self) -> Artifact {
        Artifact::javadoc(self.module(), self.descriptor.publication_date())
    }

    pub fn add_source_artifact(&mut self) {
        let artifact = self.source_artifact();
        self.descriptor.add_artifact("sources", artifact);
    }

    pub fn add_src_artifact(&mut self) {
        let artifact = self.src_artifact();
        self.descriptor.add_artifact("sources", artifact);
    }

    pub fn add_javadoc_artifact(&mut self) {
        let artifact = self.javadoc_artifact();
        self.descriptor.add_artifact("javadoc", artifact);
    }

    fn is_self_dependency(&self, target: &ModuleId) -> bool {
        self.descriptor.module().is_some_and(|own| {
            own.group_id == target.group_id && own.artifact_id == target.artifact_id
        })
    }

    fn default_version(&self, coordinate: &ClassifiedCoordinate) -> Option<String> {
        self.descriptor.management_for(coordinate).version_of(coordinate)
    }

    /// Managed scope for `coordinate`, falling back to `compile`.
    fn default_scope(&self, coordinate: &ClassifiedCoordinate) -> Scope {
        self.descriptor
            .management_for(coordinate)
            .scope_of(coordinate)
            .map_or_else(Scope::default, |s| Scope::coerce(&s))
    }

    /// Adds a `<dependency>` declaration, merging it into an existing entry
    /// for the same target coordinate when there is one.
    ///
    /// Unknown scopes become `compile`; a dependency on the module itself
    /// is dropped.
    pub fn add_dependency(&mut self, record: DependencyRecord) {
        let declared_scope = record.scope().map(Scope::coerce);
        let classified = record.classified_coordinate();

        let version = record
            .version()
            .map(str::to_owned)
            .or_else(|| self.default_version(&classified));
        let coordinate = ModuleCoordinate::new(
            record.group_id.clone(),
            record.artifact_id.clone(),
            version,
        );

        if self.is_self_dependency(&coordinate.module_id()) {
            return;
        }

        // Exclusions are inherited from dependency management when the
        // declaration has none of its own.
        let excluded = if record.exclusions.is_empty() {
            self.descriptor
                .management_for(&classified)
                .exclusions_of(&classified)
        } else {
            record.exclusions.clone()
        };
        let exclude_all = excluded.iter().any(ModuleId::is_wildcard);

        let scope = declared_scope.unwrap_or_else(|| self.default_scope(&classified));

        let existing = self.descriptor.dependency_position(&coordinate).map(|index| {
            let dd = &self.descriptor.dependencies()[index];
            let entry = ExistingEntry {
                confs: dd.module_configurations().map(str::to_owned).collect(),
                had_artifacts: !dd.artifacts().is_empty(),
            };
            (index, entry)
        });
        let mut target = match &existing {
            Some((index, _)) => MergeTarget::Reused(*index),
            None => MergeTarget::Created(Box::new(DependencyDescriptor::from_record(
                record.clone(),
                coordinate,
                !exclude_all,
            ))),
        };

        // A wildcard exclusion only turns transitivity off; no rule is
        // generated for it or for the exclusions declared next to it.
        let excluded: &[ModuleId] = if exclude_all { &[] } else { &excluded };
        let dd = match &mut target {
            MergeTarget::Created(dd) => dd.as_mut(),
            MergeTarget::Reused(index) => self.descriptor.dependency_at_mut(*index),
        };
        apply_declaration(
            dd,
            &record,
            scope,
            existing.as_ref().map(|(_, entry)| entry),
            excluded,
            &self.settings.extra_jar_packagings,
        );

        if let MergeTarget::Created(dd) = target {
            self.descriptor.add_dependency(*dd);
        }
    }

    /// Registers an already built dependency entry, e.g. one inherited from
    /// a parent document. An entry for a target that is already present is
    /// merged into it; a dependency on the module itself is dropped.
    pub fn add_dependency_descriptor(&mut self, dependency: DependencyDescriptor) {
        if self.is_self_dependency(&dependency.dependency().module_id()) {
            return;
        }
        self.descriptor.add_dependency(dependency);
    }

    /// Records a `<dependencyManagement>` entry.
    ///
    /// Besides the structured record, version, scope and exclusions are
    /// written to the metadata store so readers that only see the store can
    /// recover them, and a version override is registered so transitive
    /// requests for the module are mediated to the managed version.
    pub fn add_dependency_management(&mut self, record: ManagementRecord) {
        let coordinate = record.classified_coordinate();
        let store = self.descriptor.extra_info_mut();

        store.upsert(
            ManagementKey::new(coordinate.clone(), ManagementField::Version).encode(),
            record.version().unwrap_or_default(),
        );
        if let Some(scope) = record.scope() {
            store.upsert(
                ManagementKey::new(coordinate.clone(), ManagementField::Scope).encode(),
                scope,
            );
        }
        for (index, excluded) in record.exclusions.iter().enumerate() {
            store.upsert(
                ManagementKey::new(coordinate.clone(), ManagementField::Exclusion(index)).encode(),
                codec::encode_exclusion(excluded),
            );
        }

        self.descriptor.add_mediator(VersionOverride {
            module: record.module_id(),
            matcher: PatternMatcher::Exact,
            version: record.version().map(str::to_owned),
        });
        self.descriptor.add_dependency_management(record);
    }

    /// Appends a build plugin to the `|`-joined plugin list.
    pub fn add_plugin(&mut self, plugin: &PluginRecord) {
        let store = self.descriptor.extra_info_mut();
        let list = codec::append_plugin(store.get(PLUGINS_TAG), plugin);
        store.upsert(PLUGINS_TAG, list);
    }

    /// Imports metadata entries, keeping existing content for names already present.
    pub fn add_extra_infos(&mut self, entries: impl IntoIterator<Item = ExtraInfo>) {
        self.descriptor.extra_info_mut().extend(entries);
    }

    pub fn add_property(&mut self, name: &str, value: impl Into<String>) {
        self.descriptor
            .extra_info_mut()
            .insert_if_absent(codec::property_key(name), value);
    }
}

/// Applies one declaration to its (new or reused) dependency entry.
fn apply_declaration(
    dd: &mut DependencyDescriptor,
    record: &DependencyRecord,
    scope: Scope,
    existing: Option<&ExistingEntry>,
    excluded: &[ModuleId],
    extra_jar_packagings: &[String],
) {
    for rule in scope.mapping(record.optional) {
        dd.add_dependency_configuration(rule.owner, rule.dependency_conf());
    }

    let artifact_conf = scope.artifact_conf(record.optional);
    let name = dd.dependency().artifact_id.clone();
    if record.is_non_default_artifact() {
        // The entry stood for the default jar implicitly; make that explicit
        // before a classified artifact is added next to it.
        if let Some(existing) = existing
            && !existing.had_artifacts
        {
            let conf = match existing.confs.as_slice() {
                [only] => only.as_str(),
                _ => artifact_conf,
            };
            dd.add_dependency_artifact(conf, DependencyArtifact::default_jar(name.clone()));
        }
        let artifact = DependencyArtifact::for_dependency(
            name,
            record.dep_type(),
            record.classifier(),
            extra_jar_packagings,
        );
        dd.add_dependency_artifact(artifact_conf, artifact);
    } else if existing.is_some() {
        dd.add_dependency_artifact(artifact_conf, DependencyArtifact::default_jar(name));
    }

    let confs: Vec<String> = dd.module_configurations().map(str::to_owned).collect();
    for module in excluded {
        for conf in &confs {
            dd.add_exclude_rule(conf, ExcludeRule::for_module(module.clone()));
        }
    }
}
