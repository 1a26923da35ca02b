//! Read-side access to dependency management, plugin and property data.
//!
//! Management data lives either in structured records (descriptors built by
//! this crate) or only in the flat metadata store (descriptors read back from
//! elsewhere). [`ManagementSource`] hides the difference; every decode goes
//! through [`crate::codec`].

use crate::codec::{
    self, ManagementField, ManagementKey, PLUGIN_SEPARATOR, PLUGINS_TAG, PROPERTIES_TAG,
};
use crate::descriptor::ModuleDescriptor;
use crate::extra_info::ExtraInfoStore;
use crate::types::{ClassifiedCoordinate, ManagementRecord, ModuleId, PluginRecord};
use indexmap::{IndexMap, IndexSet};

#[derive(Debug, Clone, Copy)]
pub enum ManagementSource<'a> {
    Structured(&'a IndexMap<ClassifiedCoordinate, ManagementRecord>),
    Flat(&'a ExtraInfoStore),
}

impl ManagementSource<'_> {
    pub fn version_of(&self, coordinate: &ClassifiedCoordinate) -> Option<String> {
        match self {
            Self::Structured(map) => map
                .get(coordinate)
                .and_then(|r| r.version())
                .map(str::to_owned),
            Self::Flat(store) => flat_field(store, coordinate, ManagementField::Version),
        }
    }

    pub fn scope_of(&self, coordinate: &ClassifiedCoordinate) -> Option<String> {
        match self {
            Self::Structured(map) => map
                .get(coordinate)
                .and_then(|r| r.scope())
                .map(str::to_owned),
            Self::Flat(store) => flat_field(store, coordinate, ManagementField::Scope),
        }
    }

    /// Managed exclusions in declaration order. Malformed flat entries are
    /// logged and skipped.
    pub fn exclusions_of(&self, coordinate: &ClassifiedCoordinate) -> Vec<ModuleId> {
        match self {
            Self::Structured(map) => map
                .get(coordinate)
                .map(|r| r.exclusions.clone())
                .unwrap_or_default(),
            Self::Flat(store) => {
                let prefix = codec::exclusion_prefix(coordinate);
                store
                    .with_prefix(&prefix)
                    .filter_map(|(name, content)| match codec::decode_exclusion(content) {
                        Ok(module) => Some(module),
                        Err(e) => {
                            tracing::error!("Skipping exclusion {}: {}", name, e);
                            None
                        }
                    })
                    .collect()
            }
        }
    }

    /// Every managed coordinate, in first-seen order.
    pub fn coordinates(&self) -> Vec<ClassifiedCoordinate> {
        match self {
            Self::Structured(map) => map.keys().cloned().collect(),
            Self::Flat(store) => {
                let mut seen = IndexSet::new();
                for key in flat_keys(store) {
                    seen.insert(key.coordinate);
                }
                seen.into_iter().collect()
            }
        }
    }

    pub fn records(&self) -> Vec<ManagementRecord> {
        match self {
            Self::Structured(map) => map.values().cloned().collect(),
            Self::Flat(_) => self
                .coordinates()
                .into_iter()
                .map(|coordinate| ManagementRecord {
                    version: self.version_of(&coordinate),
                    scope: self.scope_of(&coordinate),
                    exclusions: self.exclusions_of(&coordinate),
                    group_id: coordinate.group_id,
                    artifact_id: coordinate.artifact_id,
                    classifier: coordinate.classifier,
                })
                .collect(),
        }
    }

    /// Managed version per coordinate; coordinates without a version are left out.
    pub fn versions(&self) -> IndexMap<ClassifiedCoordinate, String> {
        match self {
            Self::Structured(map) => map
                .iter()
                .filter_map(|(c, r)| r.version().map(|v| (c.clone(), v.to_string())))
                .collect(),
            Self::Flat(store) => store
                .iter()
                .filter_map(|(name, content)| {
                    let key = decode_logged(name)?;
                    (key.field == ManagementField::Version && !content.is_empty())
                        .then(|| (key.coordinate, content.to_string()))
                })
                .collect(),
        }
    }
}

fn flat_field(
    store: &ExtraInfoStore,
    coordinate: &ClassifiedCoordinate,
    field: ManagementField,
) -> Option<String> {
    store
        .get(&ManagementKey::new(coordinate.clone(), field).encode())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn decode_logged(name: &str) -> Option<ManagementKey> {
    match ManagementKey::decode(name) {
        Ok(key) => key,
        Err(e) => {
            tracing::warn!("Skipping dependency management extra info: {}", e);
            None
        }
    }
}

fn flat_keys(store: &ExtraInfoStore) -> impl Iterator<Item = ManagementKey> + '_ {
    store.iter().filter_map(|(name, _)| decode_logged(name))
}

pub fn dependency_managements<M: ModuleDescriptor + ?Sized>(md: &M) -> Vec<ManagementRecord> {
    md.management_source().records()
}

pub fn dependency_management_map<M: ModuleDescriptor + ?Sized>(
    md: &M,
) -> IndexMap<ClassifiedCoordinate, String> {
    md.management_source().versions()
}

/// Plugins recorded with [`add_plugin`](crate::PomDescriptorBuilder::add_plugin).
pub fn plugins<M: ModuleDescriptor + ?Sized>(md: &M) -> Vec<PluginRecord> {
    let Some(list) = md.extra_info().get(PLUGINS_TAG) else {
        return Vec::new();
    };
    list.split(PLUGIN_SEPARATOR)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match codec::decode_plugin(entry) {
            Ok(plugin) => Some(plugin),
            Err(e) => {
                tracing::warn!("Skipping plugin entry: {}", e);
                None
            }
        })
        .collect()
}

pub fn pom_properties<M: ModuleDescriptor + ?Sized>(md: &M) -> IndexMap<String, String> {
    extract_pom_properties(md.extra_info())
}

pub fn extract_pom_properties(store: &ExtraInfoStore) -> IndexMap<String, String> {
    store
        .with_prefix(PROPERTIES_TAG)
        .filter_map(|(key, content)| {
            codec::decode_property_key(key).map(|name| (name.to_string(), content.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::GenericModuleDescriptor;
    use crate::extra_info::ExtraInfo;

    fn coordinate() -> ClassifiedCoordinate {
        ClassifiedCoordinate::new("com.google.guava", "guava", None)
    }

    fn flat_store() -> ExtraInfoStore {
        [
            ExtraInfo::new(
                "m:dependency.management__com.google.guava__guava__null__version",
                "33.0.0-jre",
            ),
            ExtraInfo::new(
                "m:dependency.management__com.google.guava__guava__null__scope",
                "runtime",
            ),
            ExtraInfo::new(
                "m:dependency.management__com.google.guava__guava__null__exclusion_0",
                "com.google.code.findbugs__jsr305",
            ),
            ExtraInfo::new("m:properties__guava.version", "33.0.0-jre"),
            ExtraInfo::new(
                "m:dependency.management__junit__junit__null__version",
                "4.13.2",
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_flat_records() {
        let md = GenericModuleDescriptor::from(flat_store());
        let records = dependency_managements(&md);
        assert_eq!(records.len(), 2);

        let guava = &records[0];
        assert_eq!(guava.group_id, "com.google.guava");
        assert_eq!(guava.classifier, None);
        assert_eq!(guava.version.as_deref(), Some("33.0.0-jre"));
        assert_eq!(guava.scope.as_deref(), Some("runtime"));
        assert_eq!(
            guava.exclusions,
            [ModuleId::new("com.google.code.findbugs", "jsr305")]
        );

        let junit = &records[1];
        assert_eq!(junit.artifact_id, "junit");
        assert!(junit.scope.is_none());
        assert!(junit.exclusions.is_empty());
    }

    #[test]
    fn test_flat_version_map_ignores_other_fields() {
        let md = GenericModuleDescriptor::from(flat_store());
        let versions = dependency_management_map(&md);
        assert_eq!(versions.len(), 2);
        assert_eq!(versions.get(&coordinate()).map(String::as_str), Some("33.0.0-jre"));
    }

    #[test]
    fn test_malformed_keys_are_skipped() {
        let mut store = flat_store();
        store.upsert("m:dependency.management__broken__version", "1.0");
        store.upsert(
            "m:dependency.management__com.google.guava__guava__null__exclusion_1",
            "not-a-pair",
        );
        let md = GenericModuleDescriptor::from(store);

        let records = dependency_managements(&md);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].exclusions.len(), 1);
        assert_eq!(dependency_management_map(&md).len(), 2);
    }

    #[test]
    fn test_structured_source() {
        let mut map = IndexMap::new();
        let record = ManagementRecord::new("com.google.guava", "guava")
            .with_version("33.0.0-jre")
            .exclude("com.google.code.findbugs", "jsr305");
        map.insert(record.classified_coordinate(), record.clone());
        let source = ManagementSource::Structured(&map);

        assert_eq!(source.version_of(&coordinate()).as_deref(), Some("33.0.0-jre"));
        assert!(source.scope_of(&coordinate()).is_none());
        assert_eq!(source.exclusions_of(&coordinate()).len(), 1);
        assert_eq!(source.records(), [record]);
        let classified = ClassifiedCoordinate::new("com.google.guava", "guava", Some("x".into()));
        assert!(source.version_of(&classified).is_none());
    }

    #[test]
    fn test_plugins() {
        let mut store = ExtraInfoStore::new();
        store.upsert(
            PLUGINS_TAG,
            "org.apache.maven.plugins__maven-compiler-plugin__3.11.0|bad|org.codehaus.mojo__exec-maven-plugin__",
        );
        let md = GenericModuleDescriptor::from(store);
        let found = plugins(&md);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].version.as_deref(), Some("3.11.0"));
        assert_eq!(found[1].artifact_id, "exec-maven-plugin");
        assert!(found[1].version.is_none());
    }

    #[test]
    fn test_no_plugins() {
        let md = GenericModuleDescriptor::default();
        assert!(plugins(&md).is_empty());
    }

    #[test]
    fn test_properties() {
        let md = GenericModuleDescriptor::from(flat_store());
        let props = pom_properties(&md);
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("guava.version").map(String::as_str), Some("33.0.0-jre"));
    }
}
