//! Ordered name/content metadata attached to a descriptor.
//!
//! The store is the only place the configuration-based format can carry
//! pom-specific data (dependency management, properties, plugins). Names
//! are unique; insertion order is preserved.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraInfo {
    pub name: String,
    pub content: String,
}

impl ExtraInfo {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Serialized as a list of [`ExtraInfo`]; duplicate names in a loaded list
/// keep the first entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ExtraInfo>", into = "Vec<ExtraInfo>")]
pub struct ExtraInfoStore {
    entries: IndexMap<String, String>,
}

impl ExtraInfoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(name, content)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(name, content)| (name.as_str(), content.as_str()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Adds the entry unless the name is already present.
    ///
    /// Returns `false` when an entry with that name exists; its content is
    /// left untouched.
    pub fn insert_if_absent(
        &mut self,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> bool {
        match self.entries.entry(name.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(content.into());
                true
            }
        }
    }

    /// Replaces the content of an existing entry in place, or appends a new one.
    pub fn upsert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.entries.insert(name.into(), content.into());
    }

    /// Entries whose name starts with `prefix`, in insertion order.
    pub fn with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.iter().filter(move |(name, _)| name.starts_with(prefix))
    }
}

impl FromIterator<ExtraInfo> for ExtraInfoStore {
    fn from_iter<I: IntoIterator<Item = ExtraInfo>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl Extend<ExtraInfo> for ExtraInfoStore {
    /// Insert-once semantics: the first entry for a name wins.
    fn extend<I: IntoIterator<Item = ExtraInfo>>(&mut self, iter: I) {
        for entry in iter {
            self.insert_if_absent(entry.name, entry.content);
        }
    }
}

impl From<Vec<ExtraInfo>> for ExtraInfoStore {
    fn from(entries: Vec<ExtraInfo>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<ExtraInfoStore> for Vec<ExtraInfo> {
    fn from(store: ExtraInfoStore) -> Self {
        store
            .entries
            .into_iter()
            .map(|(name, content)| ExtraInfo { name, content })
            .collect()
    }
}
