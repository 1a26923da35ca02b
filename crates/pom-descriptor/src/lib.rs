//! Module descriptors from pom.xml dependency declarations.
//!
//! This crate turns the scope-based dependency model of a Maven pom into a
//! configuration-based module descriptor: scopes become configuration
//! mappings, classifier variants of one dependency are merged into a single
//! entry, and dependency management, plugins and properties are kept in a
//! flat metadata store so they survive serialization.
//!
//! Parsing the XML itself is left to the caller, which feeds the builder in
//! document order:
//!
//! ```
//! use pom_descriptor::{BuilderSettings, DependencyRecord, ManagementRecord, PomDescriptorBuilder};
//!
//! let mut builder = PomDescriptorBuilder::new(BuilderSettings::default(), None);
//! builder.set_module_rev_id("com.example", "app", Some("1.0.0"));
//! builder.add_dependency_management(
//!     ManagementRecord::new("org.slf4j", "slf4j-api").with_version("2.0.9"),
//! );
//! builder.add_dependency(DependencyRecord::new("org.slf4j", "slf4j-api"));
//! builder.add_main_artifact("app", "jar");
//!
//! let md = builder.build();
//! assert_eq!(md.dependencies()[0].dependency().version(), Some("2.0.9"));
//! ```

pub mod artifact;
pub mod builder;
pub mod codec;
pub mod config;
pub mod configuration;
pub mod descriptor;
pub mod error;
pub mod extra_info;
pub mod management;
pub mod resolver;
pub mod scope;
pub mod types;
pub mod version;

pub use artifact::{Artifact, DependencyArtifact};
pub use builder::PomDescriptorBuilder;
pub use config::BuilderSettings;
pub use configuration::{Configuration, MAVEN2_CONFIGURATIONS, Visibility};
pub use descriptor::{
    DependencyDescriptor, ExcludeRule, GenericModuleDescriptor, ModuleDescriptor,
    PomModuleDescriptor, VersionOverride,
};
pub use error::{PomError, Result};
pub use extra_info::{ExtraInfo, ExtraInfoStore};
pub use management::{
    ManagementSource, dependency_management_map, dependency_managements, extract_pom_properties,
    plugins, pom_properties,
};
pub use resolver::{ArtifactLocator, ArtifactOrigin};
pub use scope::Scope;
pub use types::{
    ClassifiedCoordinate, DependencyRecord, License, ManagementRecord, ModuleCoordinate, ModuleId,
    PluginRecord,
};
pub use version::ModuleStatus;
