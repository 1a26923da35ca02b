//! End-to-end builds driven the way a pom parser drives the builder.

use pom_descriptor::{
    Artifact, ArtifactOrigin, BuilderSettings, ClassifiedCoordinate, DependencyRecord,
    ExtraInfo, GenericModuleDescriptor, License, ManagementRecord, ModuleCoordinate,
    ModuleDescriptor, ModuleId, ModuleStatus, PluginRecord, PomDescriptorBuilder,
    PomModuleDescriptor, dependency_management_map, dependency_managements, plugins,
    pom_properties,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn version(group: &str, artifact: &str, version: &str) -> ModuleCoordinate {
    ModuleCoordinate::new(group, artifact, Some(version.to_string()))
}

/// A service pom with management, plugins, properties and a mix of scopes.
fn service_descriptor() -> PomModuleDescriptor {
    init_tracing();
    let settings = BuilderSettings::from_json(r#"{"extraJarPackagings": ["nbm"]}"#).unwrap();
    let mut b = PomDescriptorBuilder::new(settings, Some(1_700_000_000_000));

    b.set_module_rev_id("com.example", "service", Some("2.3.0-SNAPSHOT"));
    b.set_home_page("https://example.com/service");
    b.set_description("Example service");
    b.set_licenses([License {
        name: "Apache License, Version 2.0".into(),
        url: Some("https://www.apache.org/licenses/LICENSE-2.0".into()),
    }]);

    b.add_property("java.version", "17");
    b.add_property("netty.version", "4.1.100.Final");

    b.add_dependency_management(
        ManagementRecord::new("io.netty", "netty-transport").with_version("4.1.100.Final"),
    );
    b.add_dependency_management(
        ManagementRecord::new("org.junit.jupiter", "junit-jupiter")
            .with_version("5.10.1")
            .with_scope("test"),
    );
    b.add_dependency_management(
        ManagementRecord::new("commons-httpclient", "commons-httpclient")
            .with_version("3.1")
            .exclude("commons-logging", "commons-logging"),
    );

    b.add_plugin(&PluginRecord::new(
        "org.apache.maven.plugins",
        "maven-compiler-plugin",
        Some("3.11.0".into()),
    ));
    b.add_plugin(&PluginRecord::new("org.codehaus.mojo", "exec-maven-plugin", None));

    b.add_dependency(DependencyRecord::new("io.netty", "netty-transport"));
    b.add_dependency(
        DependencyRecord::new("io.netty", "netty-transport")
            .with_version("4.1.100.Final")
            .with_classifier("linux-x86_64"),
    );
    b.add_dependency(DependencyRecord::new("org.junit.jupiter", "junit-jupiter"));
    b.add_dependency(DependencyRecord::new("commons-httpclient", "commons-httpclient"));
    b.add_dependency(
        DependencyRecord::new("jakarta.servlet", "jakarta.servlet-api")
            .with_version("6.0.0")
            .with_scope("provided"),
    );
    b.add_dependency(
        DependencyRecord::new("com.example", "service")
            .with_version("2.2.0")
            .with_scope("test"),
    );

    b.add_main_artifact("service", "jar");
    b.add_source_artifact();
    b.add_javadoc_artifact();
    b.build()
}

#[test]
fn test_descriptor_metadata() {
    let md = service_descriptor();
    assert_eq!(
        md.module(),
        Some(&version("com.example", "service", "2.3.0-SNAPSHOT"))
    );
    assert_eq!(md.status(), ModuleStatus::Integration);
    assert_eq!(md.home_page(), Some("https://example.com/service"));
    assert_eq!(md.description(), Some("Example service"));
    assert_eq!(md.licenses()[0].name, "Apache License, Version 2.0");
    assert_eq!(md.publication_date(), Some(1_700_000_000_000));
    assert!(md.is_mapping_override());

    let names: Vec<_> = md.configurations().iter().map(|c| c.name).collect();
    assert_eq!(
        names,
        [
            "default", "master", "compile", "provided", "runtime", "test", "system", "sources",
            "javadoc", "optional"
        ]
    );
}

#[test]
fn test_dependencies_merged_and_self_dropped() {
    let md = service_descriptor();
    assert_eq!(md.dependencies().len(), 4);

    let netty = md
        .dependency(&version("io.netty", "netty-transport", "4.1.100.Final"))
        .unwrap();
    let classifiers: Vec<_> = netty.artifacts().iter().map(|a| a.classifier()).collect();
    assert_eq!(classifiers, [None, Some("linux-x86_64")]);

    assert!(
        md.dependencies()
            .iter()
            .all(|dd| dd.dependency().artifact_id != "service")
    );
}

#[test]
fn test_managed_scope_and_exclusions() {
    let md = service_descriptor();

    let junit = md
        .dependency(&version("org.junit.jupiter", "junit-jupiter", "5.10.1"))
        .unwrap();
    let confs: Vec<_> = junit.module_configurations().collect();
    assert_eq!(confs, ["test"]);
    assert_eq!(junit.dependency_configurations("test"), ["runtime(*)", "master(*)"]);

    let httpclient = md
        .dependency(&version("commons-httpclient", "commons-httpclient", "3.1"))
        .unwrap();
    for conf in ["compile", "runtime"] {
        assert_eq!(
            httpclient.exclude_rules(conf)[0].module,
            ModuleId::new("commons-logging", "commons-logging")
        );
    }

    let servlet = md
        .dependency(&version("jakarta.servlet", "jakarta.servlet-api", "6.0.0"))
        .unwrap();
    assert_eq!(
        servlet.dependency_configurations("provided"),
        ["compile(*)", "provided(*)", "runtime(*)", "master(*)"]
    );
}

#[test]
fn test_published_artifacts() {
    let md = service_descriptor();
    let master = md.artifacts_for("master");
    assert_eq!(master.len(), 1);
    assert_eq!(master[0].ext, "jar");
    assert_eq!(master[0].publication_date, Some(1_700_000_000_000));
    assert_eq!(md.artifacts_for("sources")[0].classifier(), Some("sources"));
    assert_eq!(md.artifacts_for("javadoc")[0].artifact_type, "javadoc");
}

#[test]
fn test_management_roundtrip_through_metadata() {
    let md = service_descriptor();
    let structured = dependency_managements(&md);

    let generic = GenericModuleDescriptor::new(md.module().cloned(), md.extra_info().clone());
    let flat = dependency_managements(&generic);
    assert_eq!(flat, structured);

    insta::assert_json_snapshot!(flat[2], @r#"
    {
      "group_id": "commons-httpclient",
      "artifact_id": "commons-httpclient",
      "classifier": null,
      "version": "3.1",
      "scope": null,
      "exclusions": [
        {
          "group_id": "commons-logging",
          "artifact_id": "commons-logging"
        }
      ]
    }
    "#);

    let versions = dependency_management_map(&generic);
    assert_eq!(versions, dependency_management_map(&md));
    assert_eq!(
        versions
            .get(&ClassifiedCoordinate::new("org.junit.jupiter", "junit-jupiter", None))
            .map(String::as_str),
        Some("5.10.1")
    );
}

#[test]
fn test_management_roundtrip_single_record() {
    let mut b = PomDescriptorBuilder::new(BuilderSettings::default(), None);
    b.set_module_rev_id("g", "m", Some("1.0"));
    b.add_dependency_management(
        ManagementRecord::new("G", "A")
            .with_version("1.2")
            .with_scope("runtime")
            .exclude("X", "Y"),
    );
    let md = b.build();

    let generic = GenericModuleDescriptor::from(md.extra_info().clone());
    let records = dependency_managements(&generic);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].version.as_deref(), Some("1.2"));
    assert_eq!(records[0].scope.as_deref(), Some("runtime"));
    assert_eq!(records[0].exclusions, [ModuleId::new("X", "Y")]);
}

#[test]
fn test_plugins_and_properties_read_back() {
    let md = service_descriptor();
    let generic = GenericModuleDescriptor::from(md.extra_info().clone());

    let found = plugins(&generic);
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].artifact_id, "maven-compiler-plugin");
    assert!(found[1].version.is_none());

    let props = pom_properties(&generic);
    assert_eq!(props.get("java.version").map(String::as_str), Some("17"));
    assert_eq!(props.len(), 2);
}

#[test]
fn test_parent_metadata_is_inherited() {
    init_tracing();
    let parent = service_descriptor();

    let mut b = PomDescriptorBuilder::new(BuilderSettings::default(), None);
    b.set_module_rev_id("com.example", "child", Some("2.3.0"));
    b.add_extra_infos(
        parent
            .extra_info()
            .iter()
            .map(|(name, content)| ExtraInfo::new(name, content)),
    );
    b.add_extra_infos([ExtraInfo::new("m:properties__java.version", "21")]);
    b.add_dependency(DependencyRecord::new("commons-httpclient", "commons-httpclient"));

    let md = b.build();
    assert_eq!(md.status(), ModuleStatus::Release);
    assert_eq!(pom_properties(&md).get("java.version").map(String::as_str), Some("17"));

    let dd = md
        .dependency(&version("commons-httpclient", "commons-httpclient", "3.1"))
        .unwrap();
    assert_eq!(dd.exclude_rules("compile").len(), 1);
}

#[test]
fn test_malformed_metadata_does_not_abort_reads() {
    init_tracing();
    let mut b = PomDescriptorBuilder::new(BuilderSettings::default(), None);
    b.add_extra_infos([
        ExtraInfo::new("m:dependency.management__a__b__version", "1.0"),
        ExtraInfo::new("m:dependency.management__g__a__null__version", "2.0"),
    ]);
    let md = b.build();

    let generic = GenericModuleDescriptor::from(md.extra_info().clone());
    let records = dependency_managements(&generic);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].version.as_deref(), Some("2.0"));
}

#[test]
fn test_pom_packaging_probes_for_jar() {
    let mut b = PomDescriptorBuilder::new(BuilderSettings::default(), None);
    b.set_module_rev_id("com.example", "parent", Some("1.0"));
    b.add_main_artifact("parent", "pom");
    assert!(b.build().artifacts().is_empty());

    let mut b = PomDescriptorBuilder::new(BuilderSettings::default(), None).with_locator(
        |a: &Artifact| -> pom_descriptor::Result<ArtifactOrigin> {
            Ok(ArtifactOrigin::Located {
                location: format!("/repo/{}/{}.{}", a.module, a.name, a.ext),
                is_local: true,
            })
        },
    );
    b.set_module_rev_id("com.example", "parent", Some("1.0"));
    b.add_main_artifact("parent", "pom");
    let md = b.build();
    assert_eq!(md.artifacts_for("master").len(), 1);
    assert_eq!(md.artifacts_for("master")[0].ext, "jar");
}

#[test]
fn test_test_jar_dependency() {
    let mut b = PomDescriptorBuilder::new(BuilderSettings::default(), None);
    b.set_module_rev_id("com.example", "app", Some("1.0"));
    b.add_dependency(
        DependencyRecord::new("com.example", "core")
            .with_version("1.0")
            .with_type("test-jar")
            .with_scope("test"),
    );
    let md = b.build();
    let artifacts = md.dependencies()[0].artifacts();
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].ext, "jar");
    assert_eq!(artifacts[0].classifier(), Some("tests"));
    assert_eq!(artifacts[0].confs, ["test"]);
}

#[test]
fn test_wildcard_exclusion() {
    let mut b = PomDescriptorBuilder::new(BuilderSettings::default(), None);
    b.set_module_rev_id("com.example", "app", Some("1.0"));
    b.add_dependency(
        DependencyRecord::new("org.example", "lib")
            .with_version("1.0")
            .exclude("X", "Y")
            .exclude("*", "*"),
    );
    let md = b.build();
    let dd = &md.dependencies()[0];
    assert!(!dd.is_transitive());
    assert_eq!(dd.all_exclude_rules().count(), 0);
}

#[test]
fn test_descriptor_serializes() {
    let md = service_descriptor();
    let json = serde_json::to_value(&md).unwrap();
    assert_eq!(json["status"], "integration");
    assert_eq!(json["dependencies"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["dependency_management"].as_array().map(Vec::len), Some(3));
}
