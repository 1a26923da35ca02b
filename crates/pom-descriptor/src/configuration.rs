//! The ten standard configurations every pom-derived descriptor declares.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub name: &'static str,
    pub visibility: Visibility,
    pub description: &'static str,
    pub extends: &'static [&'static str],
    pub transitive: bool,
}

impl Configuration {
    const fn public(
        name: &'static str,
        description: &'static str,
        extends: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            visibility: Visibility::Public,
            description,
            extends,
            transitive: true,
        }
    }
}

pub static MAVEN2_CONFIGURATIONS: [Configuration; 10] = [
    Configuration::public(
        "default",
        "runtime dependencies and master artifact can be used with this conf",
        &["runtime", "master"],
    ),
    Configuration::public(
        "master",
        "contains only the artifact published by this module itself, with no transitive dependencies",
        &[],
    ),
    Configuration::public(
        "compile",
        "this is the default scope, used if none is specified. Compile dependencies are available in all classpaths.",
        &[],
    ),
    Configuration::public(
        "provided",
        "this is much like compile, but indicates you expect the JDK or a container to provide it. It is only available on the compilation classpath, and is not transitive.",
        &[],
    ),
    Configuration::public(
        "runtime",
        "this scope indicates that the dependency is not required for compilation, but is for execution. It is in the runtime and test classpaths, but not the compile classpath.",
        &["compile"],
    ),
    Configuration::public(
        "test",
        "this scope indicates that the dependency is not required for normal use of the application, and is only available for the test compilation and execution phases.",
        &["runtime"],
    ),
    Configuration::public(
        "system",
        "this scope is similar to provided except that you have to provide the JAR which contains it explicitly. The artifact is always available and is not looked up in a repository.",
        &[],
    ),
    Configuration::public(
        "sources",
        "this configuration contains the source artifact of this module, if any.",
        &[],
    ),
    Configuration::public(
        "javadoc",
        "this configuration contains the javadoc artifact of this module, if any.",
        &[],
    ),
    Configuration::public("optional", "contains all optional dependencies", &[]),
];

pub fn find_configuration(name: &str) -> Option<&'static Configuration> {
    MAVEN2_CONFIGURATIONS.iter().find(|c| c.name == name)
}
