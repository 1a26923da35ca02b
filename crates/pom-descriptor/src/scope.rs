//! Maven scopes and their mapping onto descriptor configurations.
//!
//! Each scope expands into a fixed list of rules `owner <- source(*)`: the
//! dependency is attached to the owning module's `owner` configuration and
//! pulls in the target's `source` configuration. Optional dependencies are
//! redirected to the `optional` configuration where the scope allows it.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Compile,
    Provided,
    Runtime,
    Test,
    System,
}

/// One configuration mapping rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfMapping {
    pub owner: &'static str,
    pub source: &'static str,
}

impl ConfMapping {
    const fn new(owner: &'static str, source: &'static str) -> Self {
        Self { owner, source }
    }

    /// The dependency-side configuration expression, e.g. `compile(*)`.
    pub fn dependency_conf(&self) -> String {
        format!("{}(*)", self.source)
    }
}

static COMPILE: [ConfMapping; 3] = [
    ConfMapping::new("compile", "compile"),
    ConfMapping::new("compile", "master"),
    ConfMapping::new("runtime", "runtime"),
];

static COMPILE_OPTIONAL: [ConfMapping; 2] = [
    ConfMapping::new("optional", "compile"),
    ConfMapping::new("optional", "master"),
];

static PROVIDED: [ConfMapping; 4] = [
    ConfMapping::new("provided", "compile"),
    ConfMapping::new("provided", "provided"),
    ConfMapping::new("provided", "runtime"),
    ConfMapping::new("provided", "master"),
];

static PROVIDED_OPTIONAL: [ConfMapping; 4] = [
    ConfMapping::new("optional", "compile"),
    ConfMapping::new("optional", "provided"),
    ConfMapping::new("optional", "runtime"),
    ConfMapping::new("optional", "master"),
];

static RUNTIME: [ConfMapping; 3] = [
    ConfMapping::new("runtime", "compile"),
    ConfMapping::new("runtime", "runtime"),
    ConfMapping::new("runtime", "master"),
];

static RUNTIME_OPTIONAL: [ConfMapping; 3] = [
    ConfMapping::new("optional", "compile"),
    ConfMapping::new("optional", "provided"),
    ConfMapping::new("optional", "master"),
];

// `optional` has no effect in the test and system scopes.
static TEST: [ConfMapping; 2] = [
    ConfMapping::new("test", "runtime"),
    ConfMapping::new("test", "master"),
];

static SYSTEM: [ConfMapping; 1] = [ConfMapping::new("system", "master")];

impl Scope {
    pub const ALL: [Self; 5] = [
        Self::Compile,
        Self::Provided,
        Self::Runtime,
        Self::Test,
        Self::System,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Provided => "provided",
            Self::Runtime => "runtime",
            Self::Test => "test",
            Self::System => "system",
        }
    }

    /// Exact, case-sensitive lookup. `import` and unknown names yield `None`.
    pub fn from_known(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// Like [`from_known`](Self::from_known), with unknown names coerced to `compile`.
    pub fn coerce(name: &str) -> Self {
        Self::from_known(name).unwrap_or_default()
    }

    /// Mapping rules in declaration order.
    pub fn mapping(self, optional: bool) -> &'static [ConfMapping] {
        match (self, optional) {
            (Self::Compile, false) => &COMPILE,
            (Self::Compile, true) => &COMPILE_OPTIONAL,
            (Self::Provided, false) => &PROVIDED,
            (Self::Provided, true) => &PROVIDED_OPTIONAL,
            (Self::Runtime, false) => &RUNTIME,
            (Self::Runtime, true) => &RUNTIME_OPTIONAL,
            (Self::Test, _) => &TEST,
            (Self::System, _) => &SYSTEM,
        }
    }

    /// Configuration that receives explicit artifacts for this scope.
    pub fn artifact_conf(self, optional: bool) -> &'static str {
        if optional { "optional" } else { self.as_str() }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
