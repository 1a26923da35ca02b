//! Artifact lookup used to detect the implicit jar of `pom`-packaged modules.

use crate::artifact::Artifact;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactOrigin {
    Unknown,
    Located { location: String, is_local: bool },
}

impl ArtifactOrigin {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

/// Answers whether an artifact exists and where.
///
/// Lookups are synchronous. An error is treated by callers as "not found".
///
/// Plain closures implement this trait:
///
/// ```
/// use pom_descriptor::resolver::{ArtifactLocator, ArtifactOrigin};
///
/// let locator = |artifact: &pom_descriptor::Artifact| -> pom_descriptor::Result<ArtifactOrigin> {
///     Ok(ArtifactOrigin::Located {
///         location: format!("file:///repo/{}.{}", artifact.name, artifact.ext),
///         is_local: true,
///     })
/// };
/// # let _: &dyn ArtifactLocator = &locator;
/// ```
pub trait ArtifactLocator: Send + Sync {
    fn locate(&self, artifact: &Artifact) -> Result<ArtifactOrigin>;
}

impl<F> ArtifactLocator for F
where
    F: Fn(&Artifact) -> Result<ArtifactOrigin> + Send + Sync,
{
    fn locate(&self, artifact: &Artifact) -> Result<ArtifactOrigin> {
        self(artifact)
    }
}

/// Runs the lookup, folding failures into "not found".
pub(crate) fn exists(locator: Option<&dyn ArtifactLocator>, artifact: &Artifact) -> bool {
    let Some(locator) = locator else {
        return false;
    };
    match locator.locate(artifact) {
        Ok(origin) => !origin.is_unknown(),
        Err(e) => {
            tracing::debug!(
                "Lookup of {}.{} for {} failed, treating as absent: {}",
                artifact.name,
                artifact.ext,
                artifact.module,
                e
            );
            false
        }
    }
}
