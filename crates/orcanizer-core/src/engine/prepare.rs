use super::error::JobError;
use super::geometry::GeometrySource;
use super::workspace::JobFiles;
use crate::core::io::orca_input::Recipe;
use tracing::debug;

/// Writes the input file for one job: a geometry from the configured source, rendered under
/// the batch's fixed recipe.
#[derive(Debug, Clone)]
pub struct InputPreparer<G> {
    source: G,
    recipe: Recipe,
}

impl<G: GeometrySource> InputPreparer<G> {
    pub fn new(source: G, recipe: Recipe) -> Self {
        Self { source, recipe }
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn source(&self) -> &G {
        &self.source
    }

    /// Builds the geometry for `identifier` and writes `<slot>.inp`, replacing any file
    /// left there by an earlier job with the same slot.
    pub fn prepare(&self, identifier: &str, files: &JobFiles) -> Result<(), JobError> {
        let geometry = self.source.build(identifier)?;
        let path = files.input();
        debug!(
            "Writing {} atoms (charge {}, multiplicity {}) to {:?}",
            geometry.atom_count(),
            geometry.charge,
            geometry.multiplicity,
            path
        );
        self.recipe
            .write_to_path(&geometry, &path)
            .map_err(|source| JobError::Io { path, source })
    }
}
