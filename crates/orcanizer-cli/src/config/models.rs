use orcanizer::engine::config::BatchConfig;
use orcanizer::engine::geometry::{GeometrySource, ObabelGeometry, XyzDirectory};
use orcanizer::engine::invoke::OrcaRunner;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum GeometryBackend {
    Obabel { executable: String },
    XyzDir { dir: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeometryConfig {
    pub backend: GeometryBackend,
    pub multiplicity: Option<u32>,
}

impl GeometryConfig {
    pub fn source(&self) -> Box<dyn GeometrySource> {
        match &self.backend {
            GeometryBackend::Obabel { executable } => Box::new(
                ObabelGeometry::new(executable.clone()).with_multiplicity(self.multiplicity),
            ),
            GeometryBackend::XyzDir { dir } => {
                Box::new(XyzDirectory::new(dir.clone()).with_multiplicity(self.multiplicity))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub batch: BatchConfig,
    pub geometry: GeometryConfig,
}

impl AppConfig {
    pub fn runner(&self) -> OrcaRunner {
        OrcaRunner::new(self.batch.executable.clone())
    }
}
