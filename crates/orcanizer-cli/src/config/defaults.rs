use super::file::BackendKind;
use orcanizer::engine::config::{
    DEFAULT_EXECUTABLE, DEFAULT_FAILURE_LOG, DEFAULT_SUCCESS_LOG, DEFAULT_TABLE,
};
use orcanizer::engine::geometry::DEFAULT_OBABEL;
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub working_dir: PathBuf,
    pub executable: String,
    pub success_log: PathBuf,
    pub failure_log: PathBuf,
    pub table: PathBuf,
    pub checkpoint: bool,
    pub backend: BackendKind,
    pub obabel: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            executable: DEFAULT_EXECUTABLE.to_string(),
            success_log: PathBuf::from(DEFAULT_SUCCESS_LOG),
            failure_log: PathBuf::from(DEFAULT_FAILURE_LOG),
            table: PathBuf::from(DEFAULT_TABLE),
            checkpoint: false,
            backend: BackendKind::Obabel,
            obabel: DEFAULT_OBABEL.to_string(),
        }
    }
}
