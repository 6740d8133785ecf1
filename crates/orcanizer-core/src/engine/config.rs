use std::path::PathBuf;
use thiserror::Error;

pub use crate::core::io::orca_input::{Recipe, RecipeLoadError};

pub const DEFAULT_EXECUTABLE: &str = "orca";
pub const DEFAULT_SUCCESS_LOG: &str = "done.log";
pub const DEFAULT_FAILURE_LOG: &str = "undone.log";
pub const DEFAULT_TABLE: &str = "orkanized.csv";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Everything a batch needs besides its identifiers. Fixed for the lifetime of the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Directory holding `<slot>.inp` / `<slot>.out`; the external program runs here.
    pub working_dir: PathBuf,
    /// Name or path of the external program.
    pub executable: String,
    pub success_log: PathBuf,
    pub failure_log: PathBuf,
    /// Destination of the CSV table when the batch is persisted.
    pub table_path: PathBuf,
    pub recipe: Recipe,
    /// Rewrite the table after every successful job, not only at the end.
    pub checkpoint: bool,
}

#[derive(Default)]
pub struct BatchConfigBuilder {
    working_dir: Option<PathBuf>,
    executable: Option<String>,
    success_log: Option<PathBuf>,
    failure_log: Option<PathBuf>,
    table_path: Option<PathBuf>,
    recipe: Option<Recipe>,
    checkpoint: bool,
}

impl BatchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
    pub fn executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = Some(executable.into());
        self
    }
    pub fn success_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.success_log = Some(path.into());
        self
    }
    pub fn failure_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.failure_log = Some(path.into());
        self
    }
    pub fn table_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.table_path = Some(path.into());
        self
    }
    pub fn recipe(mut self, recipe: Recipe) -> Self {
        self.recipe = Some(recipe);
        self
    }
    pub fn checkpoint(mut self, enabled: bool) -> Self {
        self.checkpoint = enabled;
        self
    }

    /// Builds the configuration. Only the working directory is required; log and table
    /// paths default to the conventional file names inside it.
    pub fn build(self) -> Result<BatchConfig, ConfigError> {
        let working_dir = self
            .working_dir
            .ok_or(ConfigError::MissingParameter("working_dir"))?;

        let executable = self
            .executable
            .unwrap_or_else(|| DEFAULT_EXECUTABLE.to_string());
        if executable.trim().is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "executable",
                reason: "must not be empty".to_string(),
            });
        }

        Ok(BatchConfig {
            success_log: self
                .success_log
                .unwrap_or_else(|| working_dir.join(DEFAULT_SUCCESS_LOG)),
            failure_log: self
                .failure_log
                .unwrap_or_else(|| working_dir.join(DEFAULT_FAILURE_LOG)),
            table_path: self
                .table_path
                .unwrap_or_else(|| working_dir.join(DEFAULT_TABLE)),
            recipe: self.recipe.unwrap_or_default(),
            checkpoint: self.checkpoint,
            executable,
            working_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_fails_without_working_dir() {
        let result = BatchConfigBuilder::new().executable("orca").build();
        assert_eq!(result, Err(ConfigError::MissingParameter("working_dir")));
    }

    #[test]
    fn build_fills_conventional_defaults() {
        let config = BatchConfigBuilder::new()
            .working_dir("/scratch")
            .build()
            .unwrap();
        assert_eq!(config.executable, "orca");
        assert_eq!(config.success_log, PathBuf::from("/scratch/done.log"));
        assert_eq!(config.failure_log, PathBuf::from("/scratch/undone.log"));
        assert_eq!(config.table_path, PathBuf::from("/scratch/orkanized.csv"));
        assert_eq!(config.recipe, Recipe::default());
        assert!(!config.checkpoint);
    }

    #[test]
    fn build_keeps_explicit_values() {
        let recipe = Recipe {
            nprocs: Some(4),
            ..Recipe::default()
        };
        let config = BatchConfigBuilder::new()
            .working_dir("w")
            .executable("/opt/orca/orca")
            .success_log("ok.log")
            .failure_log("bad.log")
            .table_path("out/results.csv")
            .recipe(recipe.clone())
            .checkpoint(true)
            .build()
            .unwrap();
        assert_eq!(config.executable, "/opt/orca/orca");
        assert_eq!(config.success_log, PathBuf::from("ok.log"));
        assert_eq!(config.failure_log, PathBuf::from("bad.log"));
        assert_eq!(config.table_path, PathBuf::from("out/results.csv"));
        assert_eq!(config.recipe, recipe);
        assert!(config.checkpoint);
    }

    #[test]
    fn build_rejects_blank_executable() {
        let result = BatchConfigBuilder::new()
            .working_dir("w")
            .executable("  ")
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "executable",
                ..
            })
        ));
    }
}
