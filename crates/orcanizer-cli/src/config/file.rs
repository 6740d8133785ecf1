use crate::error::{CliError, Result};
use directories::ProjectDirs;
use orcanizer::engine::config::Recipe;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    #[default]
    Obabel,
    XyzDir,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "obabel" => Ok(Self::Obabel),
            "xyz-dir" => Ok(Self::XyzDir),
            other => Err(format!(
                "unknown geometry backend '{}' (expected 'obabel' or 'xyz-dir')",
                other
            )),
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileGeometryConfig {
    pub backend: Option<BackendKind>,
    pub obabel: Option<String>,
    pub xyz_dir: Option<PathBuf>,
    pub multiplicity: Option<u32>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub working_dir: Option<PathBuf>,
    pub executable: Option<String>,
    pub success_log: Option<PathBuf>,
    pub failure_log: Option<PathBuf>,
    pub table: Option<PathBuf>,
    pub checkpoint: Option<bool>,
    pub geometry: Option<FileGeometryConfig>,
    pub recipe: Option<Recipe>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// `config.toml` in the platform configuration directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "orcanizer").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Loads `explicit` if given, otherwise the file at [`FileConfig::default_path`] if one
    /// exists, otherwise an empty configuration.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                debug!("No configuration file found; using defaults.");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_file_is_parsed() {
        let config = FileConfig::from_toml(
            r#"
            working-dir = "runs"
            executable = "/opt/orca/orca"
            success-log = "ok.log"
            failure-log = "failed.log"
            table = "properties.csv"
            checkpoint = true

            [geometry]
            backend = "xyz-dir"
            xyz-dir = "geometries"
            multiplicity = 1

            [recipe]
            keywords = "PBE0 def2-TZVP Opt FREQ"
            nprocs = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.working_dir, Some(PathBuf::from("runs")));
        assert_eq!(config.executable.as_deref(), Some("/opt/orca/orca"));
        assert_eq!(config.checkpoint, Some(true));
        let geometry = config.geometry.unwrap();
        assert_eq!(geometry.backend, Some(BackendKind::XyzDir));
        assert_eq!(geometry.xyz_dir, Some(PathBuf::from("geometries")));
        let recipe = config.recipe.unwrap();
        assert_eq!(recipe.nprocs, Some(8));
        assert_eq!(recipe.scf_max_iter, Recipe::default().scf_max_iter);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(FileConfig::from_toml("").unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml("threads = 4\n").is_err());
        assert!(FileConfig::from_toml("[geometry]\nengine = \"rdkit\"\n").is_err());
    }

    #[test]
    fn backend_kind_parses_from_str() {
        assert_eq!("obabel".parse::<BackendKind>(), Ok(BackendKind::Obabel));
        assert_eq!("xyz-dir".parse::<BackendKind>(), Ok(BackendKind::XyzDir));
        assert!("rdkit".parse::<BackendKind>().is_err());
    }

    #[test]
    fn from_file_reports_syntax_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "executable = \n").unwrap();

        match FileConfig::from_file(&path) {
            Err(CliError::FileParsing { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected FileParsing, got {other:?}"),
        }
    }

    #[test]
    fn explicit_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
