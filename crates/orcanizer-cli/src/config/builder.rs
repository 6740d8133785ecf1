use super::defaults::DefaultsConfig;
use super::file::{BackendKind, FileConfig, FileGeometryConfig};
use super::models::{AppConfig, GeometryBackend, GeometryConfig};
use crate::cli::ConfigArgs;
use crate::error::{CliError, Result};
use orcanizer::engine::config::{BatchConfigBuilder, Recipe};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Flags that only some commands expose. They win over every other layer.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandOverrides<'a> {
    pub executable: Option<&'a str>,
    pub xyz_dir: Option<&'a Path>,
    pub output: Option<&'a Path>,
    pub checkpoint: bool,
}

/// Relative log and table paths from the file or `-S` are taken relative to the working
/// directory; `--output` is taken as given.
pub fn build_config(args: &ConfigArgs, overrides: &CommandOverrides) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = FileConfig::load(args.config.as_deref())?;
    if let Some(path) = &args.recipe {
        let recipe = Recipe::load(path).map_err(|e| CliError::FileParsing {
            path: path.clone(),
            source: e.into(),
        })?;
        file_config.recipe = Some(recipe);
    }
    let file_config = apply_set_values(file_config, &args.set_values)?;
    let geometry = merge_geometry(overrides.xyz_dir, file_config.geometry, &defaults)?;

    let working_dir = args
        .workdir
        .clone()
        .or(file_config.working_dir)
        .unwrap_or(defaults.working_dir);
    let in_workdir = |path: PathBuf| {
        if path.is_absolute() {
            path
        } else {
            working_dir.join(path)
        }
    };

    let success_log = in_workdir(file_config.success_log.unwrap_or(defaults.success_log));
    let failure_log = in_workdir(file_config.failure_log.unwrap_or(defaults.failure_log));
    let table_path = match overrides.output {
        Some(path) => path.to_path_buf(),
        None => in_workdir(file_config.table.unwrap_or(defaults.table)),
    };

    let executable = resolve_executable(
        overrides
            .executable
            .map(str::to_string)
            .or(file_config.executable)
            .unwrap_or(defaults.executable),
    )?;
    let checkpoint =
        overrides.checkpoint || file_config.checkpoint.unwrap_or(defaults.checkpoint);

    let batch = BatchConfigBuilder::new()
        .working_dir(working_dir)
        .executable(executable)
        .success_log(success_log)
        .failure_log(failure_log)
        .table_path(table_path)
        .recipe(file_config.recipe.unwrap_or_default())
        .checkpoint(checkpoint)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig { batch, geometry })
}

/// A relative path with a directory part (`./bin/orca`) is made absolute, since the program
/// is started from inside the working directory. Bare names are left for `PATH` lookup.
fn resolve_executable(executable: String) -> Result<String> {
    let path = Path::new(&executable);
    if path.is_absolute() || path.components().count() < 2 {
        return Ok(executable);
    }
    let absolute = std::path::absolute(path)?;
    Ok(absolute.to_string_lossy().into_owned())
}

fn merge_geometry(
    cli_xyz_dir: Option<&Path>,
    file_val: Option<FileGeometryConfig>,
    defaults: &DefaultsConfig,
) -> Result<GeometryConfig> {
    let file_val = file_val.unwrap_or_default();

    let backend = if let Some(dir) = cli_xyz_dir {
        GeometryBackend::XyzDir {
            dir: dir.to_path_buf(),
        }
    } else {
        match file_val.backend.unwrap_or(defaults.backend) {
            BackendKind::Obabel => GeometryBackend::Obabel {
                executable: file_val.obabel.unwrap_or_else(|| defaults.obabel.clone()),
            },
            BackendKind::XyzDir => GeometryBackend::XyzDir {
                dir: file_val.xyz_dir.ok_or_else(|| {
                    CliError::Config(
                        "`geometry.xyz-dir` is required when `geometry.backend` is 'xyz-dir'"
                            .to_string(),
                    )
                })?,
            },
        }
    };

    if file_val.multiplicity == Some(0) {
        return Err(CliError::Config(
            "`geometry.multiplicity` must be at least 1".to_string(),
        ));
    }

    Ok(GeometryConfig {
        backend,
        multiplicity: file_val.multiplicity,
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();
        let value_str = value_str.trim();

        match key {
            "working-dir" => config.working_dir = Some(PathBuf::from(value_str)),
            "executable" => config.executable = Some(value_str.to_string()),
            "success-log" => config.success_log = Some(PathBuf::from(value_str)),
            "failure-log" => config.failure_log = Some(PathBuf::from(value_str)),
            "table" => config.table = Some(PathBuf::from(value_str)),
            "checkpoint" => config.checkpoint = Some(parse_value(key, value_str, "boolean")?),
            "geometry.backend" => {
                config.geometry.get_or_insert_with(Default::default).backend =
                    Some(value_str.parse().map_err(CliError::Config)?);
            }
            "geometry.obabel" => {
                config.geometry.get_or_insert_with(Default::default).obabel =
                    Some(value_str.to_string());
            }
            "geometry.xyz-dir" => {
                config.geometry.get_or_insert_with(Default::default).xyz_dir =
                    Some(PathBuf::from(value_str));
            }
            "geometry.multiplicity" => {
                config.geometry.get_or_insert_with(Default::default).multiplicity =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "recipe.keywords" => {
                config.recipe.get_or_insert_with(Default::default).keywords =
                    value_str.to_string();
            }
            "recipe.nprocs" => {
                config.recipe.get_or_insert_with(Default::default).nprocs =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "recipe.scf-max-iter" => {
                config.recipe.get_or_insert_with(Default::default).scf_max_iter =
                    parse_value(key, value_str, "integer")?;
            }
            "recipe.geom-max-iter" => {
                config.recipe.get_or_insert_with(Default::default).geom_max_iter =
                    parse_value(key, value_str, "integer")?;
            }
            "recipe.dipole" => {
                config.recipe.get_or_insert_with(Default::default).dipole =
                    parse_value(key, value_str, "boolean")?;
            }
            "recipe.polarizability" => {
                config.recipe.get_or_insert_with(Default::default).polarizability =
                    parse_value(key, value_str, "boolean")?;
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
