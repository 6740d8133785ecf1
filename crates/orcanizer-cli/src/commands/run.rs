use super::ensure_working_dir;
use crate::cli::RunArgs;
use crate::config::{AppConfig, CommandOverrides, build_config};
use crate::error::Result;
use crate::utils::parser;
use crate::utils::progress::CliProgressHandler;
use orcanizer::engine::progress::ProgressReporter;
use orcanizer::workflows::batch::{BatchCollector, BatchReport};
use tracing::{info, warn};

pub fn run(args: RunArgs) -> Result<()> {
    let identifiers = match &args.input {
        Some(path) => {
            info!("Reading identifiers from {:?}", path);
            parser::read_identifier_file(path)?
        }
        None => args.identifiers.clone(),
    };
    if identifiers.is_empty() {
        warn!("No identifiers to process.");
    }

    let overrides = CommandOverrides {
        executable: args.executable.as_deref(),
        xyz_dir: args.xyz_dir.as_deref(),
        output: args.output.as_deref(),
        checkpoint: args.checkpoint,
    };
    let config = build_config(&args.config, &overrides)?;
    ensure_working_dir(&config.batch.working_dir)?;

    let collector =
        BatchCollector::new(&config.batch, config.geometry.source(), config.runner());
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Running {} job(s) with '{}' in {}",
        identifiers.len(),
        config.batch.executable,
        config.batch.working_dir.display()
    );

    match collector.run_batch(identifiers, !args.no_save, &reporter) {
        Ok(report) => {
            print_summary(&report, &config);
            Ok(())
        }
        Err(e) => {
            print_summary(&e.report, &config);
            Err(e.into())
        }
    }
}

fn print_summary(report: &BatchReport, config: &AppConfig) {
    println!(
        "Batch complete: {} succeeded, {} failed.",
        report.summary.succeeded, report.summary.failed
    );
    if report.summary.failed > 0 {
        println!(
            "  Failed identifiers are listed in: {}",
            config.batch.failure_log.display()
        );
    }
    if let Some(path) = &report.saved_to {
        println!(
            "✓ Result table ({} row(s)) written to: {}",
            report.table.len(),
            path.display()
        );
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn run_logs_jobs_whose_output_lacks_properties() {
        let dir = tempdir().unwrap();
        let work = dir.path().join("work");
        let geometries = dir.path().join("xyz");
        fs::create_dir(&geometries).unwrap();
        fs::write(
            geometries.join("O.xyz"),
            "3\n\nO 0 0 0.117\nH 0 0.757 -0.469\nH 0 -0.757 -0.469\n",
        )
        .unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "").unwrap();

        // `cat <slot>.inp` echoes the input back, which has none of the properties.
        let cli = Cli::parse_from([
            "orcanizer",
            "run",
            "O",
            "C(",
            "-c",
            config_path.to_str().unwrap(),
            "-w",
            work.to_str().unwrap(),
            "-e",
            "cat",
            "--xyz-dir",
            geometries.to_str().unwrap(),
        ]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };

        run(args).unwrap();

        let failed = fs::read_to_string(work.join("undone.log")).unwrap();
        assert_eq!(failed, "0 O\n1 C(\n");
        assert!(!work.join("done.log").exists());
        let table = fs::read_to_string(work.join("orkanized.csv")).unwrap();
        assert_eq!(table.lines().count(), 1);
        assert!(work.join("0.out").exists());
    }
}
