use crate::cli::StatusArgs;
use crate::config::{CommandOverrides, build_config};
use crate::error::{CliError, Result};
use orcanizer::core::io::audit::{AuditLog, LogEntry};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, PartialEq, Eq)]
struct LogSummary {
    succeeded: Vec<LogEntry>,
    failed: Vec<LogEntry>,
}

impl LogSummary {
    fn read(success_log: &Path, failure_log: &Path) -> Result<Self> {
        Ok(Self {
            succeeded: read_entries(success_log)?,
            failed: read_entries(failure_log)?,
        })
    }

    fn distinct(entries: &[LogEntry]) -> usize {
        entries
            .iter()
            .map(|e| e.identifier.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

fn read_entries(path: &Path) -> Result<Vec<LogEntry>> {
    AuditLog::new(path)
        .entries()
        .map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
}

pub fn run(args: StatusArgs) -> Result<()> {
    let config = build_config(&args.config, &CommandOverrides::default())?;
    let summary = LogSummary::read(&config.batch.success_log, &config.batch.failure_log)?;

    println!("Working directory: {}", config.batch.working_dir.display());
    println!(
        "  Succeeded: {:>6} ({} distinct identifiers)",
        summary.succeeded.len(),
        LogSummary::distinct(&summary.succeeded)
    );
    println!(
        "  Failed:    {:>6} ({} distinct identifiers)",
        summary.failed.len(),
        LogSummary::distinct(&summary.failed)
    );
    for entry in &summary.failed {
        println!("    {}", entry);
    }
    if config.batch.table_path.is_file() {
        println!("  Result table: {}", config.batch.table_path.display());
    }
    Ok(())
}
