use super::job::JobRunner;
use crate::core::io::table::{self, TableError};
use crate::core::models::job::Job;
use crate::core::models::record::ResultTable;
use crate::engine::config::BatchConfig;
use crate::engine::geometry::GeometrySource;
use crate::engine::invoke::ProgramRunner;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// Records of the successful jobs, in input order.
    pub table: ResultTable,
    pub summary: BatchSummary,
    /// Where the table was written, if it was persisted.
    pub saved_to: Option<PathBuf>,
}

/// The batch ran to completion but its table could not be written. The full report is kept
/// so that nothing computed is lost.
#[derive(Debug, Error)]
#[error("Failed to save the result table: {source}")]
pub struct PersistError {
    pub report: BatchReport,
    #[source]
    pub source: TableError,
}

/// Runs a whole batch: one job per identifier, strictly in order, collecting every record
/// that comes back.
pub struct BatchCollector<G, R> {
    jobs: JobRunner<G, R>,
    table_path: PathBuf,
    checkpoint: bool,
}

impl<G: GeometrySource, R: ProgramRunner> BatchCollector<G, R> {
    pub fn new(config: &BatchConfig, source: G, runner: R) -> Self {
        Self {
            jobs: JobRunner::new(config, source, runner),
            table_path: config.table_path.clone(),
            checkpoint: config.checkpoint,
        }
    }

    pub fn jobs(&self) -> &JobRunner<G, R> {
        &self.jobs
    }

    pub fn table_path(&self) -> &Path {
        &self.table_path
    }

    /// Processes `identifiers` with slot ids equal to their positions. When `persist` is set
    /// the table is written to the configured destination (header only if nothing
    /// succeeded); otherwise no file is touched besides the per-job files and logs.
    #[instrument(skip_all, name = "batch_workflow")]
    pub fn run_batch<I, S>(
        &self,
        identifiers: I,
        persist: bool,
        reporter: &ProgressReporter,
    ) -> Result<BatchReport, PersistError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let jobs: Vec<Job> = Job::enumerate(identifiers).collect();
        reporter.report(Progress::BatchStart {
            total_jobs: jobs.len() as u64,
        });
        info!(
            "Starting batch of {} jobs in {:?}.",
            jobs.len(),
            self.jobs.working_dir()
        );

        let mut table = ResultTable::new();
        let mut summary = BatchSummary::default();

        for job in &jobs {
            match self.jobs.run_job(&job.identifier, job.slot_id, reporter) {
                Some(record) => {
                    table.push(record);
                    summary.succeeded += 1;
                    if persist && self.checkpoint {
                        if let Err(e) = table::write_csv(&table, &self.table_path) {
                            warn!("Checkpoint write failed: {}", e);
                            reporter.report(Progress::Message(format!(
                                "checkpoint write failed: {}",
                                e
                            )));
                        }
                    }
                }
                None => summary.failed += 1,
            }
        }

        reporter.report(Progress::BatchFinish {
            succeeded: summary.succeeded,
            failed: summary.failed,
        });
        info!(
            "Batch finished: {} succeeded, {} failed.",
            summary.succeeded, summary.failed
        );

        let mut report = BatchReport {
            table,
            summary,
            saved_to: None,
        };
        if persist {
            if let Err(source) = table::write_csv(&report.table, &self.table_path) {
                return Err(PersistError { report, source });
            }
            info!("Result table written to {:?}.", self.table_path);
            report.saved_to = Some(self.table_path.clone());
        }
        Ok(report)
    }
}
