use crate::core::io::audit::{AuditLog, LogEntry};
use crate::core::io::orca_output;
use crate::core::models::record::PropertyRecord;
use crate::engine::config::BatchConfig;
use crate::engine::error::JobError;
use crate::engine::geometry::GeometrySource;
use crate::engine::invoke::ProgramRunner;
use crate::engine::prepare::InputPreparer;
use crate::engine::progress::{JobOutcome, Progress, ProgressReporter};
use crate::engine::workspace::JobFiles;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

/// Drives single jobs through prepare, invoke and extract, and records each outcome in the
/// success or failure log.
///
/// This is the only place job errors are caught. Every processed job ends up in exactly one
/// of the two logs, and nothing it does can abort the surrounding batch.
pub struct JobRunner<G, R> {
    preparer: InputPreparer<G>,
    runner: R,
    working_dir: PathBuf,
    success_log: AuditLog,
    failure_log: AuditLog,
}

impl<G: GeometrySource, R: ProgramRunner> JobRunner<G, R> {
    pub fn new(config: &BatchConfig, source: G, runner: R) -> Self {
        Self {
            preparer: InputPreparer::new(source, config.recipe.clone()),
            runner,
            working_dir: config.working_dir.clone(),
            success_log: AuditLog::new(&config.success_log),
            failure_log: AuditLog::new(&config.failure_log),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn success_log(&self) -> &AuditLog {
        &self.success_log
    }

    pub fn failure_log(&self) -> &AuditLog {
        &self.failure_log
    }

    pub fn files(&self, slot_id: usize) -> JobFiles {
        JobFiles::new(&self.working_dir, slot_id)
    }

    /// Writes `<slot>.inp` for `identifier`.
    pub fn prepare(&self, identifier: &str, slot_id: usize) -> Result<(), JobError> {
        self.preparer.prepare(identifier, &self.files(slot_id))
    }

    /// Runs the external program on `<slot>.inp`, blocking until it exits.
    pub fn invoke(&self, slot_id: usize) -> Result<(), JobError> {
        self.runner.invoke(&self.files(slot_id))
    }

    /// Reads the eleven properties from `<slot>.out` and labels them with `identifier`.
    pub fn extract(&self, identifier: &str, slot_id: usize) -> Result<PropertyRecord, JobError> {
        let values = orca_output::extract_from_path(&self.files(slot_id).output())?;
        Ok(values.into_record(identifier))
    }

    /// Processes one job end to end. Returns `None` when any stage failed; the reason is
    /// logged, not returned.
    #[instrument(skip(self, reporter), name = "job")]
    pub fn run_job(
        &self,
        identifier: &str,
        slot_id: usize,
        reporter: &ProgressReporter,
    ) -> Option<PropertyRecord> {
        reporter.report(Progress::JobStart {
            slot_id,
            identifier: identifier.to_string(),
        });
        info!("Starting job.");

        let entry = LogEntry::new(slot_id, identifier);
        let outcome = self
            .prepare(identifier, slot_id)
            .and_then(|()| self.invoke(slot_id))
            .and_then(|()| self.extract(identifier, slot_id));

        match outcome {
            Ok(record) => {
                info!("Job succeeded.");
                append_entry(&self.success_log, &entry, reporter);
                reporter.report(Progress::JobFinish {
                    slot_id,
                    outcome: JobOutcome::Succeeded,
                });
                Some(record)
            }
            Err(err) => {
                let kind = err.kind();
                warn!(%kind, "Job failed: {}", err);
                append_entry(&self.failure_log, &entry, reporter);
                reporter.report(Progress::JobFinish {
                    slot_id,
                    outcome: JobOutcome::Failed(kind),
                });
                None
            }
        }
    }
}

fn append_entry(log: &AuditLog, entry: &LogEntry, reporter: &ProgressReporter) {
    if let Err(e) = log.append(entry) {
        error!("Could not record '{}' in {:?}: {}", entry, log.path(), e);
        reporter.report(Progress::Message(format!(
            "could not record '{}' in {}",
            entry,
            log.path().display()
        )));
    }
}
