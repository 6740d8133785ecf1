use super::error::FailureKind;

#[derive(Debug, Clone)]
pub enum Progress {
    BatchStart { total_jobs: u64 },
    JobStart { slot_id: usize, identifier: String },
    JobFinish { slot_id: usize, outcome: JobOutcome },
    BatchFinish { succeeded: usize, failed: usize },

    Message(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    Succeeded,
    Failed(FailureKind),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::Message("nobody listens".to_string()));
    }

    #[test]
    fn reporter_forwards_events_to_callback() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            seen.lock().unwrap().push(event);
        }));

        reporter.report(Progress::BatchStart { total_jobs: 2 });
        reporter.report(Progress::JobFinish {
            slot_id: 0,
            outcome: JobOutcome::Failed(FailureKind::Geometry),
        });
        drop(reporter);

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(matches!(seen[0], Progress::BatchStart { total_jobs: 2 }));
        assert!(matches!(
            seen[1],
            Progress::JobFinish {
                outcome: JobOutcome::Failed(FailureKind::Geometry),
                ..
            }
        ));
    }
}
