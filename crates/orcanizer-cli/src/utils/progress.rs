use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use orcanizer::engine::progress::{JobOutcome, Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::bar_style())
            .with_message("Initializing...");
        pb.set_draw_target(target);
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::BatchStart { total_jobs } => {
                    pb_guard.reset();
                    pb_guard.set_length(total_jobs);
                    pb_guard.set_position(0);
                    pb_guard.set_style(Self::bar_style());
                    pb_guard.set_message("Starting");
                }
                Progress::JobStart {
                    slot_id,
                    identifier,
                } => {
                    pb_guard.set_message(format!("[{}] {}", slot_id, identifier));
                }
                Progress::JobFinish { slot_id, outcome } => {
                    if let JobOutcome::Failed(kind) = outcome {
                        pb_guard.println(format!("  ✗ slot {} failed ({})", slot_id, kind));
                    }
                    pb_guard.inc(1);
                }
                Progress::BatchFinish { succeeded, failed } => {
                    pb_guard.finish_with_message(format!(
                        "✓ Done: {} succeeded, {} failed",
                        succeeded, failed
                    ));
                }
                Progress::Message(msg) => {
                    if !pb_guard.is_finished() {
                        pb_guard.println(format!("  {}", msg));
                    } else {
                        pb_guard.set_message(msg);
                    }
                }
            }
        })
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<30} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.0}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orcanizer::engine::error::FailureKind;
    use std::thread;

    fn hidden_handler() -> CliProgressHandler {
        CliProgressHandler::with_draw_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = hidden_handler();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_tracks_batch_progress() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        callback(Progress::BatchStart { total_jobs: 3 });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.length(), Some(3));
            assert_eq!(pb.position(), 0);
            assert!(!pb.is_finished());
        }

        callback(Progress::JobStart {
            slot_id: 0,
            identifier: "CCO".to_string(),
        });
        assert_eq!(handler.pb.lock().unwrap().message(), "[0] CCO");

        callback(Progress::JobFinish {
            slot_id: 0,
            outcome: JobOutcome::Succeeded,
        });
        callback(Progress::JobFinish {
            slot_id: 1,
            outcome: JobOutcome::Failed(FailureKind::MissingOutput),
        });
        assert_eq!(handler.pb.lock().unwrap().position(), 2);

        callback(Progress::BatchFinish {
            succeeded: 1,
            failed: 1,
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.is_finished());
            assert_eq!(pb.position(), 2);
            assert_eq!(pb.length(), Some(3));
            assert_eq!(pb.message(), "✓ Done: 1 succeeded, 1 failed");
        }
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::BatchStart { total_jobs: 1 });
            callback(Progress::JobFinish {
                slot_id: 0,
                outcome: JobOutcome::Succeeded,
            });
            callback(Progress::BatchFinish {
                succeeded: 1,
                failed: 0,
            });
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.position(), 1);
    }
}
