use super::error::JobError;
use super::workspace::JobFiles;
use std::fs::File;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Runs the external program for one job.
pub trait ProgramRunner {
    /// Blocks until the program has exited. Success only means the program ran; whether
    /// it produced anything useful is for extraction to decide.
    fn invoke(&self, files: &JobFiles) -> Result<(), JobError>;
}

impl<T: ProgramRunner + ?Sized> ProgramRunner for &T {
    fn invoke(&self, files: &JobFiles) -> Result<(), JobError> {
        (**self).invoke(files)
    }
}

impl<T: ProgramRunner + ?Sized> ProgramRunner for Box<T> {
    fn invoke(&self, files: &JobFiles) -> Result<(), JobError> {
        (**self).invoke(files)
    }
}

/// Runs `<executable> <slot>.inp` inside the working directory with standard output
/// redirected to `<slot>.out`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrcaRunner {
    executable: String,
}

impl OrcaRunner {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }
}

impl ProgramRunner for OrcaRunner {
    fn invoke(&self, files: &JobFiles) -> Result<(), JobError> {
        let output_path = files.output();
        let output = File::create(&output_path).map_err(|source| JobError::Io {
            path: output_path.clone(),
            source,
        })?;

        debug!(
            "Running '{} {}' in {:?}",
            self.executable,
            files.input_name(),
            files.working_dir()
        );
        let status = Command::new(&self.executable)
            .arg(files.input_name())
            .current_dir(files.working_dir())
            .stdin(Stdio::null())
            .stdout(output)
            .status()
            .map_err(|source| JobError::Invocation {
                executable: self.executable.clone(),
                source,
            })?;

        // Reported only; extraction decides whether the job produced anything.
        if status.success() {
            debug!("Slot {} finished with {}", files.slot_id(), status);
        } else {
            warn!("Slot {} finished with {}", files.slot_id(), status);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::FailureKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_executable_is_an_invocation_failure() {
        let dir = tempdir().unwrap();
        let files = JobFiles::new(dir.path(), 0);
        fs::write(files.input(), "! HF\n").unwrap();

        let err = OrcaRunner::new("orcanizer-test-no-such-program")
            .invoke(&files)
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Invocation);
    }

    #[test]
    fn unwritable_output_is_an_io_failure() {
        let dir = tempdir().unwrap();
        let files = JobFiles::new(dir.path().join("missing"), 0);

        let err = OrcaRunner::new("orca").invoke(&files).unwrap_err();

        assert_eq!(err.kind(), FailureKind::Io);
    }

    #[cfg(unix)]
    #[test]
    fn stdout_is_redirected_to_output_file() {
        let dir = tempdir().unwrap();
        let files = JobFiles::new(dir.path(), 2);
        fs::write(files.input(), "Magnitude (Debye) : 1.0\n").unwrap();

        OrcaRunner::new("cat").invoke(&files).unwrap();

        let output = fs::read_to_string(files.output()).unwrap();
        assert_eq!(output, "Magnitude (Debye) : 1.0\n");
    }

    #[cfg(unix)]
    #[test]
    fn previous_output_is_truncated() {
        let dir = tempdir().unwrap();
        let files = JobFiles::new(dir.path(), 0);
        fs::write(files.output(), "a much longer stale output document\n").unwrap();
        fs::write(files.input(), "short\n").unwrap();

        OrcaRunner::new("cat").invoke(&files).unwrap();

        assert_eq!(fs::read_to_string(files.output()).unwrap(), "short\n");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_not_an_error() {
        let dir = tempdir().unwrap();
        let files = JobFiles::new(dir.path(), 0);
        fs::write(files.input(), "echo partial output\nexit 3\n").unwrap();

        OrcaRunner::new("sh").invoke(&files).unwrap();

        assert_eq!(
            fs::read_to_string(files.output()).unwrap(),
            "partial output\n"
        );
    }
}
