use std::path::{Path, PathBuf};

pub const INPUT_EXTENSION: &str = "inp";
pub const OUTPUT_EXTENSION: &str = "out";

/// The pair of files a job owns in the working directory, named after its slot id.
///
/// Reusing a slot id reuses (and overwrites) the same files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFiles {
    working_dir: PathBuf,
    slot_id: usize,
}

impl JobFiles {
    pub fn new(working_dir: impl Into<PathBuf>, slot_id: usize) -> Self {
        Self {
            working_dir: working_dir.into(),
            slot_id,
        }
    }

    pub fn slot_id(&self) -> usize {
        self.slot_id
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// The input file name relative to the working directory, as passed to the program.
    pub fn input_name(&self) -> String {
        format!("{}.{INPUT_EXTENSION}", self.slot_id)
    }

    pub fn output_name(&self) -> String {
        format!("{}.{OUTPUT_EXTENSION}", self.slot_id)
    }

    pub fn input(&self) -> PathBuf {
        self.working_dir.join(self.input_name())
    }

    pub fn output(&self) -> PathBuf {
        self.working_dir.join(self.output_name())
    }
}
