use crate::core::chem::smiles::SmilesError;
use crate::core::io::orca_output::ExtractError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("Invalid identifier '{identifier}': {source}")]
    Identifier {
        identifier: String,
        #[source]
        source: SmilesError,
    },

    #[error("Could not build a 3-D geometry for '{identifier}': {reason}")]
    Embedding { identifier: String, reason: String },

    #[error("Failed to run geometry tool '{program}': {source}")]
    Tool {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Everything that can go wrong while processing a single job.
///
/// None of these escape the batch: the job runner records them in the failure log and moves
/// on to the next identifier.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Input preparation failed: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Failed to start '{executable}': {source}")]
    Invocation {
        executable: String,
        #[source]
        source: io::Error,
    },

    #[error("Output extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("File I/O error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Geometry,
    Invocation,
    MissingOutput,
    MissingProperty,
    UnparsableValue,
    Io,
}

impl JobError {
    pub fn kind(&self) -> FailureKind {
        match self {
            JobError::Geometry(_) => FailureKind::Geometry,
            JobError::Invocation { .. } => FailureKind::Invocation,
            JobError::Extraction(e) => match e {
                ExtractError::MissingOutput { .. } => FailureKind::MissingOutput,
                ExtractError::MissingProperty { .. } => FailureKind::MissingProperty,
                ExtractError::UnparsableValue { .. } => FailureKind::UnparsableValue,
                ExtractError::Io { .. } => FailureKind::Io,
            },
            JobError::Io { .. } => FailureKind::Io,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Geometry => "geometry",
            FailureKind::Invocation => "invocation",
            FailureKind::MissingOutput => "missing-output",
            FailureKind::MissingProperty => "missing-property",
            FailureKind::UnparsableValue => "unparsable-value",
            FailureKind::Io => "io",
        };
        f.write_str(name)
    }
}
