pub mod extract;
pub mod prepare;
pub mod run;
pub mod status;

use crate::error::Result;
use std::path::Path;
use tracing::debug;

/// Creates the working directory if it does not exist yet.
fn ensure_working_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        debug!("Creating working directory {:?}", dir);
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
