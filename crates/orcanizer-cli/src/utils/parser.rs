use crate::error::{CliError, Result};
use std::path::Path;

/// Extracts identifiers from an identifier list: the first whitespace-separated column of
/// every line. Blank lines and lines starting with `#` are skipped. A `#` anywhere else is
/// kept, since it is the SMILES triple bond.
pub fn parse_identifier_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

pub fn read_identifier_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    Ok(parse_identifier_list(&content))
}
