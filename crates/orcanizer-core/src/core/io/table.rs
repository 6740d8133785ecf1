use crate::core::models::record::{Property, PropertyRecord, ResultTable};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("CSV error for '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("File I/O error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes `table` as CSV to `path`, replacing any previous file. The header row is written
/// even when the table is empty.
pub fn write_csv(table: &ResultTable, path: &Path) -> Result<(), TableError> {
    let csv_err = |source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;

    writer.write_record(header()).map_err(csv_err)?;
    for record in table.iter() {
        writer.serialize(record).map_err(csv_err)?;
    }
    writer.flush().map_err(|e| TableError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Reads a table previously written by [`write_csv`].
pub fn read_csv(path: &Path) -> Result<ResultTable, TableError> {
    let csv_err = |source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    reader
        .deserialize::<PropertyRecord>()
        .map(|row| row.map_err(csv_err))
        .collect()
}

/// Column names in file order: the identifier, then the eleven properties.
pub fn header() -> Vec<&'static str> {
    std::iter::once("identifier")
        .chain(Property::ALL.iter().map(|p| p.column()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn record(identifier: &str, homo: f64) -> PropertyRecord {
        PropertyRecord::from_values(
            identifier,
            [
                homo, 0.045, 1.69, 32.41, -154.927, -154.926, 0.032, -154.958, 1.15234, 0.31123,
                0.27012,
            ],
        )
    }

    #[test]
    fn header_lists_identifier_then_properties() {
        let header = header();
        assert_eq!(header.len(), Property::COUNT + 1);
        assert_eq!(header[0], "identifier");
        assert_eq!(header[1], "homo_eh");
        assert_eq!(header[11], "rot_c_cm1");
    }

    #[test]
    fn write_csv_produces_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let table: ResultTable = vec![record("CCO", -0.31)].into_iter().collect();

        write_csv(&table, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), header().join(","));
        let row = lines.next().unwrap();
        assert!(row.starts_with("CCO,-0.31,0.045,1.69,"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn write_csv_on_empty_table_writes_only_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.csv");

        write_csv(&ResultTable::new(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn write_csv_overwrites_previous_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let two: ResultTable = vec![record("A", -0.3), record("B", -0.2)].into_iter().collect();
        let one: ResultTable = vec![record("C", -0.1)].into_iter().collect();

        write_csv(&two, &path).unwrap();
        write_csv(&one, &path).unwrap();

        assert_eq!(read_csv(&path).unwrap(), one);
    }

    #[test]
    fn read_csv_restores_written_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let table: ResultTable = vec![record("CCO", -0.31), record("c1ccccc1", -0.24)]
            .into_iter()
            .collect();

        write_csv(&table, &path).unwrap();

        assert_eq!(read_csv(&path).unwrap(), table);
    }

    #[test]
    fn read_csv_fails_for_malformed_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, format!("{}\nCCO,not-a-number\n", header().join(","))).unwrap();
        assert!(matches!(read_csv(&path), Err(TableError::Csv { .. })));
    }

    #[test]
    fn write_csv_fails_when_directory_is_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("results.csv");
        assert!(matches!(
            write_csv(&ResultTable::new(), &path),
            Err(TableError::Csv { .. })
        ));
    }
}
