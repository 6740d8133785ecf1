use super::error::GeometryError;
use crate::core::chem::elements::atomic_number;
use crate::core::chem::smiles::SmilesSummary;
use crate::core::io::xyz::{self, XyzError};
use crate::core::models::geometry::{Atom, Geometry};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

pub const DEFAULT_OBABEL: &str = "obabel";

/// Turns an identifier into a 3-D geometry ready to be written into an input file.
pub trait GeometrySource {
    fn build(&self, identifier: &str) -> Result<Geometry, GeometryError>;
}

impl<T: GeometrySource + ?Sized> GeometrySource for &T {
    fn build(&self, identifier: &str) -> Result<Geometry, GeometryError> {
        (**self).build(identifier)
    }
}

impl<T: GeometrySource + ?Sized> GeometrySource for Box<T> {
    fn build(&self, identifier: &str) -> Result<Geometry, GeometryError> {
        (**self).build(identifier)
    }
}

/// Embeds SMILES with the Open Babel command-line tool (`obabel -:<smiles> -oxyz --gen3d`).
#[derive(Debug, Clone)]
pub struct ObabelGeometry {
    executable: String,
    multiplicity: Option<u32>,
}

impl ObabelGeometry {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            multiplicity: None,
        }
    }

    /// Forces a spin multiplicity instead of deriving it from the electron count.
    pub fn with_multiplicity(mut self, multiplicity: Option<u32>) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }
}

impl Default for ObabelGeometry {
    fn default() -> Self {
        Self::new(DEFAULT_OBABEL)
    }
}

impl GeometrySource for ObabelGeometry {
    fn build(&self, identifier: &str) -> Result<Geometry, GeometryError> {
        let summary = summarize(identifier)?;

        debug!("Embedding '{}' with {}", identifier, self.executable);
        let output = Command::new(&self.executable)
            .arg(format!("-:{identifier}"))
            .args(["-oxyz", "--gen3d"])
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GeometryError::Tool {
                program: self.executable.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(GeometryError::Embedding {
                identifier: identifier.to_string(),
                reason: format!(
                    "{} exited with {}: {}",
                    self.executable,
                    output.status,
                    stderr.trim()
                ),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let atoms = parse_embedded(identifier, &stdout, &stderr)?;
        assemble(identifier, &summary, atoms, self.multiplicity)
    }
}

/// Reads pre-embedded geometries from `<dir>/<file stem>.xyz`, where the stem is the
/// identifier with every character outside `[A-Za-z0-9._-]` replaced by `_`.
#[derive(Debug, Clone)]
pub struct XyzDirectory {
    dir: PathBuf,
    multiplicity: Option<u32>,
}

impl XyzDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            multiplicity: None,
        }
    }

    pub fn with_multiplicity(mut self, multiplicity: Option<u32>) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, identifier: &str) -> PathBuf {
        self.dir.join(format!("{}.xyz", file_stem(identifier)))
    }
}

impl GeometrySource for XyzDirectory {
    fn build(&self, identifier: &str) -> Result<Geometry, GeometryError> {
        let summary = summarize(identifier)?;
        let path = self.path_for(identifier);
        debug!("Reading geometry for '{}' from {:?}", identifier, path);

        let atoms = xyz::read_from_path(&path).map_err(|e| GeometryError::Embedding {
            identifier: identifier.to_string(),
            reason: match e {
                XyzError::Io(ref err) if err.kind() == io::ErrorKind::NotFound => {
                    format!("no geometry file at '{}'", path.display())
                }
                other => format!("'{}': {other}", path.display()),
            },
        })?;
        assemble(identifier, &summary, atoms, self.multiplicity)
    }
}

pub fn file_stem(identifier: &str) -> String {
    identifier
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Spin multiplicity of the lowest state consistent with the electron count: a singlet for
/// an even number of electrons, a doublet for an odd one.
pub fn lowest_multiplicity(atoms: &[Atom], charge: i32) -> u32 {
    let nuclear: i64 = atoms
        .iter()
        .filter_map(|a| atomic_number(&a.element))
        .map(i64::from)
        .sum();
    if (nuclear - i64::from(charge)).rem_euclid(2) == 1 {
        2
    } else {
        1
    }
}

fn summarize(identifier: &str) -> Result<SmilesSummary, GeometryError> {
    SmilesSummary::parse(identifier).map_err(|source| GeometryError::Identifier {
        identifier: identifier.to_string(),
        source,
    })
}

fn parse_embedded(
    identifier: &str,
    stdout: &str,
    stderr: &str,
) -> Result<Vec<Atom>, GeometryError> {
    if stdout.trim().is_empty() {
        let detail = stderr.trim();
        return Err(GeometryError::Embedding {
            identifier: identifier.to_string(),
            reason: if detail.is_empty() {
                "no coordinates produced".to_string()
            } else {
                format!("no coordinates produced: {detail}")
            },
        });
    }
    xyz::read_from_str(stdout).map_err(|e| GeometryError::Embedding {
        identifier: identifier.to_string(),
        reason: e.to_string(),
    })
}

fn assemble(
    identifier: &str,
    summary: &SmilesSummary,
    atoms: Vec<Atom>,
    multiplicity: Option<u32>,
) -> Result<Geometry, GeometryError> {
    if atoms.is_empty() {
        return Err(GeometryError::Embedding {
            identifier: identifier.to_string(),
            reason: "geometry has no atoms".to_string(),
        });
    }
    let charge = summary.formal_charge;
    let multiplicity = multiplicity.unwrap_or_else(|| lowest_multiplicity(&atoms, charge));
    Ok(Geometry::new(atoms, charge, multiplicity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chem::smiles::SmilesError;
    use std::fs;
    use tempfile::tempdir;

    const WATER_XYZ: &str = "3\nwater\nO 0.0 0.0 0.1173\nH 0.0 0.7572 -0.4692\nH 0.0 -0.7572 -0.4692\n";

    #[test]
    fn file_stem_replaces_unsafe_characters() {
        assert_eq!(file_stem("CCO"), "CCO");
        assert_eq!(file_stem("c1ccccc1"), "c1ccccc1");
        assert_eq!(file_stem("C[N+](C)(C)C"), "C_N___C__C_C");
        assert_eq!(file_stem("F/C=C/F"), "F_C_C_F");
    }

    #[test]
    fn lowest_multiplicity_follows_electron_parity() {
        let water = xyz::read_from_str(WATER_XYZ).unwrap();
        assert_eq!(lowest_multiplicity(&water, 0), 1);
        assert_eq!(lowest_multiplicity(&water, 1), 2);

        let methyl = vec![
            Atom::new("C", 0.0, 0.0, 0.0),
            Atom::new("H", 1.08, 0.0, 0.0),
            Atom::new("H", -0.54, 0.935, 0.0),
            Atom::new("H", -0.54, -0.935, 0.0),
        ];
        assert_eq!(lowest_multiplicity(&methyl, 0), 2);
        assert_eq!(lowest_multiplicity(&methyl, -1), 1);
    }

    #[test]
    fn xyz_directory_builds_geometry_with_charge() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("O.xyz"), WATER_XYZ).unwrap();

        let geometry = XyzDirectory::new(dir.path()).build("O").unwrap();
        assert_eq!(geometry.atom_count(), 3);
        assert_eq!(geometry.charge, 0);
        assert_eq!(geometry.multiplicity, 1);
        assert_eq!(geometry.atoms[0].element, "O");
    }

    #[test]
    fn xyz_directory_takes_charge_from_identifier() {
        let dir = tempdir().unwrap();
        let source = XyzDirectory::new(dir.path());
        let hydronium = "4\n\nO 0 0 0\nH 0.96 0 0\nH -0.32 0.9 0\nH -0.32 -0.45 0.78\n";
        fs::write(source.path_for("[OH3+]"), hydronium).unwrap();

        let geometry = source.build("[OH3+]").unwrap();
        assert_eq!(geometry.charge, 1);
        assert_eq!(geometry.multiplicity, 1);
    }

    #[test]
    fn xyz_directory_honors_multiplicity_override() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("O.xyz"), WATER_XYZ).unwrap();

        let geometry = XyzDirectory::new(dir.path())
            .with_multiplicity(Some(3))
            .build("O")
            .unwrap();
        assert_eq!(geometry.multiplicity, 3);
    }

    #[test]
    fn xyz_directory_reports_missing_file_as_embedding_failure() {
        let dir = tempdir().unwrap();
        let result = XyzDirectory::new(dir.path()).build("CCO");
        match result {
            Err(GeometryError::Embedding { identifier, reason }) => {
                assert_eq!(identifier, "CCO");
                assert!(reason.contains("no geometry file"));
            }
            other => panic!("expected Embedding error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_identifier_fails_before_any_file_is_read() {
        let dir = tempdir().unwrap();
        let result = XyzDirectory::new(dir.path()).build("not-a-smiles");
        assert!(matches!(
            result,
            Err(GeometryError::Identifier {
                source: SmilesError::UnexpectedChar { .. },
                ..
            })
        ));
    }

    #[test]
    fn obabel_reports_missing_tool() {
        let source = ObabelGeometry::new("orcanizer-test-no-such-obabel");
        assert!(matches!(
            source.build("CCO"),
            Err(GeometryError::Tool { program, .. }) if program == "orcanizer-test-no-such-obabel"
        ));
    }

    #[test]
    fn obabel_rejects_invalid_identifier_without_running() {
        let source = ObabelGeometry::new("orcanizer-test-no-such-obabel");
        assert!(matches!(
            source.build("C(("),
            Err(GeometryError::Identifier { .. })
        ));
    }

    #[test]
    fn parse_embedded_reads_xyz_block() {
        let atoms = parse_embedded("O", WATER_XYZ, "1 molecule converted").unwrap();
        assert_eq!(atoms.len(), 3);
    }

    #[test]
    fn parse_embedded_rejects_empty_output() {
        let result = parse_embedded("C1CC", "", "0 molecules converted");
        match result {
            Err(GeometryError::Embedding { reason, .. }) => {
                assert!(reason.contains("0 molecules converted"));
            }
            other => panic!("expected Embedding error, got {other:?}"),
        }
    }

    #[test]
    fn assemble_rejects_empty_geometry() {
        let summary = SmilesSummary::parse("C").unwrap();
        assert!(matches!(
            assemble("C", &summary, Vec::new(), None),
            Err(GeometryError::Embedding { .. })
        ));
    }
}
