use crate::core::models::geometry::Geometry;
use serde::Deserialize;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_KEYWORDS: &str = "B3LYP/G RIJCOSX def2-SVP Opt FREQ xyzfile";
pub const DEFAULT_MAX_ITER: usize = 500;

/// The fixed computational recipe written at the top of every ORCA input file.
///
/// A recipe is chosen once per batch; individual jobs only contribute their geometry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Recipe {
    /// The simple-input line after `!`: method, basis set and job directives.
    pub keywords: String,
    /// Number of MPI processes (`%pal nprocs`). `None` omits the block.
    pub nprocs: Option<usize>,
    /// Maximum SCF iterations (`%scf MaxIter`).
    pub scf_max_iter: usize,
    /// Maximum geometry-optimization cycles (`%geom MaxIter`).
    pub geom_max_iter: usize,
    /// Request the dipole moment in `%elprop`.
    pub dipole: bool,
    /// Request the static polarizability in `%elprop`.
    pub polarizability: bool,
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.to_string(),
            nprocs: Some(1),
            scf_max_iter: DEFAULT_MAX_ITER,
            geom_max_iter: DEFAULT_MAX_ITER,
            dipole: true,
            polarizability: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum RecipeLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

impl Recipe {
    /// Loads a recipe from a TOML file. Keys left out keep their default value.
    pub fn load(path: &Path) -> Result<Self, RecipeLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| RecipeLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| RecipeLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    /// Renders the complete input file for `geometry`. The output is a pure function of the
    /// recipe and the geometry.
    pub fn render(&self, geometry: &Geometry) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.render_into(&mut out, geometry);
        out
    }

    fn render_into(&self, out: &mut String, geometry: &Geometry) -> std::fmt::Result {
        writeln!(out, "! {}", self.keywords.trim())?;
        writeln!(out)?;

        if let Some(nprocs) = self.nprocs {
            writeln!(out, "%pal")?;
            writeln!(out, "  nprocs {nprocs}")?;
            writeln!(out, "end")?;
            writeln!(out)?;
        }

        writeln!(out, "%scf")?;
        writeln!(out, "  MaxIter {}", self.scf_max_iter)?;
        writeln!(out, "end")?;
        writeln!(out)?;

        writeln!(out, "%geom")?;
        writeln!(out, "  MaxIter {}", self.geom_max_iter)?;
        writeln!(out, "end")?;
        writeln!(out)?;

        if self.dipole || self.polarizability {
            writeln!(out, "%elprop")?;
            writeln!(out, "  Dipole {}", self.dipole)?;
            writeln!(out, "  Polar {}", u8::from(self.polarizability))?;
            writeln!(out, "end")?;
            writeln!(out)?;
        }

        writeln!(out, "* xyz {} {}", geometry.charge, geometry.multiplicity)?;
        for atom in &geometry.atoms {
            writeln!(
                out,
                "  {:<2} {:>14.8} {:>14.8} {:>14.8}",
                atom.element, atom.position.x, atom.position.y, atom.position.z
            )?;
        }
        writeln!(out, "*")
    }

    pub fn write_to(&self, geometry: &Geometry, writer: &mut impl Write) -> io::Result<()> {
        writer.write_all(self.render(geometry).as_bytes())
    }

    /// Writes the input file, replacing any previous file at `path`.
    pub fn write_to_path<P: AsRef<Path>>(&self, geometry: &Geometry, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(geometry, &mut writer)?;
        writer.flush()
    }
}
