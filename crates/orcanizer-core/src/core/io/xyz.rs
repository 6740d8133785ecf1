use crate::core::chem::elements::normalize_symbol;
use crate::core::models::geometry::Atom;
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Expected {expected} atoms but found {found}")]
    AtomCountMismatch { expected: usize, found: usize },
}

#[derive(Debug, Error)]
pub enum XyzParseErrorKind {
    #[error("missing atom count line")]
    MissingCount,
    #[error("invalid atom count '{0}'")]
    InvalidCount(String),
    #[error("atom line needs an element and three coordinates")]
    TooFewFields,
    #[error("unknown element '{0}'")]
    UnknownElement(String),
    #[error("invalid coordinate '{0}'")]
    InvalidFloat(String),
}

/// Reads a single-frame XYZ block: an atom count, a comment line, then one
/// `<element> <x> <y> <z>` line per atom. Trailing blank lines are ignored; lines past the
/// declared count are not read.
pub fn read_from(reader: &mut impl BufRead) -> Result<Vec<Atom>, XyzError> {
    let mut lines = reader.lines().enumerate();

    let expected = loop {
        let Some((idx, line)) = lines.next() else {
            return Err(XyzError::Parse {
                line: 1,
                kind: XyzParseErrorKind::MissingCount,
            });
        };
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        break trimmed.parse::<usize>().map_err(|_| XyzError::Parse {
            line: idx + 1,
            kind: XyzParseErrorKind::InvalidCount(trimmed.to_string()),
        })?;
    };

    // comment line
    if let Some((_, line)) = lines.next() {
        line?;
    }

    let mut atoms = Vec::with_capacity(expected);
    for (idx, line) in lines {
        if atoms.len() == expected {
            break;
        }
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        atoms.push(parse_atom_line(&line, idx + 1)?);
    }

    if atoms.len() != expected {
        return Err(XyzError::AtomCountMismatch {
            expected,
            found: atoms.len(),
        });
    }
    Ok(atoms)
}

pub fn read_from_str(content: &str) -> Result<Vec<Atom>, XyzError> {
    read_from(&mut content.as_bytes())
}

pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Atom>, XyzError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    read_from(&mut reader)
}

fn parse_atom_line(line: &str, line_num: usize) -> Result<Atom, XyzError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::TooFewFields,
        });
    }

    let element = normalize_symbol(parts[0]).ok_or_else(|| XyzError::Parse {
        line: line_num,
        kind: XyzParseErrorKind::UnknownElement(parts[0].to_string()),
    })?;

    let coord = |s: &str| -> Result<f64, XyzError> {
        s.parse().map_err(|_| XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::InvalidFloat(s.to_string()),
        })
    };

    Ok(Atom {
        element,
        position: Point3::new(coord(parts[1])?, coord(parts[2])?, coord(parts[3])?),
    })
}
