use crate::core::models::record::{Property, PropertyValues};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Output file '{}' does not exist", path.display())]
    MissingOutput { path: PathBuf },
    #[error("Output file has no {property}")]
    MissingProperty { property: Property },
    #[error("Could not parse {property} from token '{token}'")]
    UnparsableValue { property: Property, token: String },
    #[error("File I/O error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

struct LabelRule {
    label: &'static str,
    token: usize,
    property: Property,
}

/// Single-line properties: the value is the whitespace-separated token at index `token` on a
/// line containing `label`.
const LABEL_RULES: &[LabelRule] = &[
    LabelRule {
        label: "Magnitude (Debye)",
        token: 3,
        property: Property::DipoleMoment,
    },
    LabelRule {
        label: "Isotropic polarizability",
        token: 3,
        property: Property::Polarizability,
    },
    LabelRule {
        label: "Total thermal energy",
        token: 3,
        property: Property::ThermalEnergy,
    },
    LabelRule {
        label: "Total Enthalpy",
        token: 3,
        property: Property::Enthalpy,
    },
    LabelRule {
        label: "Final entropy term",
        token: 4,
        property: Property::EntropyTerm,
    },
    LabelRule {
        label: "Final Gibbs free energy",
        token: 5,
        property: Property::GibbsFreeEnergy,
    },
    LabelRule {
        label: "Rotational constants in cm-1:",
        token: 4,
        property: Property::RotationalA,
    },
    LabelRule {
        label: "Rotational constants in cm-1:",
        token: 5,
        property: Property::RotationalB,
    },
    LabelRule {
        label: "Rotational constants in cm-1:",
        token: 6,
        property: Property::RotationalC,
    },
];

const ORBITAL_BLOCK_MARKER: &str = "ORBITAL ENERGIES";
const ORBITAL_TABLE_HEADER: &str = "E(Eh)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OrbitalState {
    Outside,
    AwaitingHeader,
    InTable,
}

/// Collects the raw token for every property while scanning. ORCA repeats most blocks on each
/// optimization cycle, so a later occurrence replaces an earlier one.
#[derive(Default)]
struct TokenSink {
    tokens: [Option<String>; Property::COUNT],
}

impl TokenSink {
    fn set(&mut self, property: Property, token: Option<&str>) {
        self.tokens[property.index()] = Some(token.unwrap_or_default().to_string());
    }

    /// All-or-nothing conversion: the first missing or malformed property, in canonical order,
    /// fails the whole extraction.
    fn finish(self) -> Result<PropertyValues, ExtractError> {
        let mut values = [0.0; Property::COUNT];
        for (property, token) in Property::ALL.into_iter().zip(self.tokens) {
            let token = token.ok_or(ExtractError::MissingProperty { property })?;
            values[property.index()] = token
                .parse::<f64>()
                .map_err(|_| ExtractError::UnparsableValue { property, token })?;
        }
        Ok(PropertyValues::new(values))
    }
}

/// Scans ORCA output text for the eleven tracked properties.
pub fn extract_from_str(text: &str) -> Result<PropertyValues, ExtractError> {
    let mut sink = TokenSink::default();
    let mut orbitals = OrbitalState::Outside;

    for line in text.lines() {
        if line.contains(ORBITAL_BLOCK_MARKER) {
            orbitals = OrbitalState::AwaitingHeader;
            continue;
        }

        match orbitals {
            OrbitalState::AwaitingHeader => {
                if line.contains(ORBITAL_TABLE_HEADER) {
                    orbitals = OrbitalState::InTable;
                }
                continue;
            }
            OrbitalState::InTable => {
                orbitals = scan_orbital_row(line, &mut sink);
                continue;
            }
            OrbitalState::Outside => {}
        }

        for rule in LABEL_RULES {
            if line.contains(rule.label) {
                sink.set(rule.property, line.split_whitespace().nth(rule.token));
            }
        }
    }

    sink.finish()
}

/// Handles one `NO OCC E(Eh) E(eV)` row. Occupied rows update the HOMO; the first empty
/// orbital is the LUMO and closes the table. Anything that is not a row also closes it.
fn scan_orbital_row(line: &str, sink: &mut TokenSink) -> OrbitalState {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let Some(occupation) = fields.get(1).and_then(|s| s.parse::<f64>().ok()) else {
        return OrbitalState::Outside;
    };
    let energy = fields.get(2).copied();

    if occupation > 0.0 {
        sink.set(Property::Homo, energy);
        OrbitalState::InTable
    } else {
        sink.set(Property::Lumo, energy);
        OrbitalState::Outside
    }
}

/// Decodes raw output bytes. Output redirected through some Windows shells is UTF-16 with a
/// byte-order mark; everything else is read as UTF-8, replacing invalid sequences.
pub fn decode(bytes: &[u8]) -> String {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8_lossy(rest).into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Reads and scans the output document at `path`.
pub fn extract_from_path(path: &Path) -> Result<PropertyValues, ExtractError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ExtractError::MissingOutput {
            path: path.to_path_buf(),
        },
        _ => ExtractError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    debug!("Read {} bytes of output from {:?}", bytes.len(), path);
    extract_from_str(&decode(&bytes))
}
