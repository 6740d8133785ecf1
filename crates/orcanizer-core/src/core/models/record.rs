use serde::{Deserialize, Serialize};
use std::fmt;

/// The eleven computed properties tracked for every molecule.
///
/// The declaration order is the canonical order: it fixes the CSV column order and the order
/// in which missing properties are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    /// Energy of the highest occupied molecular orbital, in Hartree.
    Homo,
    /// Energy of the lowest unoccupied molecular orbital, in Hartree.
    Lumo,
    /// Magnitude of the dipole moment, in Debye.
    DipoleMoment,
    /// Isotropic polarizability, in atomic units.
    Polarizability,
    /// Total thermal energy U, in Hartree.
    ThermalEnergy,
    /// Total enthalpy H, in Hartree.
    Enthalpy,
    /// Final entropy term T*S, in Hartree.
    EntropyTerm,
    /// Final Gibbs free energy G, in Hartree.
    GibbsFreeEnergy,
    /// Rotational constant A, in cm^-1.
    RotationalA,
    /// Rotational constant B, in cm^-1.
    RotationalB,
    /// Rotational constant C, in cm^-1.
    RotationalC,
}

impl Property {
    pub const COUNT: usize = 11;

    pub const ALL: [Property; Self::COUNT] = [
        Property::Homo,
        Property::Lumo,
        Property::DipoleMoment,
        Property::Polarizability,
        Property::ThermalEnergy,
        Property::Enthalpy,
        Property::EntropyTerm,
        Property::GibbsFreeEnergy,
        Property::RotationalA,
        Property::RotationalB,
        Property::RotationalC,
    ];

    /// Column name used in the persisted result table.
    pub fn column(self) -> &'static str {
        match self {
            Property::Homo => "homo_eh",
            Property::Lumo => "lumo_eh",
            Property::DipoleMoment => "dipole_debye",
            Property::Polarizability => "polarizability_au",
            Property::ThermalEnergy => "thermal_energy_eh",
            Property::Enthalpy => "enthalpy_eh",
            Property::EntropyTerm => "entropy_term_eh",
            Property::GibbsFreeEnergy => "gibbs_free_energy_eh",
            Property::RotationalA => "rot_a_cm1",
            Property::RotationalB => "rot_b_cm1",
            Property::RotationalC => "rot_c_cm1",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Property::Homo => "HOMO energy",
            Property::Lumo => "LUMO energy",
            Property::DipoleMoment => "dipole moment",
            Property::Polarizability => "isotropic polarizability",
            Property::ThermalEnergy => "total thermal energy",
            Property::Enthalpy => "total enthalpy",
            Property::EntropyTerm => "entropy term",
            Property::GibbsFreeEnergy => "Gibbs free energy",
            Property::RotationalA => "rotational constant A",
            Property::RotationalB => "rotational constant B",
            Property::RotationalC => "rotational constant C",
        };
        f.write_str(name)
    }
}

/// The result of one successful job: the originating identifier plus exactly eleven values.
///
/// Field names double as CSV headers, so they must stay in sync with [`Property::column`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub identifier: String,
    pub homo_eh: f64,
    pub lumo_eh: f64,
    pub dipole_debye: f64,
    pub polarizability_au: f64,
    pub thermal_energy_eh: f64,
    pub enthalpy_eh: f64,
    pub entropy_term_eh: f64,
    pub gibbs_free_energy_eh: f64,
    pub rot_a_cm1: f64,
    pub rot_b_cm1: f64,
    pub rot_c_cm1: f64,
}

impl PropertyRecord {
    /// Builds a record from values given in canonical [`Property::ALL`] order.
    pub fn from_values(identifier: impl Into<String>, values: [f64; Property::COUNT]) -> Self {
        let [
            homo_eh,
            lumo_eh,
            dipole_debye,
            polarizability_au,
            thermal_energy_eh,
            enthalpy_eh,
            entropy_term_eh,
            gibbs_free_energy_eh,
            rot_a_cm1,
            rot_b_cm1,
            rot_c_cm1,
        ] = values;
        Self {
            identifier: identifier.into(),
            homo_eh,
            lumo_eh,
            dipole_debye,
            polarizability_au,
            thermal_energy_eh,
            enthalpy_eh,
            entropy_term_eh,
            gibbs_free_energy_eh,
            rot_a_cm1,
            rot_b_cm1,
            rot_c_cm1,
        }
    }

    pub fn get(&self, property: Property) -> f64 {
        match property {
            Property::Homo => self.homo_eh,
            Property::Lumo => self.lumo_eh,
            Property::DipoleMoment => self.dipole_debye,
            Property::Polarizability => self.polarizability_au,
            Property::ThermalEnergy => self.thermal_energy_eh,
            Property::Enthalpy => self.enthalpy_eh,
            Property::EntropyTerm => self.entropy_term_eh,
            Property::GibbsFreeEnergy => self.gibbs_free_energy_eh,
            Property::RotationalA => self.rot_a_cm1,
            Property::RotationalB => self.rot_b_cm1,
            Property::RotationalC => self.rot_c_cm1,
        }
    }

    /// All eleven values in canonical order.
    pub fn values(&self) -> [f64; Property::COUNT] {
        Property::ALL.map(|p| self.get(p))
    }
}

/// Eleven extracted values not yet attached to an identifier.
///
/// The extractor only knows the slot id; the orchestrator owns the identifier and attaches it
/// with [`PropertyValues::into_record`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyValues([f64; Property::COUNT]);

impl PropertyValues {
    pub fn new(values: [f64; Property::COUNT]) -> Self {
        Self(values)
    }

    pub fn get(&self, property: Property) -> f64 {
        self.0[property.index()]
    }

    pub fn into_record(self, identifier: impl Into<String>) -> PropertyRecord {
        PropertyRecord::from_values(identifier, self.0)
    }
}

/// Ordered rows of successfully processed jobs.
///
/// The table only ever grows during a batch; it is rebuilt from scratch on every run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    records: Vec<PropertyRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: PropertyRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyRecord> {
        self.records.iter()
    }
}

impl FromIterator<PropertyRecord> for ResultTable {
    fn from_iter<T: IntoIterator<Item = PropertyRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
