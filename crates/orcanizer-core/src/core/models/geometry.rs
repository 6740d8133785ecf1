use nalgebra::Point3;

/// A single atom of an embedded molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element symbol as it should appear in the ORCA coordinate block (e.g., "C", "Cl").
    pub element: String,
    /// The Cartesian position of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    pub fn new(element: &str, x: f64, y: f64, z: f64) -> Self {
        Self {
            element: element.to_string(),
            position: Point3::new(x, y, z),
        }
    }
}

/// A three-dimensional molecular geometry together with the electronic state ORCA needs.
///
/// Geometries are produced by a [`GeometrySource`](crate::engine::geometry::GeometrySource)
/// from an identifier and consumed once, when the input file is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Atoms in the order they will be written, hydrogens included.
    pub atoms: Vec<Atom>,
    /// Total formal charge of the molecule.
    pub charge: i32,
    /// Spin multiplicity (2S + 1).
    pub multiplicity: u32,
}

impl Geometry {
    pub fn new(atoms: Vec<Atom>, charge: i32, multiplicity: u32) -> Self {
        Self {
            atoms,
            charge,
            multiplicity,
        }
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atom_new_stores_element_and_position() {
        let atom = Atom::new("O", 0.5, -1.0, 2.25);
        assert_eq!(atom.element, "O");
        assert_eq!(atom.position, Point3::new(0.5, -1.0, 2.25));
    }

    #[test]
    fn empty_geometry_reports_no_atoms() {
        let geometry = Geometry::new(Vec::new(), 0, 1);
        assert!(geometry.is_empty());
        assert_eq!(geometry.atom_count(), 0);
    }
}
