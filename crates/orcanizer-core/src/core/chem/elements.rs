use phf::{Map, Set, phf_map, phf_set};

static ATOMIC_NUMBERS: Map<&'static str, u32> = phf_map! {
    "H" => 1, "He" => 2,
    "Li" => 3, "Be" => 4, "B" => 5, "C" => 6, "N" => 7, "O" => 8, "F" => 9, "Ne" => 10,
    "Na" => 11, "Mg" => 12, "Al" => 13, "Si" => 14, "P" => 15, "S" => 16, "Cl" => 17, "Ar" => 18,
    "K" => 19, "Ca" => 20, "Sc" => 21, "Ti" => 22, "V" => 23, "Cr" => 24, "Mn" => 25, "Fe" => 26, "Co" => 27, "Ni" => 28,
    "Cu" => 29, "Zn" => 30, "Ga" => 31, "Ge" => 32, "As" => 33, "Se" => 34, "Br" => 35, "Kr" => 36,
    "Rb" => 37, "Sr" => 38, "Y" => 39, "Zr" => 40, "Nb" => 41, "Mo" => 42, "Tc" => 43, "Ru" => 44, "Rh" => 45, "Pd" => 46,
    "Ag" => 47, "Cd" => 48, "In" => 49, "Sn" => 50, "Sb" => 51, "Te" => 52, "I" => 53, "Xe" => 54,
    "Cs" => 55, "Ba" => 56, "La" => 57, "Ce" => 58, "Pr" => 59, "Nd" => 60, "Pm" => 61, "Sm" => 62, "Eu" => 63, "Gd" => 64,
    "Tb" => 65, "Dy" => 66, "Ho" => 67, "Er" => 68, "Tm" => 69, "Yb" => 70, "Lu" => 71, "Hf" => 72, "Ta" => 73, "W" => 74,
    "Re" => 75, "Os" => 76, "Ir" => 77, "Pt" => 78, "Au" => 79, "Hg" => 80, "Tl" => 81, "Pb" => 82, "Bi" => 83, "Po" => 84,
    "At" => 85, "Rn" => 86,
    "Fr" => 87, "Ra" => 88, "Ac" => 89, "Th" => 90, "Pa" => 91, "U" => 92, "Np" => 93, "Pu" => 94, "Am" => 95, "Cm" => 96,
    "Bk" => 97, "Cf" => 98, "Es" => 99, "Fm" => 100, "Md" => 101, "No" => 102, "Lr" => 103,
};

/// Aromatic symbols allowed inside brackets, e.g. `[se]` or `[nH]`.
static AROMATIC_SYMBOLS: Set<&'static str> = phf_set! {
    "b", "c", "n", "o", "p", "s", "se", "as", "te",
};

/// Symbols that may appear without brackets.
static ORGANIC_SUBSET: Set<&'static str> = phf_set! {
    "B", "C", "N", "O", "P", "S", "F", "Cl", "Br", "I",
    "b", "c", "n", "o", "p", "s",
};

pub fn is_element(symbol: &str) -> bool {
    ATOMIC_NUMBERS.contains_key(symbol)
}

pub fn atomic_number(symbol: &str) -> Option<u32> {
    ATOMIC_NUMBERS.get(symbol).copied()
}

pub fn is_aromatic_symbol(symbol: &str) -> bool {
    AROMATIC_SYMBOLS.contains(symbol)
}

pub fn is_organic_subset(symbol: &str) -> bool {
    ORGANIC_SUBSET.contains(symbol)
}

/// Returns the canonical capitalization of an element symbol (`"cl"` and `"CL"` become
/// `"Cl"`), or `None` if the text does not name an element.
pub fn normalize_symbol(symbol: &str) -> Option<String> {
    let mut chars = symbol.trim().chars();
    let first = chars.next()?.to_ascii_uppercase();
    let rest: String = chars.map(|c| c.to_ascii_lowercase()).collect();
    let normalized = format!("{first}{rest}");
    is_element(&normalized).then_some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_element_is_case_sensitive() {
        assert!(is_element("Cl"));
        assert!(is_element("C"));
        assert!(!is_element("CL"));
        assert!(!is_element("cl"));
        assert!(!is_element("Xx"));
    }

    #[test]
    fn atomic_number_covers_common_elements() {
        assert_eq!(atomic_number("H"), Some(1));
        assert_eq!(atomic_number("C"), Some(6));
        assert_eq!(atomic_number("Cl"), Some(17));
        assert_eq!(atomic_number("Br"), Some(35));
        assert_eq!(atomic_number("I"), Some(53));
        assert_eq!(atomic_number("U"), Some(92));
        assert_eq!(atomic_number("Lr"), Some(103));
        assert_eq!(atomic_number("c"), None);
    }

    #[test]
    fn organic_subset_excludes_metals_and_hydrogen() {
        assert!(is_organic_subset("Br"));
        assert!(is_organic_subset("c"));
        assert!(!is_organic_subset("H"));
        assert!(!is_organic_subset("Fe"));
    }

    #[test]
    fn normalize_symbol_fixes_capitalization() {
        assert_eq!(normalize_symbol("cl").as_deref(), Some("Cl"));
        assert_eq!(normalize_symbol(" FE ").as_deref(), Some("Fe"));
        assert_eq!(normalize_symbol("h").as_deref(), Some("H"));
        assert_eq!(normalize_symbol("Qq"), None);
        assert_eq!(normalize_symbol(""), None);
    }
}
