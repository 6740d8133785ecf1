pub mod elements;
pub mod smiles;
