pub mod audit;
pub mod orca_input;
pub mod orca_output;
pub mod table;
pub mod xyz;
