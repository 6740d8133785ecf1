//! # Engine Module
//!
//! The per-job machinery of a batch: everything needed to turn one identifier into an
//! input file, run the external program on it, and classify what went wrong.
//!
//! - **Configuration** ([`config`]) - Batch settings and the fixed input recipe
//! - **Geometry** ([`geometry`]) - The [`geometry::GeometrySource`] seam and its Open Babel
//!   and XYZ-directory implementations
//! - **Preparation** ([`prepare`]) - Rendering `<slot>.inp`
//! - **Invocation** ([`invoke`]) - The [`invoke::ProgramRunner`] seam and the ORCA runner
//! - **Workspace** ([`workspace`]) - Slot-named file paths
//! - **Progress** ([`progress`]) - Callback-based progress events
//! - **Errors** ([`error`]) - Job failure taxonomy

pub mod config;
pub mod error;
pub mod geometry;
pub mod invoke;
pub mod prepare;
pub mod progress;
pub mod workspace;
