//! # orcanizer Core Library
//!
//! Drives batches of ORCA quantum-chemistry calculations: one molecule at a time it renders
//! an input file, runs the external program, scrapes a fixed set of computed properties from
//! the output, and aggregates the successful results into a table.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Geometry`, `PropertyRecord`), the
//!   identifier scanner, and the file formats: ORCA input rendering, ORCA output extraction,
//!   XYZ blocks, the CSV result table and the append-only audit logs.
//!
//! - **[`engine`]: The Moving Parts.** Configuration, the error taxonomy, progress reporting,
//!   and the two seams to the outside world: [`engine::geometry::GeometrySource`] (identifier
//!   to coordinates) and [`engine::invoke::ProgramRunner`] (the external executable).
//!
//! - **[`workflows`]: The Public API.** The per-job orchestrator, which is the single
//!   failure-containment boundary, and the batch collector built on top of it.

pub mod core;
pub mod engine;
pub mod workflows;
