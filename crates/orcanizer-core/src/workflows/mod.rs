//! # Workflows Module
//!
//! Top-level entry points. [`job::JobRunner`] takes a single identifier through preparation,
//! invocation and extraction and decides whether it goes to the success or the failure log;
//! [`batch::BatchCollector`] runs a sequence of identifiers through it and gathers the
//! resulting records into a table.

pub mod batch;
pub mod job;
