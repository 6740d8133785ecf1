pub mod geometry;
pub mod job;
pub mod record;
