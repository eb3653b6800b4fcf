//! Grounded bug reports from recorded GUI exploration graphs.
//!
//! A graph dump (transitions plus screen declarations keyed by 64-hex hashes)
//! is normalized into short canonical ids (`S<n>`, `T<n>`), projected to text
//! for a report generator, and the generator's `<T<n>>` step markers are then
//! mapped back to the original transition hashes.
//!
//! ```text
//! raw graph -> collect -> assign_screen_ids -> project -> generator -> reverse
//! ```

pub mod cli;
pub mod generator;
pub mod graph;
pub mod grounding;
pub mod projection;
pub mod report;
pub mod trace;

pub use grounding::pipeline::GroundedGraph;
