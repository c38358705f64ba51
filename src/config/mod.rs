//! JSON configuration types for the demo binaries.

pub mod edge_demo;
pub mod profile_demo;
pub mod scenario_demo;
