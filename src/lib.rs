#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod analyzer;
pub mod curvature;
pub mod diagnostics;
pub mod edges;
pub mod error;
pub mod filter;
pub mod frame;
pub mod normals;
pub mod profile;
pub mod scenario;
pub mod types;

// Demo-tool configuration; public so the binaries can share it.
pub mod config;

// --- High-level re-exports -------------------------------------------------

// Main entry points: analyzer + results.
pub use crate::analyzer::{AnalyzerParams, FrameAnalysis, SurfaceAnalyzer};
pub use crate::error::InsufficientData;
pub use crate::types::ScanResult;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use depth_profiler::prelude::*;
///
/// # fn main() {
/// let mut gen = ScenarioGenerator::new(ScenarioKind::SurfaceWave);
/// gen.advance(1.0 / 30.0);
/// let depth = gen.depth_frame();
///
/// let mut analyzer = SurfaceAnalyzer::new(AnalyzerParams::default());
/// let analysis = analyzer.process(depth.as_view());
/// println!(
///     "found={} latency_ms={:.3}",
///     analysis.result.profile_found, analysis.result.latency_ms
/// );
/// # }
/// ```
pub mod prelude {
    pub use crate::analyzer::{AnalyzerParams, FrameAnalysis, SurfaceAnalyzer};
    pub use crate::frame::{DepthFrame, DepthView};
    pub use crate::scenario::{ScenarioGenerator, ScenarioKind};
    pub use crate::types::ScanResult;
}
