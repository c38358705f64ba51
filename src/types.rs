use serde::Serialize;

/// Compact per-frame summary returned by the analyzer.
///
/// The full profile, normal, curvature and edge payloads travel in
/// [`FrameAnalysis`](crate::analyzer::FrameAnalysis); this struct is the
/// cheap-to-serialize digest a driving loop logs or displays.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Whether profile extraction produced a usable profile.
    pub profile_found: bool,
    /// Valid positions observed before interpolation.
    pub valid_samples: usize,
    /// Mean depth of the extracted profile in millimeters (0 when absent).
    pub mean_depth_mm: f32,
    /// Mean curvature along the profile (0 when absent).
    pub curvature_mean: f32,
    /// Maximum curvature along the profile (0 when absent).
    pub curvature_max: f32,
    /// Number of high-curvature points flagged.
    pub high_curvature_points: usize,
    /// Edge pixels in the near-field edge map (0 when the stage is off).
    pub edge_pixels: usize,
    /// End-to-end processing latency in milliseconds.
    pub latency_ms: f64,
}
