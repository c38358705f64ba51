//! Serializable diagnostics emitted by the analyzer.
//!
//! `AnalysisReport` bundles the compact [`ScanResult`] with a
//! `PipelineTrace` describing every stage that ran: sample counts, stage
//! outputs worth inspecting offline and a timing breakdown. The demos dump
//! these as JSON next to the rendered PNGs.
use crate::types::ScanResult;
use serde::{Deserialize, Serialize};

/// Timing entry for a single pipeline stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one analyzed frame.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

/// Shape of the frame handed to the analyzer.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

/// Range-filter stage summary.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStage {
    pub valid_samples: usize,
    pub total_samples: usize,
    pub smoothed: bool,
    pub elapsed_ms: f64,
}

/// Profile-extraction stage summary; `values` is present on success so the
/// profile can be re-plotted offline.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStage {
    pub found: bool,
    pub valid_count: usize,
    pub interpolated: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<f32>,
    pub elapsed_ms: f64,
}

/// Normal-estimation stage summary.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalStage {
    pub count: usize,
    pub elapsed_ms: f64,
}

/// Curvature stage summary.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvatureStage {
    pub mean: f32,
    pub max: f32,
    pub threshold: f32,
    pub high_count: usize,
    pub elapsed_ms: f64,
}

/// Edge-detection stage summary.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStage {
    pub edge_pixels: usize,
    pub elapsed_ms: f64,
}

/// 3-D normal field stage summary.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStage {
    pub valid_cells: usize,
    pub elapsed_ms: f64,
}

/// End-to-end trace of one analyzer invocation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub filter: FilterStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normals: Option<NormalStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curvature: Option<CurvatureStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges: Option<EdgeStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldStage>,
}

/// Result produced by
/// [`SurfaceAnalyzer::process_with_diagnostics`](crate::SurfaceAnalyzer).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub scan: ScanResult,
    pub trace: PipelineTrace,
}
