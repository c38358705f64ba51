//! Parameter types configuring the analyzer stages.
//!
//! This module groups the knobs for range filtering, profile extraction,
//! normal estimation, curvature analysis and the optional edge/field
//! stages. Defaults reproduce the rig's bench configuration at 640×480;
//! for near-field inspection start from
//! [`AnalyzerParams::near_field`].
use crate::curvature::CurvatureParams;
use crate::edges::EdgeParams;
use crate::filter::RangeFilterParams;
use crate::normals::{FieldParams, NormalParams};
use crate::profile::ProfileParams;
use serde::{Deserialize, Serialize};

/// Analyzer-wide parameters controlling the per-frame pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerParams {
    /// Admissible-range filter applied to every frame.
    pub filter: RangeFilterParams,
    /// Profile extraction along the configured scan line.
    pub profile: ProfileParams,
    /// Tangent/normal estimation over the extracted profile.
    pub normals: NormalParams,
    /// Curvature analysis over the extracted profile.
    pub curvature: CurvatureParams,
    /// Near-field edge detection; `None` disables the stage.
    pub edges: Option<EdgeParams>,
    /// Full-frame 3-D normal field; `None` disables the stage.
    pub field: Option<FieldParams>,
}

impl Default for AnalyzerParams {
    fn default() -> Self {
        Self {
            filter: RangeFilterParams::default(),
            profile: ProfileParams::default(),
            normals: NormalParams::default(),
            curvature: CurvatureParams::default(),
            edges: Some(EdgeParams::default()),
            field: None,
        }
    }
}

impl AnalyzerParams {
    /// Preset tuned for close-up surface work (100–430 mm everywhere).
    pub fn near_field() -> Self {
        Self {
            filter: RangeFilterParams::near_field(),
            ..Self::default()
        }
    }
}
