//! Frame-at-a-time pipeline orchestration.
//!
//! The [`SurfaceAnalyzer`] exposes a simple API: feed a depth view and get
//! the profile, normal, curvature and edge outputs for that frame plus a
//! compact [`ScanResult`] summary. Internally it runs range filtering,
//! profile extraction, normal estimation, curvature analysis and the
//! optional edge/field stages in order, timing each one.
//!
//! Profile extraction failing with
//! [`InsufficientData`](crate::error::InsufficientData) is a normal
//! degraded-input outcome: the analyzer logs it at debug level, marks the
//! frame `profile_found == false` and skips the profile-dependent stages.
//! Nothing panics across the pipeline boundary during regular operation;
//! the driving loop alone decides whether to log, skip or retry.
//!
//! Typical usage:
//! ```no_run
//! use depth_profiler::{AnalyzerParams, SurfaceAnalyzer};
//! use depth_profiler::frame::DepthFrame;
//!
//! # fn example(depth: DepthFrame) {
//! let mut analyzer = SurfaceAnalyzer::new(AnalyzerParams::default());
//! let analysis = analyzer.process(depth.as_view());
//! if analysis.result.profile_found {
//!     println!("mean depth {:.1} mm", analysis.result.mean_depth_mm);
//! }
//! # }
//! ```
use crate::curvature::{self, CurvatureProfile};
use crate::diagnostics::{
    AnalysisReport, CurvatureStage, EdgeStage, FieldStage, FilterStage, InputDescriptor,
    NormalStage, PipelineTrace, ProfileStage, TimingBreakdown,
};
use crate::edges::{self, EdgeMap};
use crate::filter;
use crate::frame::DepthView;
use crate::normals::{self, NormalField3, ProfileNormals};
use crate::profile::{self, Profile};
use crate::types::ScanResult;
use log::debug;
use std::time::Instant;

pub mod params;
mod workspace;

pub use params::AnalyzerParams;

use workspace::AnalyzerWorkspace;

/// All outputs of one analyzed frame.
///
/// The options mirror what actually ran: profile-dependent outputs are
/// `None` when extraction failed, edge/field outputs are `None` when the
/// stage is disabled.
#[derive(Clone, Debug)]
pub struct FrameAnalysis {
    pub result: ScanResult,
    pub profile: Option<Profile>,
    pub normals: Option<ProfileNormals>,
    pub curvature: Option<CurvatureProfile>,
    pub edges: Option<EdgeMap>,
    pub normal_field: Option<NormalField3>,
}

/// Surface analyzer orchestrating filtering, profile extraction, normal
/// and curvature estimation plus the optional edge/field stages.
pub struct SurfaceAnalyzer {
    params: AnalyzerParams,
    workspace: AnalyzerWorkspace,
}

impl SurfaceAnalyzer {
    /// Create an analyzer with the supplied parameters.
    pub fn new(params: AnalyzerParams) -> Self {
        Self {
            params,
            workspace: AnalyzerWorkspace::new(),
        }
    }

    pub fn params(&self) -> &AnalyzerParams {
        &self.params
    }

    /// Run the pipeline on one frame.
    pub fn process(&mut self, depth: DepthView<'_>) -> FrameAnalysis {
        self.process_with_diagnostics(depth).0
    }

    /// Run the pipeline and also return the serializable stage report.
    pub fn process_with_diagnostics(
        &mut self,
        depth: DepthView<'_>,
    ) -> (FrameAnalysis, AnalysisReport) {
        let (width, height) = (depth.w, depth.h);
        debug!("SurfaceAnalyzer::process start w={width} h={height}");
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        // range filter
        let filter_start = Instant::now();
        filter::filter_range_into(&depth, &self.params.filter, &mut self.workspace.filtered);
        let filter_ms = elapsed_ms(filter_start);
        timings.push("filter", filter_ms);
        let valid_samples_frame = self.workspace.filtered.valid_count();
        let filter_stage = FilterStage {
            valid_samples: valid_samples_frame,
            total_samples: width * height,
            smoothed: self.params.filter.smooth
                && valid_samples_frame >= self.params.filter.min_valid_for_smoothing,
            elapsed_ms: filter_ms,
        };

        // profile extraction; failure skips the dependent stages
        let profile_start = Instant::now();
        let extraction = profile::extract_profile(&self.workspace.filtered, &self.params.profile);
        let profile_ms = elapsed_ms(profile_start);
        timings.push("profile", profile_ms);

        let (profile, profile_stage) = match extraction {
            Ok(p) => {
                let stage = ProfileStage {
                    found: true,
                    valid_count: p.valid_count,
                    interpolated: p.interpolated,
                    values: p.values.clone(),
                    elapsed_ms: profile_ms,
                };
                (Some(p), stage)
            }
            Err(err) => {
                debug!("SurfaceAnalyzer::process profile skipped: {err}");
                let stage = ProfileStage {
                    found: false,
                    valid_count: err.valid,
                    interpolated: 0,
                    values: Vec::new(),
                    elapsed_ms: profile_ms,
                };
                (None, stage)
            }
        };

        let mut profile_normals = None;
        let mut normal_stage = None;
        let mut curvature_profile = None;
        let mut curvature_stage = None;
        if let Some(ref p) = profile {
            let normal_start = Instant::now();
            let n = normals::estimate_profile_normals(&p.values, &self.params.normals);
            let normal_ms = elapsed_ms(normal_start);
            timings.push("normals", normal_ms);
            normal_stage = Some(NormalStage {
                count: n.len(),
                elapsed_ms: normal_ms,
            });
            profile_normals = Some(n);

            let curvature_start = Instant::now();
            let c = curvature::analyze_curvature(&p.values, &self.params.curvature);
            let curvature_ms = elapsed_ms(curvature_start);
            timings.push("curvature", curvature_ms);
            if let Some(ref c) = c {
                curvature_stage = Some(CurvatureStage {
                    mean: c.mean,
                    max: c.max,
                    threshold: c.threshold,
                    high_count: c.high_count(),
                    elapsed_ms: curvature_ms,
                });
            }
            curvature_profile = c;
        }

        // edge map and normal field run off the filtered frame directly
        let mut edge_map = None;
        let mut edge_stage = None;
        if let Some(ref edge_params) = self.params.edges {
            let edge_start = Instant::now();
            let map = edges::detect_edges(&depth, edge_params);
            let edge_ms = elapsed_ms(edge_start);
            timings.push("edges", edge_ms);
            edge_stage = Some(EdgeStage {
                edge_pixels: map.count_edges(),
                elapsed_ms: edge_ms,
            });
            edge_map = Some(map);
        }

        let mut normal_field = None;
        let mut field_stage = None;
        if let Some(ref field_params) = self.params.field {
            let field_start = Instant::now();
            let field = normals::estimate_normal_field(&self.workspace.filtered, field_params);
            let field_ms = elapsed_ms(field_start);
            timings.push("field", field_ms);
            field_stage = Some(FieldStage {
                valid_cells: field.valid_count(),
                elapsed_ms: field_ms,
            });
            normal_field = Some(field);
        }

        timings.total_ms = elapsed_ms(total_start);

        let result = ScanResult {
            profile_found: profile.is_some(),
            valid_samples: profile_stage.valid_count,
            mean_depth_mm: profile
                .as_ref()
                .map(|p| p.values.iter().sum::<f32>() / p.len().max(1) as f32)
                .unwrap_or(0.0),
            curvature_mean: curvature_profile.as_ref().map(|c| c.mean).unwrap_or(0.0),
            curvature_max: curvature_profile.as_ref().map(|c| c.max).unwrap_or(0.0),
            high_curvature_points: curvature_profile
                .as_ref()
                .map(|c| c.high_count())
                .unwrap_or(0),
            edge_pixels: edge_map.as_ref().map(|m| m.count_edges()).unwrap_or(0),
            latency_ms: timings.total_ms,
        };
        debug!(
            "SurfaceAnalyzer::process done found={} latency_ms={:.3}",
            result.profile_found, result.latency_ms
        );

        let report = AnalysisReport {
            scan: result.clone(),
            trace: PipelineTrace {
                input: InputDescriptor { width, height },
                timings,
                filter: filter_stage,
                profile: Some(profile_stage),
                normals: normal_stage,
                curvature: curvature_stage,
                edges: edge_stage,
                field: field_stage,
            },
        };

        let analysis = FrameAnalysis {
            result,
            profile,
            normals: profile_normals,
            curvature: curvature_profile,
            edges: edge_map,
            normal_field,
        };
        (analysis, report)
    }
}

#[inline]
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
