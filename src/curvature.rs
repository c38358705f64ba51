//! Curvature analysis of depth profiles.
//!
//! Double differentiation amplifies noise, so an optional 3-tap smoothing
//! pass runs between the first and second derivative. Curvature follows
//! the plane-curve formula `κ = |f''| / (1 + f'²)^1.5`.
//!
//! High-curvature classification is data-relative: a point is flagged when
//! its curvature exceeds the configured percentile of the frame's own
//! curvature distribution, so the threshold adapts to each frame instead
//! of requiring absolute tuning.
use crate::normals::central_gradient;
use log::debug;
use serde::{Deserialize, Serialize};

/// Parameters for curvature analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CurvatureParams {
    /// Minimum profile length; shorter inputs yield no result.
    pub min_samples: usize,
    /// Smooth the first derivative before differentiating again.
    pub smooth_between: bool,
    /// Percentile (0–100) above which a point counts as high-curvature.
    pub high_percentile: f32,
}

impl Default for CurvatureParams {
    fn default() -> Self {
        Self {
            min_samples: 10,
            smooth_between: true,
            high_percentile: 90.0,
        }
    }
}

/// Per-index curvature with adaptive high-curvature flags and summary
/// statistics.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvatureProfile {
    pub kappa: Vec<f32>,
    pub high: Vec<bool>,
    pub mean: f32,
    pub max: f32,
    /// The percentile threshold the flags were computed against.
    pub threshold: f32,
}

impl CurvatureProfile {
    pub fn high_count(&self) -> usize {
        self.high.iter().filter(|&&h| h).count()
    }
}

/// Analyze the curvature of a dense profile.
///
/// Returns `None` when the profile is shorter than `min_samples`: too
/// little data for a meaningful second derivative.
pub fn analyze_curvature(values: &[f32], params: &CurvatureParams) -> Option<CurvatureProfile> {
    if values.len() < params.min_samples {
        debug!(
            "analyze_curvature: {} samples below minimum {}",
            values.len(),
            params.min_samples
        );
        return None;
    }

    let mut d1 = central_gradient(values, 1.0);
    if params.smooth_between {
        crate::normals::smooth3(&mut d1);
    }
    let d2 = central_gradient(&d1, 1.0);

    let kappa: Vec<f32> = d1
        .iter()
        .zip(d2.iter())
        .map(|(&f1, &f2)| f2.abs() / (1.0 + f1 * f1).powf(1.5))
        .collect();

    let threshold = percentile(&kappa, params.high_percentile);
    let high: Vec<bool> = kappa.iter().map(|&k| k > threshold).collect();

    let mean = kappa.iter().sum::<f32>() / kappa.len() as f32;
    let max = kappa.iter().fold(0.0f32, |a, &b| a.max(b));

    Some(CurvatureProfile {
        kappa,
        high,
        mean,
        max,
        threshold,
    })
}

/// Percentile by nearest-rank over a sorted copy of the finite values.
fn percentile(values: &[f32], pct: f32) -> f32 {
    let mut sorted: Vec<f32> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return 0.0;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite compare"));
    let rank = ((pct / 100.0) * (sorted.len() - 1) as f32).round() as usize;
    sorted[rank.min(sorted.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_profile_yields_none() {
        let values = vec![300.0f32; 9];
        assert!(analyze_curvature(&values, &CurvatureParams::default()).is_none());
    }

    #[test]
    fn flat_profile_has_zero_curvature() {
        let values = vec![300.0f32; 64];
        let out = analyze_curvature(&values, &CurvatureParams::default()).expect("long enough");
        assert!(out.max < 1e-6);
        assert_eq!(out.high_count(), 0);
    }

    #[test]
    fn step_produces_a_local_curvature_peak() {
        let mut values = vec![350.0f32; 320];
        for v in values.iter_mut().skip(160) {
            *v = 250.0;
        }
        let out = analyze_curvature(&values, &CurvatureParams::default()).expect("long enough");

        let near_step = out
            .high
            .iter()
            .enumerate()
            .any(|(i, &flag)| flag && (i as i32 - 160).abs() <= 2);
        assert!(
            near_step,
            "no high-curvature flag within 2 columns of the step"
        );
        // far from the discontinuity the surface is flat
        assert!(out.kappa[..150].iter().all(|&k| k < 1e-6));
    }

    #[test]
    fn percentile_nearest_rank() {
        let values: Vec<f32> = (0..101).map(|i| i as f32).collect();
        assert_eq!(percentile(&values, 90.0), 90.0);
        assert_eq!(percentile(&values, 0.0), 0.0);
        assert_eq!(percentile(&values, 100.0), 100.0);
    }
}
