//! Surface-normal estimation.
//!
//! The 2-D estimator differentiates a depth profile and forms, per index,
//! the tangent `(spacing, dz)` and its perpendicular `(-dz, spacing)`,
//! both normalized. Building the normal as the tangent's perpendicular
//! (not from an ad-hoc unnormalized formula) is what guarantees
//! `normal · tangent ≈ 0`, the property this module is tested against.
//!
//! The 3-D estimator produces a per-cell normal field from a filtered
//! frame, viewed face-on from the sensor (`z` is the dominant axis).
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

pub mod field;

pub use field::{estimate_normal_field, FieldParams, NormalField3};

/// Parameters for profile normal estimation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalParams {
    /// Horizontal distance between adjacent profile samples.
    pub spacing: f32,
    /// Clamp for the derivative magnitude (mm per position), suppressing
    /// spike artifacts from residual sensor noise. `None` disables.
    pub slope_limit: Option<f32>,
    /// Smooth the derivative with a 3-tap kernel before forming normals.
    pub smooth_derivative: bool,
}

impl Default for NormalParams {
    fn default() -> Self {
        Self {
            spacing: 1.0,
            slope_limit: Some(40.0),
            smooth_derivative: true,
        }
    }
}

/// Unit tangent/normal pairs along a profile.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileNormals {
    pub normals: Vec<Vector2<f32>>,
    pub tangents: Vec<Vector2<f32>>,
}

impl ProfileNormals {
    #[inline]
    pub fn len(&self) -> usize {
        self.normals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.normals.is_empty()
    }
}

/// Estimate unit tangents and normals for a dense profile.
pub fn estimate_profile_normals(values: &[f32], params: &NormalParams) -> ProfileNormals {
    let mut dz = central_gradient(values, params.spacing);
    if let Some(limit) = params.slope_limit {
        for d in &mut dz {
            *d = d.clamp(-limit, limit);
        }
    }
    if params.smooth_derivative {
        smooth3(&mut dz);
    }

    let mut normals = Vec::with_capacity(dz.len());
    let mut tangents = Vec::with_capacity(dz.len());
    for &d in &dz {
        let tangent = Vector2::new(params.spacing, d);
        let normal = Vector2::new(-d, params.spacing);
        // degenerate vectors divide by 1, never by 0
        tangents.push(tangent / tangent.norm().max(1.0));
        normals.push(normal / normal.norm().max(1.0));
    }

    ProfileNormals { normals, tangents }
}

/// Discrete derivative with central differences and one-sided stencils at
/// the ends, so the output has the same length as the input.
pub fn central_gradient(values: &[f32], spacing: f32) -> Vec<f32> {
    assert!(spacing > 0.0, "spacing must be positive");
    let n = values.len();
    let mut out = vec![0.0f32; n];
    if n < 2 {
        return out;
    }
    out[0] = (values[1] - values[0]) / spacing;
    out[n - 1] = (values[n - 1] - values[n - 2]) / spacing;
    for i in 1..n - 1 {
        out[i] = (values[i + 1] - values[i - 1]) / (2.0 * spacing);
    }
    out
}

/// 3-tap `[0.25, 0.5, 0.25]` smoothing with clamped borders.
pub(crate) fn smooth3(values: &mut Vec<f32>) {
    let n = values.len();
    if n < 3 {
        return;
    }
    let mut out = vec![0.0f32; n];
    out[0] = 0.75 * values[0] + 0.25 * values[1];
    out[n - 1] = 0.75 * values[n - 1] + 0.25 * values[n - 2];
    for i in 1..n - 1 {
        out[i] = 0.25 * values[i - 1] + 0.5 * values[i] + 0.25 * values[i + 1];
    }
    *values = out;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_profile_yields_upright_normals() {
        let values = vec![300.0f32; 64];
        let out = estimate_profile_normals(&values, &NormalParams::default());
        for (n, t) in out.normals.iter().zip(out.tangents.iter()) {
            assert!((n.x - 0.0).abs() < 1e-6);
            assert!((n.y - 1.0).abs() < 1e-6);
            assert!((t.x - 1.0).abs() < 1e-6);
            assert!((t.y - 0.0).abs() < 1e-6);
        }
    }

    #[test]
    fn ramp_profile_matches_analytic_normal() {
        let values: Vec<f32> = (0..64).map(|i| 300.0 + 0.5 * i as f32).collect();
        let out = estimate_profile_normals(&values, &NormalParams::default());
        let expected = Vector2::new(-0.5f32, 1.0).normalize();
        // skip the one-sided border stencils
        for n in &out.normals[2..62] {
            assert!((n - expected).norm() < 1e-4, "normal {n:?} != {expected:?}");
        }
    }

    #[test]
    fn normals_are_unit_and_perpendicular() {
        let values: Vec<f32> = (0..128)
            .map(|i| 300.0 + 30.0 * (i as f32 * 0.1).sin())
            .collect();
        let out = estimate_profile_normals(&values, &NormalParams::default());
        for (n, t) in out.normals.iter().zip(out.tangents.iter()) {
            assert!((n.norm() - 1.0).abs() < 1e-5);
            assert!((t.norm() - 1.0).abs() < 1e-5);
            assert!(n.dot(t).abs() < 1e-3);
        }
    }

    #[test]
    fn slope_limit_clamps_spikes() {
        let mut values = vec![300.0f32; 16];
        values[8] = 1000.0;
        let params = NormalParams {
            smooth_derivative: false,
            ..Default::default()
        };
        let out = estimate_profile_normals(&values, &params);
        // clamped slope keeps the normal away from the horizontal axis
        for n in &out.normals {
            assert!(n.y > 0.02);
        }
    }
}
