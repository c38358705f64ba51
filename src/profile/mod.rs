//! Stabilized 1-D depth profile extraction.
//!
//! A profile is a single-line slice of a depth frame used as a 2-D surface
//! proxy. Extraction walks a band of `window_size` lines centered on the
//! requested line, reduces the band to one value per position via the
//! median of the valid samples, interpolates the remaining gaps linearly
//! and smooths the dense result with a Gaussian kernel.
//!
//! Order note: interpolation runs before smoothing, so the kernel never has
//! to reason about validity and gap boundaries are not smeared
//! asymmetrically.
//!
//! Too few valid positions yield [`InsufficientData`], the expected
//! outcome on badly degraded frames; the caller skips the frame.
use crate::error::InsufficientData;
use crate::filter::FilteredFrame;
use log::debug;
use serde::{Deserialize, Serialize};

pub mod interp;
pub mod smooth;

/// Scan direction of the extracted profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileAxis {
    /// One value per column along a horizontal band (default).
    Row,
    /// One value per row along a vertical band.
    Column,
}

/// Parameters controlling profile extraction.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileParams {
    pub axis: ProfileAxis,
    /// Row (or column) index the band is centered on.
    pub line_index: usize,
    /// Number of lines aggregated per position; clipped at frame borders.
    pub window_size: usize,
    /// Valid positions required before interpolation may run.
    pub min_valid: usize,
    /// Valid positions required by the post-reduction readiness check.
    pub min_valid_post: usize,
    /// Standard deviation of the final Gaussian smoothing, in positions.
    pub smooth_sigma: f32,
}

impl Default for ProfileParams {
    fn default() -> Self {
        Self {
            axis: ProfileAxis::Row,
            line_index: 240,
            window_size: 7,
            min_valid: 20,
            min_valid_post: 10,
            smooth_sigma: 1.2,
        }
    }
}

/// Dense depth profile produced by a successful extraction.
///
/// `values` has one finite entry per position; `valid_count` and
/// `interpolated` record how much of it was measured versus filled in.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub values: Vec<f32>,
    pub axis: ProfileAxis,
    pub line_index: usize,
    pub window_size: usize,
    /// Positions with at least one valid band sample before interpolation.
    pub valid_count: usize,
    /// Positions filled by interpolation.
    pub interpolated: usize,
}

impl Profile {
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Extract a stabilized profile from a filtered frame.
///
/// Fails with [`InsufficientData`] when fewer than `min_valid` positions
/// carry a valid band median (or fewer than `min_valid_post` survive the
/// readiness check). The frame is not mutated.
pub fn extract_profile(
    frame: &FilteredFrame,
    params: &ProfileParams,
) -> Result<Profile, InsufficientData> {
    let (positions, band_len) = match params.axis {
        ProfileAxis::Row => (frame.width(), frame.height()),
        ProfileAxis::Column => (frame.height(), frame.width()),
    };
    assert!(
        params.line_index < band_len,
        "line index out of frame bounds"
    );
    assert!(params.window_size >= 1, "window size must be positive");

    let half = params.window_size / 2;
    let band_start = params.line_index.saturating_sub(half);
    let band_end = (params.line_index + half + 1).min(band_len);

    let mut values = vec![0.0f32; positions];
    let mut valid = vec![false; positions];
    let mut scratch: Vec<f32> = Vec::with_capacity(band_end - band_start);

    let mut valid_count = 0usize;
    for pos in 0..positions {
        scratch.clear();
        for line in band_start..band_end {
            let (x, y) = match params.axis {
                ProfileAxis::Row => (pos, line),
                ProfileAxis::Column => (line, pos),
            };
            if frame.is_valid(x, y) {
                scratch.push(frame.get(x, y));
            }
        }
        if let Some(median) = median_in_place(&mut scratch) {
            values[pos] = median;
            valid[pos] = true;
            valid_count += 1;
        }
    }

    if valid_count <= params.min_valid {
        debug!(
            "extract_profile: {} valid of {} positions, need more than {}",
            valid_count, positions, params.min_valid
        );
        return Err(InsufficientData {
            valid: valid_count,
            required: params.min_valid + 1,
        });
    }
    if valid_count < params.min_valid_post {
        return Err(InsufficientData {
            valid: valid_count,
            required: params.min_valid_post,
        });
    }

    let interpolated = interp::interpolate_gaps(&mut values, &valid);
    smooth::gaussian_smooth(&mut values, params.smooth_sigma);

    debug!(
        "extract_profile: line {} band {}..{} -> {} positions ({} interpolated)",
        params.line_index, band_start, band_end, positions, interpolated
    );

    Ok(Profile {
        values,
        axis: params.axis,
        line_index: params.line_index,
        window_size: params.window_size,
        valid_count,
        interpolated,
    })
}

/// Median of the buffer, averaging the two central elements for even
/// lengths. Returns `None` on an empty buffer. Reorders the buffer.
fn median_in_place(samples: &mut [f32]) -> Option<f32> {
    if samples.is_empty() {
        return None;
    }
    samples.sort_by(|a, b| a.partial_cmp(b).expect("finite compare"));
    let n = samples.len();
    if n % 2 == 1 {
        Some(samples[n / 2])
    } else {
        Some(0.5 * (samples[n / 2 - 1] + samples[n / 2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_odd_and_even_counts() {
        let mut odd = vec![3.0, 1.0, 2.0];
        assert_eq!(median_in_place(&mut odd), Some(2.0));
        let mut even = vec![4.0, 1.0, 3.0, 2.0];
        assert_eq!(median_in_place(&mut even), Some(2.5));
        let mut empty: Vec<f32> = Vec::new();
        assert_eq!(median_in_place(&mut empty), None);
    }
}
