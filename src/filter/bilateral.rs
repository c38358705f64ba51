//! Validity-aware bilateral smoothing over filtered depth.
//!
//! Classic bilateral weighting (spatial Gaussian × range Gaussian) with one
//! twist: invalid neighbors contribute nothing and invalid cells are never
//! written, so the "no measurement" sentinel survives the pass untouched
//! and depth discontinuities keep their edges.
use super::range::FilteredFrame;
use serde::{Deserialize, Serialize};

/// Bilateral pass configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BilateralParams {
    /// Half-width of the square neighborhood in pixels.
    pub radius: usize,
    /// Spatial standard deviation in pixels.
    pub sigma_space: f32,
    /// Range standard deviation in millimeters.
    pub sigma_range_mm: f32,
}

impl Default for BilateralParams {
    fn default() -> Self {
        Self {
            radius: 2,
            sigma_space: 2.0,
            sigma_range_mm: 30.0,
        }
    }
}

/// Smooth valid samples in place. Invalid cells keep their zero sentinel.
pub fn smooth_valid(frame: &mut FilteredFrame, params: &BilateralParams) {
    let w = frame.width();
    let h = frame.height();
    if w == 0 || h == 0 {
        return;
    }

    let r = params.radius as isize;
    let spatial = spatial_kernel(params.radius, params.sigma_space);
    let inv_2sr2 = 1.0 / (2.0 * params.sigma_range_mm * params.sigma_range_mm);

    let mut smoothed = vec![0.0f32; w * h];
    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            if !frame.valid.data[idx] {
                continue;
            }
            let center = frame.depth.data[idx];

            let mut acc = 0.0f32;
            let mut weight_sum = 0.0f32;
            for dy in -r..=r {
                let ny = y as isize + dy;
                if ny < 0 || ny >= h as isize {
                    continue;
                }
                for dx in -r..=r {
                    let nx = x as isize + dx;
                    if nx < 0 || nx >= w as isize {
                        continue;
                    }
                    let nidx = ny as usize * w + nx as usize;
                    if !frame.valid.data[nidx] {
                        continue;
                    }
                    let v = frame.depth.data[nidx];
                    let dz = v - center;
                    let kw = spatial
                        [((dy + r) as usize) * (2 * params.radius + 1) + (dx + r) as usize]
                        * (-dz * dz * inv_2sr2).exp();
                    acc += kw * v;
                    weight_sum += kw;
                }
            }
            // the center sample always contributes, so weight_sum > 0
            smoothed[idx] = acc / weight_sum;
        }
    }

    for (idx, &valid) in frame.valid.data.iter().enumerate() {
        if valid {
            frame.depth.data[idx] = smoothed[idx];
        }
    }
}

fn spatial_kernel(radius: usize, sigma: f32) -> Vec<f32> {
    let size = 2 * radius + 1;
    let inv_2s2 = 1.0 / (2.0 * sigma * sigma);
    let mut taps = vec![0.0f32; size * size];
    for dy in 0..size {
        for dx in 0..size {
            let fy = dy as f32 - radius as f32;
            let fx = dx as f32 - radius as f32;
            taps[dy * size + dx] = (-(fx * fx + fy * fy) * inv_2s2).exp();
        }
    }
    taps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter_range, RangeFilterParams};
    use crate::frame::DepthFrame;

    #[test]
    fn invalid_cells_survive_smoothing_as_zero() {
        let mut frame = DepthFrame::new(20, 20);
        for y in 0..20 {
            for x in 0..20 {
                frame.set(x, y, 300);
            }
        }
        frame.set(10, 10, 0);

        let params = RangeFilterParams {
            min_valid_for_smoothing: 10,
            ..Default::default()
        };
        let out = filter_range(&frame.as_view(), &params);
        assert!(!out.is_valid(10, 10));
        assert_eq!(out.get(10, 10), 0.0);
        assert!((out.get(5, 5) - 300.0).abs() < 1e-3);
    }

    #[test]
    fn flat_surface_is_unchanged() {
        let mut frame = FilteredFrame::new(8, 8);
        for idx in 0..64 {
            frame.depth.data[idx] = 250.0;
            frame.valid.data[idx] = true;
        }
        smooth_valid(&mut frame, &BilateralParams::default());
        for idx in 0..64 {
            assert!((frame.depth.data[idx] - 250.0).abs() < 1e-4);
        }
    }
}
