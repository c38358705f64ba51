//! Full-frame 3-D normal field.
//!
//! For each valid cell the field holds the unit vector
//! `normalize(-gx, -gy, 1)` built from clipped per-axis central
//! differences. Cells whose stencil touches invalid depth stay invalid,
//! the explicit-mask equivalent of a propagating NaN normal.
use crate::filter::FilteredFrame;
use crate::frame::FrameMask;
use nalgebra::Vector3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Parameters for the 3-D normal field.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    /// Per-axis gradient clip in millimeters per pixel.
    pub grad_limit: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self { grad_limit: 50.0 }
    }
}

/// Per-cell unit normals with validity, same shape as the source frame.
#[derive(Clone, Debug)]
pub struct NormalField3 {
    pub w: usize,
    pub h: usize,
    /// Row-major unit vectors; invalid cells hold the zero vector.
    pub vectors: Vec<Vector3<f32>>,
    pub valid: FrameMask,
}

impl NormalField3 {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Vector3<f32>> {
        self.valid.get(x, y).then(|| self.vectors[y * self.w + x])
    }

    pub fn valid_count(&self) -> usize {
        self.valid.count_valid()
    }
}

/// Estimate the normal field of a filtered frame. Rows are processed in
/// parallel; the result is deterministic regardless of thread count.
pub fn estimate_normal_field(frame: &FilteredFrame, params: &FieldParams) -> NormalField3 {
    let w = frame.width();
    let h = frame.height();
    let limit = params.grad_limit;

    let mut vectors = vec![Vector3::new(0.0f32, 0.0, 0.0); w * h];
    let mut valid = vec![false; w * h];

    vectors
        .par_chunks_mut(w.max(1))
        .zip(valid.par_chunks_mut(w.max(1)))
        .enumerate()
        .for_each(|(y, (vec_row, mask_row))| {
            for x in 0..w {
                if !frame.is_valid(x, y) {
                    continue;
                }
                let xm = x.saturating_sub(1);
                let xp = (x + 1).min(w - 1);
                let ym = y.saturating_sub(1);
                let yp = (y + 1).min(h - 1);
                if !frame.is_valid(xm, y)
                    || !frame.is_valid(xp, y)
                    || !frame.is_valid(x, ym)
                    || !frame.is_valid(x, yp)
                {
                    continue;
                }

                let gx = (frame.get(xp, y) - frame.get(xm, y)) / (xp - xm).max(1) as f32;
                let gy = (frame.get(x, yp) - frame.get(x, ym)) / (yp - ym).max(1) as f32;
                let gx = gx.clamp(-limit, limit);
                let gy = gy.clamp(-limit, limit);

                let v = Vector3::new(-gx, -gy, 1.0);
                vec_row[x] = v / v.norm().max(1.0);
                mask_row[x] = true;
            }
        });

    NormalField3 {
        w,
        h,
        vectors,
        valid: FrameMask { w, h, data: valid },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter_range, RangeFilterParams};
    use crate::frame::DepthFrame;

    fn flat_filtered(w: usize, h: usize, mm: u16) -> FilteredFrame {
        let mut frame = DepthFrame::new(w, h);
        for y in 0..h {
            for x in 0..w {
                frame.set(x, y, mm);
            }
        }
        let params = RangeFilterParams {
            smooth: false,
            ..Default::default()
        };
        filter_range(&frame.as_view(), &params)
    }

    #[test]
    fn flat_frame_points_at_sensor() {
        let filtered = flat_filtered(16, 12, 300);
        let field = estimate_normal_field(&filtered, &FieldParams::default());
        assert_eq!(field.valid_count(), 16 * 12);
        for y in 0..12 {
            for x in 0..16 {
                let n = field.get(x, y).expect("valid cell");
                assert!((n - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-5);
            }
        }
    }

    #[test]
    fn invalid_depth_propagates_to_field() {
        let mut frame = DepthFrame::new(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                frame.set(x, y, 300);
            }
        }
        frame.set(4, 4, 0);
        let params = RangeFilterParams {
            smooth: false,
            ..Default::default()
        };
        let filtered = filter_range(&frame.as_view(), &params);
        let field = estimate_normal_field(&filtered, &FieldParams::default());

        assert!(field.get(4, 4).is_none());
        // stencil neighbors of the hole are invalid too
        assert!(field.get(3, 4).is_none());
        assert!(field.get(4, 3).is_none());
        assert!(field.get(2, 2).is_some());
    }

    #[test]
    fn field_vectors_are_unit() {
        let mut frame = DepthFrame::new(32, 24);
        for y in 0..24 {
            for x in 0..32 {
                let z = 300.0 + 20.0 * ((x as f32) * 0.3).sin() + 2.0 * y as f32;
                frame.set(x, y, z as u16);
            }
        }
        let params = RangeFilterParams {
            smooth: false,
            ..Default::default()
        };
        let filtered = filter_range(&frame.as_view(), &params);
        let field = estimate_normal_field(&filtered, &FieldParams::default());
        for y in 0..24 {
            for x in 0..32 {
                if let Some(n) = field.get(x, y) {
                    assert!((n.norm() - 1.0).abs() < 1e-5);
                }
            }
        }
    }
}
