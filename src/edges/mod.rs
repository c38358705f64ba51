//! Near-field edge detection on depth frames.
//!
//! Pipeline: restrict the frame to the admissible near-field range,
//! quantize that range linearly to 8-bit intensity, compute Sobel/Scharr
//! gradients, run a Canny-style non-maximum suppression with low/high
//! hysteresis thresholds, then merge fragmented responses with a 3×3
//! morphological closing.
//!
//! Deterministic for identical input; the only failure mode is a shape
//! contract violation by the caller.
//!
//! Modules
//! - [`grad`] – 3×3 gradient kernels and magnitude.
//! - [`morph`] – binary 3×3 dilation/erosion/closing.
use crate::frame::{DepthView, FrameF32, FrameView, FrameViewMut};
use log::debug;
use serde::{Deserialize, Serialize};

pub mod grad;
pub mod morph;

pub use grad::{image_gradients, Grad, GradientKernel};

const TAN_22_5_DEG: f32 = 0.41421356237;

/// Parameters for near-field edge detection.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    /// Inclusive lower bound of the near-field range in millimeters.
    pub min_depth_mm: f32,
    /// Inclusive upper bound of the near-field range in millimeters.
    pub max_depth_mm: f32,
    /// Gradient kernel pair.
    pub kernel: GradientKernel,
    /// Weak-edge gradient magnitude threshold (8-bit intensity units).
    pub low_thresh: f32,
    /// Strong-edge gradient magnitude threshold (8-bit intensity units).
    pub high_thresh: f32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            min_depth_mm: 100.0,
            max_depth_mm: 430.0,
            kernel: GradientKernel::Sobel,
            low_thresh: 50.0,
            high_thresh: 150.0,
        }
    }
}

/// Binary edge map, same shape as the source frame. `1` marks a boundary
/// pixel after morphological closing.
#[derive(Clone, Debug)]
pub struct EdgeMap {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u8>,
}

impl EdgeMap {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        let i = y * self.w + x;
        self.data[i] = v;
    }

    /// Number of boundary pixels.
    pub fn count_edges(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

/// Detect depth discontinuities within the near-field range.
pub fn detect_edges(depth: &DepthView<'_>, params: &EdgeParams) -> EdgeMap {
    assert!(
        params.max_depth_mm > params.min_depth_mm,
        "max depth must exceed min depth"
    );
    assert!(
        params.high_thresh >= params.low_thresh,
        "high threshold below low threshold"
    );

    let intensity = quantize_near_field(depth, params.min_depth_mm, params.max_depth_mm);
    let grad = image_gradients(&intensity, params.kernel);
    let raw = threshold_with_nms(&grad, params.low_thresh, params.high_thresh);
    let closed = morph::close3x3(&raw);
    debug!(
        "detect_edges: {} edge pixels after closing ({} before)",
        closed.count_edges(),
        raw.count_edges()
    );
    closed
}

/// Map `[min, max]` depth linearly to 0–255; everything else (including
/// the zero sentinel) becomes intensity 0.
fn quantize_near_field(depth: &DepthView<'_>, min_mm: f32, max_mm: f32) -> FrameF32 {
    let span = max_mm - min_mm;
    let mut out = FrameF32::new(depth.w, depth.h);
    for y in 0..depth.h {
        let src = depth.row(y);
        let dst = out.row_mut(y);
        for (x, &mm) in src.iter().enumerate() {
            let v = mm as f32;
            if mm != 0 && v >= min_mm && v <= max_mm {
                dst[x] = ((v - min_mm) / span * 255.0).round();
            }
        }
    }
    out
}

/// Canny-style suppression: keep pixels that are local maxima along the
/// quantized gradient direction, classify them weak/strong against the
/// two thresholds, then link weak pixels 8-connected to a strong one.
fn threshold_with_nms(grad: &Grad, low: f32, high: f32) -> EdgeMap {
    let w = grad.mag.w;
    let h = grad.mag.h;
    let mut map = EdgeMap::new(w, h);
    if w < 3 || h < 3 {
        return map;
    }

    const NONE: u8 = 0;
    const WEAK: u8 = 1;
    const STRONG: u8 = 2;

    let mut class = vec![NONE; w * h];
    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag < low {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            let (neighbor1, neighbor2) = if abs_gx >= abs_gy {
                if abs_gy <= abs_gx * TAN_22_5_DEG {
                    (mag_row[x - 1], mag_row[x + 1])
                } else if same_sign {
                    (mag_prev[x + 1], mag_next[x - 1])
                } else {
                    (mag_prev[x - 1], mag_next[x + 1])
                }
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x + 1], mag_next[x - 1])
            } else {
                (mag_prev[x - 1], mag_next[x + 1])
            };

            if mag <= neighbor1 || mag <= neighbor2 {
                continue;
            }

            class[y * w + x] = if mag >= high { STRONG } else { WEAK };
        }
    }

    // hysteresis: flood from strong pixels through 8-connected weak ones
    let mut stack: Vec<(usize, usize)> = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if class[y * w + x] == STRONG {
                map.set(x, y, 1);
                stack.push((x, y));
            }
        }
    }
    while let Some((x, y)) = stack.pop() {
        for dy in -1isize..=1 {
            let ny = y as isize + dy;
            if ny < 0 || ny >= h as isize {
                continue;
            }
            for dx in -1isize..=1 {
                let nx = x as isize + dx;
                if nx < 0 || nx >= w as isize {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);
                if class[ny * w + nx] == WEAK && map.get(nx, ny) == 0 {
                    map.set(nx, ny, 1);
                    stack.push((nx, ny));
                }
            }
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::DepthFrame;

    fn step_frame(w: usize, h: usize, split: usize, near: u16, far: u16) -> DepthFrame {
        let mut frame = DepthFrame::new(w, h);
        for y in 0..h {
            for x in 0..w {
                frame.set(x, y, if x < split { far } else { near });
            }
        }
        frame
    }

    #[test]
    fn depth_step_produces_a_vertical_edge() {
        let frame = step_frame(64, 48, 32, 150, 400);
        let edges = detect_edges(&frame.as_view(), &EdgeParams::default());

        assert_eq!(edges.w, 64);
        assert_eq!(edges.h, 48);
        assert!(edges.count_edges() > 0, "step should produce edge pixels");
        // edge pixels concentrate around the discontinuity
        let near_split = (28..=36)
            .flat_map(|x| (1..47).map(move |y| (x, y)))
            .filter(|&(x, y)| edges.get(x, y) != 0)
            .count();
        assert!(near_split > 0);
        for y in 4..44 {
            for x in 0..20 {
                assert_eq!(edges.get(x, y), 0, "flat region marked at ({x},{y})");
            }
        }
    }

    #[test]
    fn out_of_range_content_yields_no_edges() {
        // everything beyond the near field quantizes to zero intensity
        let frame = step_frame(32, 32, 16, 900, 2000);
        let edges = detect_edges(&frame.as_view(), &EdgeParams::default());
        assert_eq!(edges.count_edges(), 0);
    }

    #[test]
    fn detection_is_deterministic() {
        let frame = step_frame(48, 40, 20, 200, 380);
        let a = detect_edges(&frame.as_view(), &EdgeParams::default());
        let b = detect_edges(&frame.as_view(), &EdgeParams::default());
        assert_eq!(a.data, b.data);
    }
}
