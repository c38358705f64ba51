//! Range thresholding of depth frames into a float frame plus validity mask.
use super::bilateral::{self, BilateralParams};
use crate::frame::{DepthView, FrameF32, FrameMask, FrameView, FrameViewMut};
use log::debug;
use serde::{Deserialize, Serialize};

/// Parameters for the admissible-range filter.
///
/// Defaults cover the wide acquisition range of the stereo unit
/// (100–10000 mm); use [`RangeFilterParams::near_field`] for close-up
/// inspection work.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeFilterParams {
    /// Inclusive lower bound in millimeters.
    pub min_depth_mm: f32,
    /// Inclusive upper bound in millimeters.
    pub max_depth_mm: f32,
    /// Enables the bilateral smoothing pass over valid samples.
    pub smooth: bool,
    /// Minimum number of valid samples required before smoothing runs.
    pub min_valid_for_smoothing: usize,
    /// Bilateral pass configuration.
    pub bilateral: BilateralParams,
}

impl Default for RangeFilterParams {
    fn default() -> Self {
        Self {
            min_depth_mm: 100.0,
            max_depth_mm: 10000.0,
            smooth: true,
            min_valid_for_smoothing: 100,
            bilateral: BilateralParams::default(),
        }
    }
}

impl RangeFilterParams {
    /// Preset for near-field surface work (100–430 mm).
    pub fn near_field() -> Self {
        Self {
            max_depth_mm: 430.0,
            ..Self::default()
        }
    }
}

/// Depth frame after range filtering: float millimeters plus validity.
///
/// Invalid cells hold `0.0` so consumers that ignore the mask observe the
/// zero sentinel; consumers that care consult [`FrameMask`].
#[derive(Clone, Debug)]
pub struct FilteredFrame {
    pub depth: FrameF32,
    pub valid: FrameMask,
}

impl FilteredFrame {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            depth: FrameF32::new(w, h),
            valid: FrameMask::new(w, h),
        }
    }

    /// Resize and clear for reuse across frames.
    pub fn reset(&mut self, w: usize, h: usize) {
        self.depth.reset(w, h);
        self.valid.reset(w, h);
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.depth.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.depth.h
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.depth.get(x, y)
    }

    #[inline]
    pub fn is_valid(&self, x: usize, y: usize) -> bool {
        self.valid.get(x, y)
    }

    pub fn valid_count(&self) -> usize {
        self.valid.count_valid()
    }
}

/// Filter a depth view against `[min, max]`, allocating the output.
pub fn filter_range(depth: &DepthView<'_>, params: &RangeFilterParams) -> FilteredFrame {
    let mut out = FilteredFrame::new(depth.w, depth.h);
    filter_range_into(depth, params, &mut out);
    out
}

/// Filter a depth view against `[min, max]` into a reusable output frame.
///
/// Samples equal to zero or outside the interval become invalid. When
/// `smooth` is set and enough valid samples survive, the bilateral pass
/// runs over them; otherwise the thresholded result is returned as-is.
pub fn filter_range_into(
    depth: &DepthView<'_>,
    params: &RangeFilterParams,
    out: &mut FilteredFrame,
) {
    assert!(
        params.max_depth_mm > params.min_depth_mm,
        "max depth must exceed min depth"
    );
    out.reset(depth.w, depth.h);

    let mut valid_count = 0usize;
    for y in 0..depth.h {
        let src = depth.row(y);
        let dst = out.depth.row_mut(y);
        let mask_start = y * depth.w;
        for (x, &mm) in src.iter().enumerate() {
            let v = mm as f32;
            if mm != 0 && v >= params.min_depth_mm && v <= params.max_depth_mm {
                dst[x] = v;
                out.valid.data[mask_start + x] = true;
                valid_count += 1;
            }
            // invalid cells stay 0.0 / false from reset
        }
    }

    if params.smooth && valid_count >= params.min_valid_for_smoothing {
        bilateral::smooth_valid(out, &params.bilateral);
        debug!(
            "filter_range: smoothed {} valid samples of {}",
            valid_count,
            depth.w * depth.h
        );
    } else {
        debug!(
            "filter_range: {} valid samples of {} (smoothing {})",
            valid_count,
            depth.w * depth.h,
            if params.smooth { "skipped" } else { "off" }
        );
    }
}
