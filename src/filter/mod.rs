//! Admissible-range validation of raw depth frames.
//!
//! The range filter is the first pipeline stage: every sample outside the
//! configured `[min, max]` interval (and every zero "no measurement"
//! sample) becomes invalid, observably zero. Optionally an edge-preserving
//! bilateral pass smooths the surviving samples, leaving invalid cells
//! untouched.
//!
//! Modules
//! - [`range`] – parameters, [`FilteredFrame`] and the thresholding pass.
//! - [`bilateral`] – the validity-aware bilateral smoothing pass.

pub mod bilateral;
pub mod range;

pub use bilateral::BilateralParams;
pub use range::{filter_range, filter_range_into, FilteredFrame, RangeFilterParams};
