//! Reusable buffers amortizing allocations across frames.
use crate::filter::FilteredFrame;

/// Workspace owned by the analyzer; the filtered frame is by far the
/// largest allocation of a pipeline pass, so it is kept across frames and
/// resized on demand.
pub struct AnalyzerWorkspace {
    pub filtered: FilteredFrame,
}

impl AnalyzerWorkspace {
    pub fn new() -> Self {
        Self {
            filtered: FilteredFrame::new(0, 0),
        }
    }
}

impl Default for AnalyzerWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
