use core::fmt;

/// Recoverable "not enough valid samples" outcome of profile extraction.
///
/// This is an expected condition under sensor noise, not a defect: the
/// caller skips the frame and keeps the previous result on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientData {
    /// Valid samples observed.
    pub valid: usize,
    /// Samples required to proceed.
    pub required: usize,
}

impl fmt::Display for InsufficientData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "insufficient valid samples: {} of {} required",
            self.valid, self.required
        )
    }
}

impl std::error::Error for InsufficientData {}
