use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CheckError, Result};

/// Candidate may be at most this many times the reference length.
pub const DEFAULT_LENGTH_TOLERANCE: f64 = 1.1;

/// Length bound: a candidate passes when its character count does not
/// exceed `max_ratio` times the reference's character count.
///
/// Lengths count Unicode scalar values, not bytes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLengthBound")]
pub struct LengthBound {
    pub max_ratio: f64,
}

#[derive(Deserialize)]
struct RawLengthBound {
    max_ratio: f64,
}

impl TryFrom<RawLengthBound> for LengthBound {
    type Error = CheckError;

    fn try_from(raw: RawLengthBound) -> Result<Self> {
        LengthBound::new(raw.max_ratio)
    }
}

impl Default for LengthBound {
    fn default() -> Self {
        Self {
            max_ratio: DEFAULT_LENGTH_TOLERANCE,
        }
    }
}

impl LengthBound {
    /// Create a bound with a custom tolerance.
    pub fn new(max_ratio: f64) -> Result<Self> {
        if !max_ratio.is_finite() || max_ratio < 0.0 {
            return Err(CheckError::InvalidTolerance(max_ratio));
        }
        Ok(Self { max_ratio })
    }

    /// Maximum allowed candidate length for a reference of `reference_len` chars.
    pub fn limit(&self, reference_len: usize) -> f64 {
        reference_len as f64 * self.max_ratio
    }

    /// Check a candidate against a reference.
    pub fn check(&self, candidate: &str, reference: &str) -> bool {
        let candidate_len = candidate.chars().count();
        let reference_len = reference.chars().count();
        let limit = self.limit(reference_len);
        let within = candidate_len as f64 <= limit;

        debug!(
            candidate_len,
            reference_len,
            limit,
            within,
            "length bound evaluated"
        );
        within
    }
}

/// Whether `candidate` is no longer than 110% of `reference`, in characters.
///
/// An empty reference gives a limit of zero, so only an empty candidate passes.
pub fn evaluate_length_bound(candidate: &str, reference: &str) -> bool {
    LengthBound::default().check(candidate, reference)
}
