//! # text-ratio-check
//!
//! Evaluation checks that compare a model's output (the *candidate*) with a
//! *reference* text from a scenario by character-length ratios.
//!
//! ## Checks
//!
//! - **Length bound** ([`evaluate_length_bound`]): passes when the candidate is
//!   no longer than 110% of the scenario's expected result.
//! - **Compression ratio** ([`evaluate_ratio`]): non-whitespace characters of
//!   the candidate divided by those of the scenario input, `0.0` when the
//!   input has none.
//!
//! Both are pure functions. [`CheckKind`] selects one by value behind the
//! [`TextCheck`] capability, [`EvaluationReport`] aggregates scores over many
//! [`ScenarioRow`]s, and [`ChecksConfig`] loads the selection and thresholds
//! from TOML.
//!
//! ## Example
//!
//! ```rust
//! use text_ratio_check::{evaluate_length_bound, evaluate_ratio};
//!
//! assert!(evaluate_length_bound("Billing", "Technical Support"));
//! assert_eq!(evaluate_ratio("a b c", "abc"), 1.0);
//! ```

#![deny(unsafe_code)]

pub mod check;
pub mod config;
pub mod error;
pub mod length;
pub mod ratio;
pub mod report;

pub use check::{
    evaluate_row, CheckDescriptor, CheckKind, CheckValue, OutputDataType, ScenarioRow, TextCheck,
    COMPRESSION_RATIO, LENGTH_BOUND,
};
pub use config::ChecksConfig;
pub use error::{CheckError, Result};
pub use length::{evaluate_length_bound, LengthBound, DEFAULT_LENGTH_TOLERANCE};
pub use ratio::{evaluate_ratio, non_whitespace_len, strip_whitespace};
pub use report::{
    Assessment, EvaluationReport, ReportThresholds, RowScores, ThresholdFailure, ThresholdKind,
};
