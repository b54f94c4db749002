//! Per-client submission throttling.

mod submission_limiter;

pub use submission_limiter::{
    SubmissionLimiter, DEFAULT_SUBMISSION_CEILING, DEFAULT_SUBMISSION_WINDOW,
};
