//! # Errors
//!
//! The engine is presentation-only, so almost every failure is non-fatal.
//! `MissingElement`, `InvalidSectionIndex` and `TransitionInterrupted` are
//! logged and turned into no-ops at the public boundary; only setup paths
//! (configuration, layout) hand a `MotionError` back to the caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("section index {index} is out of range (registered sections: {count})")]
    InvalidSectionIndex { index: usize, count: usize },

    #[error("element handle `{0}` is absent")]
    MissingElement(String),

    #[error("transition interrupted by a newer request")]
    TransitionInterrupted,

    #[error("invalid color literal `{0}`")]
    InvalidColor(String),

    #[error("layout failed: {0}")]
    Layout(String),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MotionError>;
