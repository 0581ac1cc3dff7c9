//! Error types for the assessor harness.
//!
//! Grading itself never fails: every grading invocation yields a `Verdict`.
//! These errors cover the surrounding plumbing: loading task definitions
//! and driving the snippet interpreter.

use thiserror::Error;

/// The unified error type for the assessor crates.
#[derive(Debug, Error)]
pub enum AssessorError {
    /// A task definition or other configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// No task with the requested id is loaded.
    #[error("unknown task '{task_id}'")]
    UnknownTask { task_id: String },

    /// Two task definitions share the same id.
    #[error("duplicate task id '{task_id}'")]
    DuplicateTask { task_id: String },

    /// The snippet interpreter could not be started or fed its request.
    #[error("snippet runtime unavailable: {reason}")]
    RuntimeUnavailable { reason: String },

    /// The snippet interpreter ran but its reply did not follow the protocol.
    #[error("snippet runtime protocol error: {reason}")]
    RuntimeProtocol { reason: String },
}

/// Convenience alias used throughout the assessor crates.
pub type AssessorResult<T> = Result<T, AssessorError>;
