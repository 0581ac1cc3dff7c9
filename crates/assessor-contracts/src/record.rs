//! The result record handed over by the upstream executor.

use crate::transcript::Transcript;

/// Status value the executor reports for a run that completed.
pub const SUCCESS_STATUS: &str = "success";

/// A result record with explicit defaults for every optional key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRecord {
    /// Executor status; `None` when missing or not a string.
    pub status: Option<String>,
    /// Direct final result, if the executor captured one.
    pub task_result: Option<String>,
    /// Conversation history; empty when missing.
    pub transcript: Transcript,
}

impl ResultRecord {
    /// True only when the executor reported the success sentinel.
    pub fn task_completed(&self) -> bool {
        self.status.as_deref() == Some(SUCCESS_STATUS)
    }
}

/// Outcome of validating a raw record at the grading boundary.
///
/// A malformed record is still graded with defaults filling the gaps, but it can
/// never pass.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordIntake {
    WellFormed(ResultRecord),
    Malformed {
        record: ResultRecord,
        /// One message per shape violation, in validation order.
        issues: Vec<String>,
    },
}

impl RecordIntake {
    pub fn record(&self) -> &ResultRecord {
        match self {
            RecordIntake::WellFormed(record) => record,
            RecordIntake::Malformed { record, .. } => record,
        }
    }

    pub fn issues(&self) -> &[String] {
        match self {
            RecordIntake::WellFormed(_) => &[],
            RecordIntake::Malformed { issues, .. } => issues,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        matches!(self, RecordIntake::WellFormed(_))
    }
}
