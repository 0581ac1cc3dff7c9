//! # assessor-core
//!
//! The grading pipeline for the assessor harness.
//!
//! This crate provides:
//! - The two seam traits (`Comparator`, `SnippetRuntime`)
//! - Boundary validation of raw result records (`RecordIntaker`)
//! - The report assembler that folds itemized checks into a `Verdict`
//! - The `Grader` that wires resolution, parsing, comparison, and task-level
//!   checks together in a fixed order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use assessor_core::{Grader, traits::Comparator};
//!
//! let grader = Grader::new(task, Box::new(my_comparator))?;
//! let verdict = grader.grade(&record);
//! ```

pub mod grader;
pub mod intake;
pub mod report;
pub mod traits;

pub use grader::{CustomCheckFn, Grader};
pub use intake::RecordIntaker;
