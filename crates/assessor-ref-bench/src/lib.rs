//! # assessor-ref-bench
//!
//! Reference benchmark tasks graded with the assessor harness.
//!
//! Ships three task definitions as embedded TOML:
//!
//! 1. **academic-citation-analysis** — JSON answer with an author alias, a
//!    yes/no relationship, and two reference counts with tolerances.
//! 2. **license-compliance-check** — JSON answer with package counts, a
//!    normalized package set, identifier equality, and a custom license rule.
//! 3. **minimum-comm** — tagged integer answer plus encode/decode routines
//!    verified by a single-symbol round trip in a Python interpreter.
//!
//! [`Bench`] wires the definitions to graders; [`PythonRuntime`] executes the
//! submitted routines.

pub mod bench;
pub mod round_trip;
pub mod runtime;
pub mod strategies;
pub mod tasks;

#[cfg(test)]
mod fixtures;

pub use bench::Bench;
pub use runtime::{PythonRuntime, PythonSettings};
pub use tasks::builtin_catalog;
