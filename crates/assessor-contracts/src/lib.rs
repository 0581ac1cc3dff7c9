//! # assessor-contracts
//!
//! Shared types, task definitions, and contracts for the assessor grading
//! harness.
//!
//! All crates in the workspace import from here. No grading logic lives in
//! this crate, only data definitions and error types.

pub mod error;
pub mod record;
pub mod snippet;
pub mod task;
pub mod transcript;
pub mod verdict;
