//! # assessor-verify
//!
//! Field comparison for the assessor harness.
//!
//! This crate provides [`engine::FieldVerifier`], which implements the
//! [`assessor_core::traits::Comparator`] trait. Every `FieldRule` variant has
//! a built-in comparison (exact, normalized, alias, identifier, numeric with
//! tolerance, normalized set); `Custom` rules delegate to functions the task
//! adapter registers by name.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use assessor_verify::engine::FieldVerifier;
//!
//! let mut verifier = FieldVerifier::new();
//! verifier.register_rule("non-empty", Box::new(|got, _expected| {
//!     got.and_then(|v| v.as_str()).is_some_and(|s| !s.is_empty())
//! }));
//! ```

pub mod engine;
pub mod normalize;

pub use engine::{CustomRuleFn, FieldVerifier};
