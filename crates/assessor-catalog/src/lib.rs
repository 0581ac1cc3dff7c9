//! # assessor-catalog
//!
//! TOML-driven task definitions for the assessor harness.
//!
//! ## Overview
//!
//! This crate provides [`TaskCatalog`], which parses `TaskDefinition`s from
//! TOML strings, files, or a directory, validates each one, and looks them
//! up by id. Every configuration problem surfaces as
//! `AssessorError::ConfigError` before a grader is ever built.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use assessor_catalog::TaskCatalog;
//!
//! let catalog = TaskCatalog::from_dir(Path::new("tasks"))?;
//! let task = catalog.get("license-compliance-check")?;
//! ```

pub mod catalog;
pub mod validate;

pub use catalog::TaskCatalog;
pub use validate::validate;
