//! Grader wiring for the reference tasks.
//!
//! A `Bench` pairs a task catalog with a snippet runtime and hands out fully
//! configured graders: a `FieldVerifier` carrying the reference custom rules,
//! and every reference task-level check registered by name.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use assessor_catalog::TaskCatalog;
use assessor_contracts::{error::AssessorResult, verdict::Verdict};
use assessor_core::{traits::SnippetRuntime, Grader};
use assessor_verify::FieldVerifier;

use crate::round_trip::{RoundTripCheck, SINGLE_SYMBOL_ROUND_TRIP};
use crate::{strategies, tasks};

pub struct Bench {
    catalog: TaskCatalog,
    runtime: Arc<dyn SnippetRuntime>,
}

impl Bench {
    pub fn new(catalog: TaskCatalog, runtime: Arc<dyn SnippetRuntime>) -> Self {
        Self { catalog, runtime }
    }

    /// A bench over the embedded reference task definitions.
    pub fn builtin(runtime: Arc<dyn SnippetRuntime>) -> AssessorResult<Self> {
        Ok(Self::new(tasks::builtin_catalog()?, runtime))
    }

    pub fn catalog(&self) -> &TaskCatalog {
        &self.catalog
    }

    /// Build a grader for `task_id`.
    ///
    /// Returns `AssessorError::UnknownTask` if the catalog has no such task.
    pub fn grader(&self, task_id: &str) -> AssessorResult<Grader> {
        let task = self.catalog.get(task_id)?.clone();

        let mut verifier = FieldVerifier::new();
        strategies::register_all(&mut verifier);

        let mut grader = Grader::new(task, Box::new(verifier))?;
        let round_trip = RoundTripCheck::new(Arc::clone(&self.runtime))?;
        grader.register_check(SINGLE_SYMBOL_ROUND_TRIP, round_trip.into_check());

        debug!(task_id, "grader built");
        Ok(grader)
    }

    /// Grade one raw result record against `task_id`.
    pub fn grade(&self, task_id: &str, record: &Value) -> AssessorResult<Verdict> {
        Ok(self.grader(task_id)?.grade(record))
    }
}
