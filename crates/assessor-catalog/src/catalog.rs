//! The task catalog: validated task definitions keyed by id.
//!
//! Definitions are TOML documents, one task per document:
//!
//! ```toml
//! id = "academic-citation-analysis"
//! format = "json"
//!
//! [locator]
//! tag = "answer"
//!
//! [[fields]]
//! name = "common_references_count"
//! expected = 7
//! rule = { kind = "numeric", tolerance = 2.0 }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use assessor_contracts::{
    error::{AssessorError, AssessorResult},
    task::TaskDefinition,
};

use crate::validate::validate;

/// Extension of task definition files picked up by `from_dir`.
const DEFINITION_EXTENSION: &str = "toml";

/// Validated task definitions, iterated in id order.
#[derive(Debug, Clone, Default)]
pub struct TaskCatalog {
    tasks: BTreeMap<String, TaskDefinition>,
}

impl TaskCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate one TOML task definition.
    ///
    /// Returns `AssessorError::ConfigError` if the TOML is malformed, does
    /// not match the `TaskDefinition` schema, or fails validation.
    pub fn parse_definition(s: &str) -> AssessorResult<TaskDefinition> {
        let task: TaskDefinition = toml::from_str(s).map_err(|e| AssessorError::ConfigError {
            reason: format!("failed to parse task TOML: {}", e),
        })?;
        validate(&task)?;
        Ok(task)
    }

    /// Read the file at `path` and parse it as a task definition.
    pub fn load_file(path: &Path) -> AssessorResult<TaskDefinition> {
        let contents = std::fs::read_to_string(path).map_err(|e| AssessorError::ConfigError {
            reason: format!("failed to read task file '{}': {}", path.display(), e),
        })?;
        Self::parse_definition(&contents).map_err(|e| match e {
            AssessorError::ConfigError { reason } => AssessorError::ConfigError {
                reason: format!("{}: {reason}", path.display()),
            },
            other => other,
        })
    }

    /// Build a catalog from TOML documents.
    pub fn from_toml_strs<'a>(documents: impl IntoIterator<Item = &'a str>) -> AssessorResult<Self> {
        let mut catalog = Self::new();
        for document in documents {
            catalog.insert(Self::parse_definition(document)?)?;
        }
        Ok(catalog)
    }

    /// Build a catalog from a single definition file.
    pub fn from_file(path: &Path) -> AssessorResult<Self> {
        let mut catalog = Self::new();
        catalog.insert(Self::load_file(path)?)?;
        Ok(catalog)
    }

    /// Load every `*.toml` file directly inside `dir`, in file-name order.
    pub fn from_dir(dir: &Path) -> AssessorResult<Self> {
        let entries = std::fs::read_dir(dir).map_err(|e| AssessorError::ConfigError {
            reason: format!("failed to read task directory '{}': {}", dir.display(), e),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AssessorError::ConfigError {
                reason: format!("failed to read task directory '{}': {}", dir.display(), e),
            })?;
            let path = entry.path();
            if path.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(DEFINITION_EXTENSION)
            {
                paths.push(path);
            }
        }
        paths.sort();

        let mut catalog = Self::new();
        for path in &paths {
            catalog.insert(Self::load_file(path)?)?;
        }
        info!(dir = %dir.display(), tasks = catalog.len(), "task catalog loaded");
        Ok(catalog)
    }

    /// Add a definition. Ids are unique within a catalog.
    pub fn insert(&mut self, task: TaskDefinition) -> AssessorResult<()> {
        if self.tasks.contains_key(&task.id) {
            return Err(AssessorError::DuplicateTask { task_id: task.id });
        }
        debug!(task_id = %task.id, fields = task.fields.len(), "task registered");
        self.tasks.insert(task.id.clone(), task);
        Ok(())
    }

    /// Look up a definition by id.
    pub fn get(&self, task_id: &str) -> AssessorResult<&TaskDefinition> {
        self.tasks.get(task_id).ok_or_else(|| AssessorError::UnknownTask {
            task_id: task_id.to_string(),
        })
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &TaskDefinition> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;

    use assessor_contracts::{
        error::AssessorError,
        task::{AnswerFormat, FieldRule, ScalarKind},
    };

    use super::TaskCatalog;

    const CITATION_TOML: &str = r#"
id = "citations"
description = "Citation overlap"
format = "json"

[locator]
tag = "answer"

[[fields]]
name = "common_author"
label = "Common author"
expected = "Zhining Zhang"
rule = { kind = "alias", aliases = ["zhining zhang"] }

[[fields]]
name = "common_references_count"
expected = 7
rule = { kind = "numeric", tolerance = 2.0 }
"#;

    const SCALAR_TOML: &str = r#"
id = "scalar"
format = "tagged"
checks = ["round-trip"]

[[fields]]
name = "n"
label = "N"
expected = 1
tag = "answer"
parse = "integer"
rule = { kind = "exact" }
"#;

    // ── Parsing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_json_task() {
        let task = TaskCatalog::parse_definition(CITATION_TOML).unwrap();

        assert_eq!(task.id, "citations");
        assert_eq!(task.format, AnswerFormat::Json);
        assert_eq!(task.locator.tag.as_deref(), Some("answer"));
        assert_eq!(task.fields[0].label(), "Common author");
        assert_eq!(
            task.fields[0].rule,
            FieldRule::Alias {
                aliases: vec!["zhining zhang".to_string()]
            }
        );
        assert_eq!(task.fields[1].label(), "common_references_count");
        assert_eq!(task.fields[1].expected, json!(7));
        assert_eq!(task.fields[1].rule.tolerance(), Some(2.0));
    }

    #[test]
    fn test_parse_tagged_task() {
        let task = TaskCatalog::parse_definition(SCALAR_TOML).unwrap();

        assert_eq!(task.format, AnswerFormat::Tagged);
        assert_eq!(task.locator.tag, None);
        assert_eq!(task.checks, vec!["round-trip".to_string()]);
        assert_eq!(task.fields[0].parse, ScalarKind::Integer);
        assert_eq!(task.fields[0].rule, FieldRule::Exact);
    }

    /// Malformed TOML must produce a `ConfigError`.
    #[test]
    fn test_toml_parse_error() {
        match TaskCatalog::parse_definition("id = [unterminated") {
            Err(AssessorError::ConfigError { reason }) => {
                assert!(reason.contains("failed to parse task TOML"), "reason: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_rule_kind_rejected() {
        let toml = SCALAR_TOML.replace("kind = \"exact\"", "kind = \"fuzzy\"");
        assert!(matches!(
            TaskCatalog::parse_definition(&toml),
            Err(AssessorError::ConfigError { .. })
        ));
    }

    /// Definitions that deserialize but fail validation are rejected too.
    #[test]
    fn test_invalid_definition_rejected() {
        let toml = CITATION_TOML.replace("tolerance = 2.0", "tolerance = -2.0");
        match TaskCatalog::parse_definition(&toml) {
            Err(AssessorError::ConfigError { reason }) => {
                assert!(reason.contains("task 'citations'"), "reason: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    // ── Catalog operations ────────────────────────────────────────────────────

    #[test]
    fn test_lookup_and_ids() {
        let catalog = TaskCatalog::from_toml_strs([SCALAR_TOML, CITATION_TOML]).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["citations", "scalar"]);
        assert_eq!(catalog.get("scalar").unwrap().fields.len(), 1);
    }

    #[test]
    fn test_unknown_task() {
        let catalog = TaskCatalog::from_toml_strs([SCALAR_TOML]).unwrap();
        match catalog.get("nope") {
            Err(AssessorError::UnknownTask { task_id }) => assert_eq!(task_id, "nope"),
            other => panic!("expected UnknownTask, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_task_id() {
        match TaskCatalog::from_toml_strs([SCALAR_TOML, SCALAR_TOML]) {
            Err(AssessorError::DuplicateTask { task_id }) => assert_eq!(task_id, "scalar"),
            other => panic!("expected DuplicateTask, got {:?}", other),
        }
    }

    // ── Filesystem loading ────────────────────────────────────────────────────

    /// Only `*.toml` files are loaded; other files in the directory are ignored.
    #[test]
    fn test_from_dir_loads_toml_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b-scalar.toml"), SCALAR_TOML).unwrap();
        fs::write(dir.path().join("a-citations.toml"), CITATION_TOML).unwrap();
        fs::write(dir.path().join("notes.md"), "not a task").unwrap();

        let catalog = TaskCatalog::from_dir(dir.path()).unwrap();

        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["citations", "scalar"]);
    }

    #[test]
    fn test_from_dir_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.toml"), "format = \"json\"").unwrap();

        match TaskCatalog::from_dir(dir.path()) {
            Err(AssessorError::ConfigError { reason }) => {
                assert!(reason.contains("broken.toml"), "reason should name the file: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_from_file_and_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scalar.toml");
        fs::write(&path, SCALAR_TOML).unwrap();

        let catalog = TaskCatalog::from_file(&path).unwrap();
        assert!(catalog.get("scalar").is_ok());

        assert!(matches!(
            TaskCatalog::from_dir(&dir.path().join("missing")),
            Err(AssessorError::ConfigError { .. })
        ));
    }
}
