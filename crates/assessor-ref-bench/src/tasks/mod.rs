//! Reference benchmark tasks.
//!
//! Each task is a self-contained module holding its embedded TOML definition
//! and scenario tests that grade realistic result records end to end.

pub mod academic_citation;
pub mod license_compliance;
pub mod minimum_comm;

use assessor_catalog::TaskCatalog;
use assessor_contracts::error::AssessorResult;

/// Every embedded reference task definition.
pub const DEFINITIONS: [&str; 3] = [
    academic_citation::DEFINITION,
    license_compliance::DEFINITION,
    minimum_comm::DEFINITION,
];

/// A catalog holding the reference tasks.
pub fn builtin_catalog() -> AssessorResult<TaskCatalog> {
    TaskCatalog::from_toml_strs(DEFINITIONS)
}

#[cfg(test)]
mod tests {
    use super::{academic_citation, builtin_catalog, license_compliance, minimum_comm};

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(
            catalog.ids().collect::<Vec<_>>(),
            vec![
                academic_citation::TASK_ID,
                license_compliance::TASK_ID,
                minimum_comm::TASK_ID
            ]
        );
    }
}
