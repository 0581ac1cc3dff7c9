//! Task: license-compliance-check
//!
//! The agent inventories the licenses in the `@angular/cli@17.0.0`
//! dependency tree and answers with a JSON object inside `<answer>` tags.
//! Package names may carry version suffixes; the attribution license may be
//! spelled in several ways (handled by the `creative-commons-attribution`
//! rule).

pub const TASK_ID: &str = "license-compliance-check";

pub const DEFINITION: &str = include_str!("../../tasks/license-compliance-check.toml");

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::fixtures::{bench, record, NoRuntime};

    use super::TASK_ID;

    fn correct() -> Value {
        json!({
            "total_packages": 236,
            "license_types_count": 11,
            "blueoak_packages": ["path-scurry@1.11.1", "Jackspeak", "package-json-from-dist"],
            "cc_by_package": "spdx-exceptions@2.5.0",
            "blueoak_type": "Permissive",
            "mit_compatible": "YES",
            "attribution_license": "CC BY 3.0",
        })
    }

    fn submit(answer: &Value) -> String {
        format!("<answer>{answer}</answer>")
    }

    #[test]
    fn test_correct_answer_passes() {
        let verdict = bench(NoRuntime)
            .grade(TASK_ID, &record("success", &submit(&correct())))
            .unwrap();

        assert!(verdict.passed, "feedback: {}", verdict.feedback);
        assert_eq!(verdict.feedback_lines().count(), 7);
        assert_eq!(
            verdict.feedback_lines().next(),
            Some("✓ total_packages: got 236, expected 230 (tolerance: ±15)")
        );
        assert!(verdict.feedback.contains(
            "✓ attribution_license: got 'CC BY 3.0', expected 'CC-BY-3.0'"
        ));
    }

    #[test]
    fn test_each_field_can_fail_independently() {
        let cases: [(&str, Value); 7] = [
            ("total_packages", json!(250)),
            ("license_types_count", json!(7)),
            ("blueoak_packages", json!(["jackspeak", "path-scurry"])),
            ("cc_by_package", json!("spdx-license-ids")),
            ("blueoak_type", json!("copyleft")),
            ("mit_compatible", json!("no")),
            ("attribution_license", json!("MIT")),
        ];

        let bench = bench(NoRuntime);
        for (field, wrong) in cases {
            let mut answer = correct();
            answer[field] = wrong;
            let verdict = bench
                .grade(TASK_ID, &record("success", &submit(&answer)))
                .unwrap();

            assert!(!verdict.passed, "{field} should fail");
            let checks = verdict.detail("checks").unwrap();
            for (name, check) in checks.as_object().unwrap() {
                assert_eq!(
                    check["passed"],
                    json!(name != field),
                    "only {field} should fail, but {name} disagrees"
                );
            }
        }
    }

    /// Package lists compare as sets, so order never matters.
    #[test]
    fn test_package_order_is_irrelevant() {
        let bench = bench(NoRuntime);
        let orders = [
            json!(["jackspeak", "package-json-from-dist", "path-scurry"]),
            json!(["path-scurry", "package-json-from-dist", "jackspeak"]),
        ];
        for order in orders {
            let mut answer = correct();
            answer["blueoak_packages"] = order;
            let verdict = bench
                .grade(TASK_ID, &record("success", &submit(&answer)))
                .unwrap();
            assert!(verdict.passed, "feedback: {}", verdict.feedback);
        }
    }

    #[test]
    fn test_string_counts_are_not_numbers() {
        let mut answer = correct();
        answer["total_packages"] = json!("230");
        let verdict = bench(NoRuntime)
            .grade(TASK_ID, &record("success", &submit(&answer)))
            .unwrap();

        assert!(!verdict.passed);
        assert!(verdict
            .feedback
            .contains("✗ total_packages: got '230', expected 230 (tolerance: ±15)"));
    }

    #[test]
    fn test_missing_fields_fail_without_error() {
        let verdict = bench(NoRuntime)
            .grade(TASK_ID, &record("success", "<answer>{\"total_packages\": 230}</answer>"))
            .unwrap();

        assert!(!verdict.passed);
        assert!(verdict.feedback.contains("✗ cc_by_package: got N/A, expected 'spdx-exceptions'"));
        assert_eq!(verdict.detail("parsed_answer"), Some(&json!({ "total_packages": 230 })));
    }
}
