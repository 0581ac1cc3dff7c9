//! Task: minimum-comm
//!
//! Alice must send Bob a list of distinct positive integers using a keyboard
//! with N symbols. The agent answers with the minimum N in `<answer>` tags
//! and supplies `encode`/`decode` routines in `<encode_function>` and
//! `<decode_function>` tags. The routines are verified by the
//! `single-symbol-round-trip` check.

pub const TASK_ID: &str = "minimum-comm";

pub const DEFINITION: &str = include_str!("../../tasks/minimum-comm.toml");

#[cfg(test)]
mod tests {
    use std::process::{Command, Stdio};
    use std::sync::Arc;

    use serde_json::json;

    use crate::bench::Bench;
    use crate::fixtures::{bench, completion_record, record, NoRuntime, PerfectRuntime};
    use crate::runtime::PythonRuntime;

    use super::TASK_ID;

    const ENCODE: &str = "def encode(numbers):\n    return 'a' * sum(6 ** i * n for i, n in enumerate(numbers))";
    const DECODE: &str = "def decode(text):\n    value = len(text)\n    digits = []\n    while value:\n        digits.append(value % 6)\n        value //= 6\n    return digits";

    fn response(n: &str) -> String {
        format!(
            "One symbol suffices.\n<answer>{n}</answer>\n\
             <encode_function>\n{ENCODE}\n</encode_function>\n\
             <decode_function>\n{DECODE}\n</decode_function>"
        )
    }

    #[test]
    fn test_correct_response_passes() {
        let verdict = bench(PerfectRuntime)
            .grade(TASK_ID, &record("success", &response("1")))
            .unwrap();

        assert!(verdict.passed, "feedback: {}", verdict.feedback);
        assert_eq!(
            verdict.feedback_lines().collect::<Vec<_>>(),
            vec![
                "✓ N: got 1, expected 1",
                "✓ All encoded strings use exactly 1 unique character",
                "✓ All 5 test cases passed encode/decode correctly",
            ]
        );
        assert_eq!(
            verdict.detail("verification").unwrap()["single-symbol-round-trip"]["cases"],
            json!(5)
        );
    }

    #[test]
    fn test_wrong_n_fails() {
        let verdict = bench(PerfectRuntime)
            .grade(TASK_ID, &record("success", &response("2")))
            .unwrap();

        assert!(!verdict.passed);
        assert_eq!(verdict.feedback_lines().next(), Some("✗ N: got 2, expected 1"));
    }

    #[test]
    fn test_unparsable_n_fails() {
        let verdict = bench(PerfectRuntime)
            .grade(TASK_ID, &record("success", &response("one")))
            .unwrap();

        assert!(!verdict.passed);
        assert_eq!(
            verdict.feedback_lines().next(),
            Some("✗ N: could not parse 'one' as an integer")
        );
    }

    /// Without routines the check fails before any runtime is needed.
    #[test]
    fn test_missing_routines_fail() {
        let verdict = bench(NoRuntime)
            .grade(TASK_ID, &record("success", "<answer>1</answer>"))
            .unwrap();

        assert!(!verdict.passed);
        assert_eq!(
            verdict.feedback_lines().collect::<Vec<_>>(),
            vec![
                "✓ N: got 1, expected 1",
                "✗ No <encode_function>...</encode_function> found in response.",
                "✗ No <decode_function>...</decode_function> found in response.",
            ]
        );
    }

    #[test]
    fn test_unavailable_runtime_fails_check() {
        let verdict = bench(NoRuntime)
            .grade(TASK_ID, &record("success", &response("1")))
            .unwrap();

        assert!(!verdict.passed);
        assert!(verdict.feedback.contains("✗ Error executing functions:"));
    }

    #[test]
    fn test_response_from_assistant_content() {
        let verdict = bench(PerfectRuntime)
            .grade(
                TASK_ID,
                &json!({
                    "status": "success",
                    "conversation": [
                        { "role": "user", "content": "Solve the puzzle." },
                        { "role": "assistant", "content": response("1") },
                    ]
                }),
            )
            .unwrap();

        assert!(verdict.passed, "feedback: {}", verdict.feedback);
        assert_eq!(verdict.detail("answer_source"), Some(&json!("assistant_content")));
    }

    #[test]
    fn test_no_response_hint() {
        let verdict = bench(PerfectRuntime)
            .grade(TASK_ID, &completion_record("success", ""))
            .unwrap();

        assert!(!verdict.passed);
        assert_eq!(verdict.feedback, "No valid response found in assistant messages.");
    }

    /// End to end against a real interpreter, when one is installed.
    #[test]
    fn test_round_trip_with_python() {
        let available = Command::new("python3")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false);
        if !available {
            eprintln!("python3 not available; skipping");
            return;
        }

        let bench = Bench::builtin(Arc::new(PythonRuntime::default())).unwrap();

        let verdict = bench.grade(TASK_ID, &record("success", &response("1"))).unwrap();
        assert!(verdict.passed, "feedback: {}", verdict.feedback);

        // Base-10 digits as repeated symbols: lossy for multi-element lists.
        let lossy = "<answer>1</answer>\n\
            <encode_function>def encode(xs):\n    return 'a' * sum(xs)</encode_function>\n\
            <decode_function>def decode(s):\n    return [len(s)]</decode_function>";
        let verdict = bench.grade(TASK_ID, &record("success", lossy)).unwrap();
        assert!(!verdict.passed);
        assert!(verdict.feedback.contains("✗ Some test cases failed:"));
        assert!(verdict.feedback.contains("  Test 2 [1, 2]: decoded as [3] (mismatch)"));
    }
}
