//! Python-backed snippet runtime.
//!
//! Each round trip spawns a fresh interpreter running `ROUND_TRIP_RUNNER`.
//! The battery is written to its stdin as one JSON document; the reply is one
//! JSON document on stdout. Anything the snippets print goes to stderr so it
//! cannot corrupt the reply.

use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use assessor_contracts::{
    error::{AssessorError, AssessorResult},
    snippet::{RoundTripBattery, RoundTripRun},
};
use assessor_core::traits::SnippetRuntime;

pub const DEFAULT_PYTHON_COMMAND: &str = "python3";
pub const DEFAULT_EXEC_TIMEOUT_MS: u64 = 30_000;

pub const PYTHON_COMMAND_ENV: &str = "ASSESSOR_PYTHON";
pub const EXEC_TIMEOUT_MS_ENV: &str = "ASSESSOR_EXEC_TIMEOUT_MS";

/// Characters of interpreter stderr quoted in protocol errors.
const STDERR_TAIL_CHARS: usize = 400;

const ROUND_TRIP_RUNNER: &str = r#"
import copy
import json
import sys

_HOST_STDOUT = sys.stdout
sys.stdout = sys.stderr


def _message(exc):
    return str(exc) or type(exc).__name__


def _preview(value, limit):
    text = value if isinstance(value, str) else repr(value)
    return text[:limit]


def _run(request):
    reply = {"load_error": None, "defined": [], "cases": []}
    namespace = {}
    try:
        for source in request["snippets"]:
            exec(source, namespace)
    except BaseException as exc:
        reply["load_error"] = _message(exc)
        return reply

    routines = {}
    for name in (request["encode"], request["decode"]):
        candidate = namespace.get(name)
        if callable(candidate):
            routines[name] = candidate
            reply["defined"].append(name)
    if request["encode"] not in routines or request["decode"] not in routines:
        return reply

    encode = routines[request["encode"]]
    decode = routines[request["decode"]]
    for case in request["cases"]:
        outcome = {"matches": False}
        try:
            encoded = encode(copy.deepcopy(case))
            outcome["encoded_preview"] = _preview(encoded, 50)
            outcome["distinct_symbols"] = len(set(encoded))
            decoded = decode(encoded)
            outcome["decoded_preview"] = _preview(decoded, 200)
            outcome["matches"] = bool(decoded == case)
        except BaseException as exc:
            outcome["error"] = _message(exc)
        reply["cases"].append(outcome)
    return reply


_reply = _run(json.loads(sys.stdin.read()))
_HOST_STDOUT.write(json.dumps(_reply, ensure_ascii=False))
_HOST_STDOUT.flush()
"#;

/// Interpreter settings for snippet execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonSettings {
    /// Interpreter command; whitespace-separated words after the first are
    /// passed as leading arguments (e.g. `uv run python`).
    pub python_command: String,
    /// Wall-clock limit for one round trip, interpreter start-up included.
    pub exec_timeout_ms: u64,
}

impl Default for PythonSettings {
    fn default() -> Self {
        Self {
            python_command: DEFAULT_PYTHON_COMMAND.to_string(),
            exec_timeout_ms: DEFAULT_EXEC_TIMEOUT_MS,
        }
    }
}

impl PythonSettings {
    /// Defaults overridden by `ASSESSOR_PYTHON` and `ASSESSOR_EXEC_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        Self::from_raw_values(
            std::env::var(PYTHON_COMMAND_ENV).ok().as_deref(),
            std::env::var(EXEC_TIMEOUT_MS_ENV).ok().as_deref(),
        )
    }

    /// Blank or unparsable values fall back to the defaults.
    pub fn from_raw_values(python_command: Option<&str>, exec_timeout_ms: Option<&str>) -> Self {
        let python_command = python_command
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_PYTHON_COMMAND)
            .to_string();
        let exec_timeout_ms = exec_timeout_ms
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_EXEC_TIMEOUT_MS);
        Self {
            python_command,
            exec_timeout_ms,
        }
    }

    pub fn with_python_command(mut self, python_command: impl Into<String>) -> Self {
        let python_command = python_command.into();
        if !python_command.trim().is_empty() {
            self.python_command = python_command.trim().to_string();
        }
        self
    }
}

/// Runs encode/decode snippets in a disposable Python interpreter.
#[derive(Debug, Clone, Default)]
pub struct PythonRuntime {
    settings: PythonSettings,
}

impl PythonRuntime {
    pub fn new(settings: PythonSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PythonSettings {
        &self.settings
    }

    fn spawn(&self) -> AssessorResult<Child> {
        let mut words = self.settings.python_command.split_whitespace();
        let program = words.next().unwrap_or(DEFAULT_PYTHON_COMMAND);
        Command::new(program)
            .args(words)
            .arg("-c")
            .arg(ROUND_TRIP_RUNNER)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AssessorError::RuntimeUnavailable {
                reason: format!(
                    "failed to start python process '{}': {e}",
                    self.settings.python_command
                ),
            })
    }

    /// Feed the request and collect the reply within the deadline. A child
    /// still running when the deadline passes is killed on drop.
    async fn exchange(&self, request: &[u8]) -> AssessorResult<Output> {
        let mut child = self.spawn()?;
        debug!(python_command = %self.settings.python_command, "python runner started");

        let timeout_ms = self.settings.exec_timeout_ms;
        let exchange = async move {
            // The runner reads all of stdin before producing output, so the
            // write cannot stall on a full stdout pipe. Dropping the handle
            // closes it.
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(request).await.map_err(|e| AssessorError::RuntimeUnavailable {
                    reason: format!("failed to send request to python process: {e}"),
                })?;
            }
            child.wait_with_output().await.map_err(|e| AssessorError::RuntimeUnavailable {
                reason: format!("failed to wait for python process: {e}"),
            })
        };

        match tokio::time::timeout(Duration::from_millis(timeout_ms), exchange).await {
            Ok(output) => output,
            Err(_) => {
                warn!(timeout_ms, "python runner timed out");
                Err(AssessorError::RuntimeUnavailable {
                    reason: format!("snippet execution exceeded {timeout_ms} ms"),
                })
            }
        }
    }
}

/// Each call drives its own current-thread runtime, so callers stay
/// synchronous. Not for use from inside another tokio runtime.
impl SnippetRuntime for PythonRuntime {
    fn run_round_trip(&self, battery: &RoundTripBattery) -> AssessorResult<RoundTripRun> {
        let request = serde_json::to_vec(battery).map_err(|e| AssessorError::RuntimeProtocol {
            reason: format!("failed to encode round-trip request: {e}"),
        })?;

        let executor = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AssessorError::RuntimeUnavailable {
                reason: format!("failed to start process executor: {e}"),
            })?;
        debug!(
            snippets = battery.snippets.len(),
            cases = battery.cases.len(),
            "running round-trip battery"
        );
        let output = executor.block_on(self.exchange(&request))?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            warn!(status = %output.status, "python runner exited abnormally");
            return Err(AssessorError::RuntimeProtocol {
                reason: format!("python process exited with {}: {}", output.status, tail(&stderr)),
            });
        }

        serde_json::from_slice::<RoundTripRun>(&output.stdout).map_err(|e| {
            AssessorError::RuntimeProtocol {
                reason: format!("invalid reply from python process: {e}; stderr: {}", tail(&stderr)),
            }
        })
    }
}

/// The last `STDERR_TAIL_CHARS` characters, where tracebacks end.
fn tail(text: &str) -> String {
    let text = text.trim_end();
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(STDERR_TAIL_CHARS)).collect()
}
