//! Custom field rules used by the reference tasks.
//!
//! Registered on every `FieldVerifier` the bench builds; tasks reference them
//! by name through `rule = { kind = "custom", function = "..." }`.

use serde_json::Value;

use assessor_verify::{normalize::stringify, FieldVerifier};

/// Accepts spelling variants of a Creative Commons Attribution license.
pub const CREATIVE_COMMONS_ATTRIBUTION: &str = "creative-commons-attribution";

/// Register every reference-task rule on `verifier`.
pub fn register_all(verifier: &mut FieldVerifier) {
    verifier.register_rule(
        CREATIVE_COMMONS_ATTRIBUTION,
        Box::new(|got: Option<&Value>, _expected: &Value| creative_commons_attribution(got)),
    );
}

/// `CC-BY-3.0`, `cc by 3.0`, `Creative Commons Attribution` and the like.
///
/// The version is not checked.
pub fn creative_commons_attribution(got: Option<&Value>) -> bool {
    let Some(got) = got else {
        return false;
    };
    let license = stringify(got).trim().to_uppercase();
    let creative_commons = license.contains("CC") || license.contains("CREATIVE COMMONS");
    creative_commons && (license.contains("BY") || license.contains("ATTRIBUTION"))
}
