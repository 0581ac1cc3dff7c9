//! String coercion and normalization shared by the comparison rules.

use serde_json::Value;

/// Coerce a JSON value to the string a human would read.
///
/// Strings yield their content, `null` the empty string, and everything else
/// its compact JSON text.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Lowercase and collapse every whitespace run to a single space.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical form of a package identifier.
///
/// A version suffix is stripped (`pkg@1.0.0` → `pkg`) while a scope prefix
/// is kept (`@scope/pkg@1.0.0` → `@scope/pkg`). The result is lowercased and
/// trimmed.
pub fn normalize_identifier(name: &str) -> String {
    let base = if !name.starts_with('@') {
        name.split('@').next().unwrap_or(name)
    } else if name.matches('@').count() > 1 {
        name.rsplit_once('@').map_or(name, |(head, _)| head)
    } else {
        name
    };
    base.to_lowercase().trim().to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{normalize_identifier, normalize_text, stringify};

    #[test]
    fn test_stringify() {
        assert_eq!(stringify(&json!("a")), "a");
        assert_eq!(stringify(&json!(null)), "");
        assert_eq!(stringify(&json!(7)), "7");
        assert_eq!(stringify(&json!(true)), "true");
        assert_eq!(stringify(&json!(["x"])), r#"["x"]"#);
    }

    #[test]
    fn test_normalize_text_collapses_whitespace() {
        assert_eq!(normalize_text("  Zhining\t ZHANG \n"), "zhining zhang");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_identifier_strips_version() {
        assert_eq!(normalize_identifier("spdx-exceptions@2.5.0"), "spdx-exceptions");
        assert_eq!(normalize_identifier("Path-Scurry"), "path-scurry");
    }

    /// Scoped names keep their scope; only the trailing version goes.
    #[test]
    fn test_identifier_keeps_scope() {
        assert_eq!(normalize_identifier("@angular/cli@17.0.0"), "@angular/cli");
        assert_eq!(normalize_identifier("@Angular/CLI"), "@angular/cli");
    }

    #[test]
    fn test_identifier_trims() {
        assert_eq!(normalize_identifier(" jackspeak "), "jackspeak");
    }
}
