//! Tag extraction from free-form model output.
//!
//! Tags are the textual contract between a task prompt and the grader:
//! `<answer>...</answer>`, `<encode_function>...</encode_function>`, and so
//! on. Matching is case-insensitive and spans lines, and the inner content
//! may contain unrelated markup.

use regex::Regex;

/// A compiled matcher for one tag name.
#[derive(Debug, Clone)]
pub struct TagPattern {
    name: String,
    regex: Regex,
}

impl TagPattern {
    /// Compile a matcher for `<name>...</name>`. The name is matched
    /// literally.
    pub fn new(name: &str) -> Result<Self, regex::Error> {
        let escaped = regex::escape(name);
        let regex = Regex::new(&format!(r"(?is)<{escaped}>(.*?)</{escaped}>"))?;
        Ok(Self {
            name: name.to_string(),
            regex,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trimmed content of the first occurrence in document order.
    pub fn first(&self, text: &str) -> Option<String> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }

    /// Trimmed content of the last occurrence in document order.
    pub fn last(&self, text: &str) -> Option<String> {
        self.regex
            .captures_iter(text)
            .last()
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }

    /// The opening and closing markers, for feedback messages.
    pub fn markers(&self) -> String {
        format!("<{0}>...</{0}>", self.name)
    }
}

/// Trimmed content of the first `<tag>...</tag>` in `text`.
pub fn extract(text: &str, tag: &str) -> Option<String> {
    TagPattern::new(tag).ok()?.first(text)
}

/// Trimmed content of the last `<tag>...</tag>` in `text`.
pub fn extract_last(text: &str, tag: &str) -> Option<String> {
    TagPattern::new(tag).ok()?.last(text)
}

#[cfg(test)]
mod tests {
    use super::{extract, extract_last, TagPattern};

    #[test]
    fn test_extracts_trimmed_inner_content() {
        assert_eq!(extract("before <answer>  42 \n</answer> after", "answer"), Some("42".to_string()));
    }

    #[test]
    fn test_absent_tag_is_none() {
        assert_eq!(extract("no tags here", "answer"), None);
        assert_eq!(extract("<answer>unterminated", "answer"), None);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(extract("<ANSWER>yes</Answer>", "answer"), Some("yes".to_string()));
    }

    #[test]
    fn test_content_may_span_lines_and_contain_markup() {
        let text = "<encode_function>\ndef encode(xs):\n    return '<b>' * len(xs)\n</encode_function>";
        let inner = extract(text, "encode_function").unwrap();

        assert!(inner.starts_with("def encode(xs):"));
        assert!(inner.contains("'<b>'"));
        assert!(inner.ends_with("len(xs)"));
    }

    /// The first match wins and matching is non-greedy, so content never
    /// swallows a later pair of tags.
    #[test]
    fn test_first_match_in_document_order() {
        let text = "<answer>one</answer> middle <answer>two</answer>";
        assert_eq!(extract(text, "answer"), Some("one".to_string()));
        assert_eq!(extract_last(text, "answer"), Some("two".to_string()));
    }

    #[test]
    fn test_empty_tag_yields_empty_string() {
        assert_eq!(extract("<answer>   </answer>", "answer"), Some(String::new()));
    }

    #[test]
    fn test_other_tags_do_not_match() {
        let text = "<encode_function>e</encode_function><decode_function>d</decode_function>";
        assert_eq!(extract(text, "decode_function"), Some("d".to_string()));
        assert_eq!(extract(text, "answer"), None);
    }

    #[test]
    fn test_tag_names_are_literal() {
        let pattern = TagPattern::new("a.b").unwrap();
        assert_eq!(pattern.first("<aXb>no</aXb>"), None);
        assert_eq!(pattern.first("<a.b>yes</a.b>"), Some("yes".to_string()));
        assert_eq!(pattern.markers(), "<a.b>...</a.b>");
        assert_eq!(pattern.name(), "a.b");
    }
}
