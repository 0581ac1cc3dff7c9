//! # assessor-extract
//!
//! Answer extraction for the assessor grading harness:
//!
//! - [`tags`] — first/last `<tag>...</tag>` content from free-form text.
//! - [`resolve`] — picks the authoritative answer text out of a result
//!   record (direct result, completion tool call, or assistant content).
//! - [`parse`] — integer and JSON-object parsing with code-fence and
//!   brace-scan fallbacks.
//!
//! Nothing here fails loudly: absent answers are `None`, unparsable ones are
//! a [`parse::ParseError`] the grader turns into feedback.

pub mod parse;
pub mod resolve;
pub mod tags;

pub use parse::{parse_integer, parse_object, ParseError, ParseStrategy, ParsedObject};
pub use resolve::{AnswerSource, Resolution, TranscriptResolver};
pub use tags::{extract, extract_last, TagPattern};
