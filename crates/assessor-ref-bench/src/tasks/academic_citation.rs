//! Task: academic-citation-analysis
//!
//! The agent compares the reference lists of two Theory of Mind papers and
//! answers with a JSON object inside `<answer>` tags:
//!
//! ```json
//! {"common_author": "...", "autotom_cites_repbelief": "yes|no",
//!  "common_references_count": 0, "autotom_refs_2023_plus": 0}
//! ```
//!
//! Counts are compared with tolerances because reference managers disagree
//! about duplicates and publication years.

pub const TASK_ID: &str = "academic-citation-analysis";

pub const DEFINITION: &str = include_str!("../../tasks/academic-citation-analysis.toml");
