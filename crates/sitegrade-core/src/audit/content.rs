//! Content checks over the page's visible text.
//!
//! This auditor deliberately re-strips script/style subtrees from the raw
//! markup instead of reusing the shared parse: text extraction must happen
//! on a document with the inert subtrees already removed.

use serde_json::json;
use std::collections::BTreeMap;

use super::AuditContext;
use crate::dom::body_text;
use crate::report::{AuditIssue, AuditSection};

const MIN_WORDS: usize = 300;
const MAX_WORDS: usize = 5000;

pub fn audit(ctx: &AuditContext<'_>) -> AuditSection {
    let mut score: i32 = 100;
    let mut issues = Vec::new();

    let text = body_text(ctx.raw_html);
    let word_count = text.split_whitespace().count();

    if word_count < MIN_WORDS {
        score -= 20;
        issues.push(AuditIssue::warning(
            format!("Page has only {word_count} words of visible text"),
            "Thin pages rank poorly; aim for at least 300 words of real content",
        ));
    } else if word_count > MAX_WORDS {
        // Informational only, no deduction.
        issues.push(AuditIssue::info(
            format!("Page has {word_count} words of visible text"),
            "Consider splitting very long pages into focused ones",
        ));
    }

    if text.to_lowercase().contains("lorem ipsum") {
        score -= 50;
        issues.push(AuditIssue::critical(
            "Placeholder text found on the page",
            "Replace lorem ipsum filler with real content before publishing",
        ));
    }

    let details = BTreeMap::from([("wordCount".to_string(), json!(word_count))]);

    AuditSection::new(score, issues, details)
}
