//! UI and usability checks: viewport configuration, favicon, interactive
//! affordances, form labelling and unreadably small font declarations.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use std::collections::BTreeMap;

use super::AuditContext;
use crate::report::{AuditIssue, AuditSection};

const MIN_INTERACTIVE_ELEMENTS: usize = 3;

// font-size of 0-11px anywhere in the markup, inline styles included.
static RE_TINY_FONT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)font-size:\s*(1[01]|[0-9])px").expect("invalid font regex"));

pub fn audit(ctx: &AuditContext<'_>) -> AuditSection {
    let mut score: i32 = 100;
    let mut issues = Vec::new();

    match ctx.document.first(r#"meta[name="viewport"]"#) {
        None => {
            score -= 30;
            issues.push(AuditIssue::critical(
                "Page has no viewport meta tag",
                "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
            ));
        }
        Some(el) => {
            let content = el.value().attr("content").unwrap_or("");
            if !content.contains("width=device-width") {
                score -= 10;
                issues.push(AuditIssue::warning(
                    "Viewport meta tag does not adapt to device width",
                    "Include width=device-width in the viewport content",
                ));
            }
        }
    }

    let has_favicon = ctx.document.exists(r#"link[rel="icon"]"#)
        || ctx.document.exists(r#"link[rel="shortcut icon"]"#);
    if !has_favicon {
        score -= 5;
        issues.push(AuditIssue::info(
            "Page declares no favicon",
            "Add <link rel=\"icon\"> so browser tabs and bookmarks show an icon",
        ));
    }

    let interactive_count =
        ctx.document.count("button") + ctx.document.count("a") + ctx.document.count("input");
    if interactive_count < MIN_INTERACTIVE_ELEMENTS {
        score -= 10;
        issues.push(AuditIssue::info(
            format!("Page offers only {interactive_count} interactive elements"),
            "Give visitors something to act on: links, buttons or inputs",
        ));
    }

    let form_count = ctx.document.count("form");
    if form_count >= 1 {
        let tangible_inputs = ctx
            .document
            .count(r#"input:not([type="hidden"]):not([type="submit"])"#);
        let labeled = ctx.document.count("label")
            + ctx.document.count("input[aria-label]")
            + ctx.document.count("input[aria-labelledby]");
        if tangible_inputs > 0 && labeled < tangible_inputs {
            score -= 15;
            issues.push(AuditIssue::warning(
                format!("{labeled} labels for {tangible_inputs} form inputs"),
                "Pair every visible input with a <label> or aria-label",
            ));
        }
    }

    if RE_TINY_FONT.is_match(ctx.raw_html) {
        score -= 5;
        issues.push(AuditIssue::info(
            "Page declares font sizes below 12px",
            "Keep body text at 12px or larger for readability",
        ));
    }

    let details = BTreeMap::from([
        (
            "interactiveElementCount".to_string(),
            json!(interactive_count),
        ),
        ("formCount".to_string(), json!(form_count)),
    ]);

    AuditSection::new(score, issues, details)
}
