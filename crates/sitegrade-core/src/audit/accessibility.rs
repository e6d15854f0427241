//! Accessibility checks: alt text, document language and button names.

use std::collections::BTreeMap;

use super::AuditContext;
use crate::dom::element_text;
use crate::report::{AuditIssue, AuditSection};

const MISSING_ALT_PENALTY: i32 = 5;
const MISSING_ALT_CAP: i32 = 30;

pub fn audit(ctx: &AuditContext<'_>) -> AuditSection {
    let mut score: i32 = 100;
    let mut issues = Vec::new();

    // Deducted per offending image, capped at 30.
    let image_count = ctx.document.count("img");
    let missing_alt = image_count - ctx.document.count("img[alt]");
    if missing_alt > 0 {
        score -= MISSING_ALT_CAP.min(missing_alt as i32 * MISSING_ALT_PENALTY);
        issues.push(AuditIssue::warning(
            format!("{missing_alt} images have no alt attribute"),
            "Describe each image with alt text, or alt=\"\" if purely decorative",
        ));
    }

    if !ctx.document.exists("html[lang]") {
        score -= 15;
        issues.push(AuditIssue::warning(
            "Document language is not declared",
            "Add a lang attribute to the <html> element",
        ));
    }

    let unnamed_buttons = ctx
        .document
        .query_all("button")
        .iter()
        .filter(|button| {
            element_text(button).is_empty() && button.value().attr("aria-label").is_none()
        })
        .count();
    if unnamed_buttons > 0 {
        score -= 10;
        issues.push(AuditIssue::warning(
            format!("{unnamed_buttons} buttons have no accessible name"),
            "Give every button visible text or an aria-label",
        ));
    }

    AuditSection::new(score, issues, BTreeMap::new())
}
