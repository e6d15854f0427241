//! SEO checks: title, meta description, heading structure and the link
//! tags search engines look for.

use serde_json::json;
use std::collections::BTreeMap;

use super::AuditContext;
use crate::dom::element_text;
use crate::report::{AuditIssue, AuditSection};

const TITLE_MIN: usize = 10;
const TITLE_MAX: usize = 70;
const DESCRIPTION_MIN: usize = 50;
const DESCRIPTION_MAX: usize = 160;

pub fn audit(ctx: &AuditContext<'_>) -> AuditSection {
    let mut score: i32 = 100;
    let mut issues = Vec::new();

    // An empty <title> is as useless to a crawler as a missing one.
    let title = ctx
        .document
        .first("title")
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty());

    match &title {
        None => {
            score -= 30;
            issues.push(AuditIssue::critical(
                "Page has no <title>",
                "Add a unique, descriptive title of 10-70 characters",
            ));
        }
        Some(text) if text.len() < TITLE_MIN || text.len() > TITLE_MAX => {
            score -= 5;
            issues.push(AuditIssue::info(
                format!("Title length is {} characters", text.len()),
                "Keep the title between 10 and 70 characters",
            ));
        }
        Some(_) => {}
    }

    let description = ctx
        .document
        .first(r#"meta[name="description"]"#)
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
        .filter(|content| !content.is_empty());

    match &description {
        None => {
            score -= 20;
            issues.push(AuditIssue::critical(
                "Page has no meta description",
                "Add a meta description of 50-160 characters summarizing the page",
            ));
        }
        Some(content) if content.len() < DESCRIPTION_MIN || content.len() > DESCRIPTION_MAX => {
            score -= 5;
            issues.push(AuditIssue::info(
                format!("Meta description length is {} characters", content.len()),
                "Keep the meta description between 50 and 160 characters",
            ));
        }
        Some(_) => {}
    }

    let h1_count = ctx.document.count("h1");
    if h1_count == 0 {
        score -= 25;
        issues.push(AuditIssue::critical(
            "Page has no <h1> heading",
            "Add exactly one <h1> naming the page's main topic",
        ));
    } else if h1_count > 1 {
        score -= 10;
        issues.push(AuditIssue::warning(
            format!("Page has {h1_count} <h1> headings"),
            "Use a single <h1> and demote the others",
        ));
    }

    if !ctx.document.exists(r#"link[rel="canonical"]"#) {
        score -= 10;
        issues.push(AuditIssue::warning(
            "Page has no canonical link",
            "Add <link rel=\"canonical\"> to mark the preferred URL",
        ));
    }

    if !ctx.document.exists(r#"meta[property="og:image"]"#) {
        score -= 10;
        issues.push(AuditIssue::info(
            "Page has no Open Graph image",
            "Add <meta property=\"og:image\"> for link previews",
        ));
    }

    let details = BTreeMap::from([
        ("title".to_string(), json!(title.unwrap_or_default())),
        (
            "descriptionLength".to_string(),
            json!(description.map(|d| d.len()).unwrap_or(0)),
        ),
    ]);

    AuditSection::new(score, issues, details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::headers::ResponseHeaders;
    use crate::report::Severity;

    fn audit_html(html: &str) -> AuditSection {
        let document = Document::parse(html);
        let headers = ResponseHeaders::new();
        audit(&AuditContext {
            document: &document,
            raw_html: html,
            url: "https://example.com",
            headers: &headers,
        })
    }

    const GOOD_TITLE: &str = "A perfectly sized example page title";
    const GOOD_DESCRIPTION: &str =
        "A description that is comfortably inside the allowed range of lengths for this check.";

    fn good_head() -> String {
        format!(
            r#"<title>{GOOD_TITLE}</title>
            <meta name="description" content="{GOOD_DESCRIPTION}">
            <link rel="canonical" href="https://example.com/">
            <meta property="og:image" content="https://example.com/og.png">"#
        )
    }

    #[test]
    fn complete_metadata_scores_100() {
        let section = audit_html(&format!(
            "<html><head>{}</head><body><h1>Topic</h1></body></html>",
            good_head()
        ));
        assert_eq!(section.score, 100, "issues: {:?}", section.issues);
        assert_eq!(section.details["title"], GOOD_TITLE);
        assert_eq!(section.details["descriptionLength"], GOOD_DESCRIPTION.len());
    }

    #[test]
    fn bare_page_fails_every_check() {
        let section = audit_html("<html><body></body></html>");
        // 100 - 30 (title) - 20 (description) - 25 (h1) - 10 (canonical) - 10 (og:image)
        assert_eq!(section.score, 5);

        let criticals = section
            .issues
            .iter()
            .filter(|i| i.severity == Severity::Critical)
            .count();
        assert_eq!(criticals, 3);
        assert_eq!(section.details["title"], "");
        assert_eq!(section.details["descriptionLength"], 0);
    }

    #[test]
    fn short_title_is_info_not_critical() {
        let section = audit_html(&format!(
            r#"<html><head>
                <title>Tiny</title>
                <meta name="description" content="{GOOD_DESCRIPTION}">
                <link rel="canonical" href="/"><meta property="og:image" content="x">
            </head><body><h1>Topic</h1></body></html>"#
        ));
        assert_eq!(section.score, 95);
        assert_eq!(section.issues.len(), 1);
        assert_eq!(section.issues[0].severity, Severity::Info);
    }

    #[test]
    fn empty_title_counts_as_missing() {
        let section = audit_html("<html><head><title>   </title></head><body><h1>x</h1></body></html>");
        assert!(section
            .issues
            .iter()
            .any(|i| i.severity == Severity::Critical && i.message.contains("<title>")));
    }

    #[test]
    fn overlong_description_is_info() {
        let long = "x".repeat(161);
        let section = audit_html(&format!(
            r#"<html><head>
                <title>{GOOD_TITLE}</title>
                <meta name="description" content="{long}">
                <link rel="canonical" href="/"><meta property="og:image" content="x">
            </head><body><h1>Topic</h1></body></html>"#
        ));
        assert_eq!(section.score, 95);
        assert_eq!(section.details["descriptionLength"], 161);
    }

    #[test]
    fn multiple_h1s_warn_without_missing_critical() {
        let section = audit_html(&format!(
            "<html><head>{}</head><body><h1>One</h1><h1>Two</h1></body></html>",
            good_head()
        ));
        assert_eq!(section.score, 90);
        assert!(section
            .issues
            .iter()
            .any(|i| i.severity == Severity::Warning && i.message.contains("2 <h1>")));
        assert!(!section
            .issues
            .iter()
            .any(|i| i.severity == Severity::Critical));
    }

    #[test]
    fn missing_canonical_and_og_image_deduct_20() {
        let section = audit_html(&format!(
            r#"<html><head>
                <title>{GOOD_TITLE}</title>
                <meta name="description" content="{GOOD_DESCRIPTION}">
            </head><body><h1>Topic</h1></body></html>"#
        ));
        assert_eq!(section.score, 80);
    }
}
