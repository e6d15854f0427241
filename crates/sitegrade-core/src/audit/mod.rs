//! The audit engine: six independent category auditors and the
//! orchestrator that combines them into a weighted overall score.
//!
//! Each auditor is a pure function of the shared parsed document (plus raw
//! markup, url and response headers). None depends on another's output, so
//! evaluation order never affects the result.

pub mod accessibility;
pub mod content;
pub mod performance;
pub mod security;
pub mod seo;
pub mod ui;

use chrono::Utc;
use log::{debug, info};

use crate::dom::Document;
use crate::headers::ResponseHeaders;
use crate::report::{AuditSection, CategoryReports, ComprehensiveReport};

/// Everything an auditor may consult. The document is parsed once and
/// shared; the content auditor additionally re-strips the raw markup on
/// its own (see `content`).
pub struct AuditContext<'a> {
    pub document: &'a Document,
    pub raw_html: &'a str,
    pub url: &'a str,
    pub headers: &'a ResponseHeaders,
}

/// Category weights for the overall score. Must sum to 1.0; asserted in
/// `overall_score` and pinned by a unit test.
pub const PERFORMANCE_WEIGHT: f64 = 0.25;
pub const SEO_WEIGHT: f64 = 0.25;
pub const CONTENT_WEIGHT: f64 = 0.20;
pub const UI_WEIGHT: f64 = 0.15;
pub const ACCESSIBILITY_WEIGHT: f64 = 0.10;
pub const SECURITY_WEIGHT: f64 = 0.05;

/// Weighted overall score, rounded to the nearest integer.
pub fn overall_score(categories: &CategoryReports) -> u8 {
    let weighted: [(f64, &AuditSection); 6] = [
        (PERFORMANCE_WEIGHT, &categories.performance),
        (SEO_WEIGHT, &categories.seo),
        (CONTENT_WEIGHT, &categories.content),
        (UI_WEIGHT, &categories.ui),
        (SECURITY_WEIGHT, &categories.security),
        (ACCESSIBILITY_WEIGHT, &categories.accessibility),
    ];

    debug_assert!(
        (weighted.iter().map(|(w, _)| w).sum::<f64>() - 1.0).abs() < 1e-9,
        "category weights must sum to 1.0"
    );

    weighted
        .iter()
        .map(|(weight, section)| weight * f64::from(section.score))
        .sum::<f64>()
        .round() as u8
}

/// Audit a page and assemble the full report.
///
/// `url` is used only for the HTTPS check and report metadata; `html` is
/// the already-decoded markup. The call is pure apart from the timestamp:
/// identical inputs yield identical reports modulo `timestamp`.
pub fn run(url: &str, html: &str, headers: &ResponseHeaders) -> ComprehensiveReport {
    let document = Document::parse(html);
    let ctx = AuditContext {
        document: &document,
        raw_html: html,
        url,
        headers,
    };

    let categories = CategoryReports {
        performance: performance::audit(&ctx),
        seo: seo::audit(&ctx),
        ui: ui::audit(&ctx),
        accessibility: accessibility::audit(&ctx),
        security: security::audit(&ctx),
        content: content::audit(&ctx),
    };

    debug!(
        "category scores for {url}: performance={} seo={} ui={} accessibility={} security={} content={}",
        categories.performance.score,
        categories.seo.score,
        categories.ui.score,
        categories.accessibility.score,
        categories.security.score,
        categories.content.score,
    );

    let overall = overall_score(&categories);
    info!("audited {url}: overall score {overall}/100");

    ComprehensiveReport {
        url: url.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        overall_score: overall,
        categories,
    }
}
