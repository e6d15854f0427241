//! Report types shared by all auditors.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Impact classification for an audit issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks core function of the page.
    Critical,

    /// Degrades quality.
    Warning,

    /// Minor or stylistic.
    Info,
}

/// A single finding with an actionable recommendation.
///
/// Created at detection time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditIssue {
    pub severity: Severity,
    pub message: String,
    pub recommendation: String,
}

impl AuditIssue {
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            recommendation: recommendation.into(),
        }
    }

    pub fn critical(message: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Self::new(Severity::Critical, message, recommendation)
    }

    pub fn warning(message: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message, recommendation)
    }

    pub fn info(message: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Self::new(Severity::Info, message, recommendation)
    }
}

/// Result for one audit category: a 0-100 score, the issues found, and
/// auxiliary measurements keyed by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSection {
    pub score: u8,
    pub issues: Vec<AuditIssue>,
    pub details: BTreeMap<String, JsonValue>,
}

impl AuditSection {
    /// Build a section from an accumulated score. Deductions only ever
    /// subtract from 100, so the ceiling clamp cannot fire today; both
    /// bounds are enforced regardless since [0, 100] is the invariant.
    pub fn new(
        score: i32,
        issues: Vec<AuditIssue>,
        details: BTreeMap<String, JsonValue>,
    ) -> Self {
        Self {
            score: score.clamp(0, 100) as u8,
            issues,
            details,
        }
    }
}

/// Per-category sections of a full audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReports {
    pub performance: AuditSection,
    pub seo: AuditSection,
    pub ui: AuditSection,
    pub accessibility: AuditSection,
    pub security: AuditSection,
    pub content: AuditSection,
}

/// Full audit output for one page: echoed url, RFC 3339 timestamp, the
/// weighted overall score and the six category sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveReport {
    pub url: String,
    pub timestamp: String,
    pub overall_score: u8,
    pub categories: CategoryReports,
}
