//! # sitegrade-core
//!
//! Rule-based website quality auditing over raw HTML and response headers.
//!
//! This library provides:
//! - Lenient HTML parsing with CSS-selector queries
//! - Six independent category auditors (performance, SEO, UI,
//!   accessibility, security, content), each yielding a 0-100 score and a
//!   list of actionable issues
//! - A weighted overall score combining the six categories
//!
//! The engine performs no I/O: a fetcher supplies `(url, html, headers)`
//! and a renderer consumes the [`ComprehensiveReport`]. Malformed markup is
//! recovered best-effort and never causes an error.
//!
//! ## Example
//!
//! ```
//! use sitegrade_core::{run, ResponseHeaders};
//!
//! let html = r#"
//!     <html lang="en">
//!       <head><title>Quality reports for every page</title></head>
//!       <body><h1>Reports</h1></body>
//!     </html>
//! "#;
//!
//! let headers: ResponseHeaders = [
//!     ("strict-transport-security", "max-age=63072000"),
//!     ("x-frame-options", "DENY"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let report = run("https://example.com/reports", html, &headers);
//! assert!(report.overall_score <= 100);
//! assert_eq!(report.categories.security.score, 100);
//! ```

pub mod audit;
pub mod dom;
pub mod headers;
pub mod report;

// Re-export the public surface
pub use audit::{overall_score, run, AuditContext};
pub use dom::Document;
pub use headers::ResponseHeaders;
pub use report::{
    AuditIssue, AuditSection, CategoryReports, ComprehensiveReport, Severity,
};
