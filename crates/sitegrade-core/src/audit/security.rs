//! Security checks over the url scheme and response headers.

use std::collections::BTreeMap;

use super::AuditContext;
use crate::report::{AuditIssue, AuditSection};

pub fn audit(ctx: &AuditContext<'_>) -> AuditSection {
    let mut score: i32 = 100;
    let mut issues = Vec::new();

    let is_https = ctx.url.starts_with("https://");
    if !is_https {
        score -= 40;
        issues.push(AuditIssue::critical(
            "Page is not served over HTTPS",
            "Obtain a TLS certificate and redirect all traffic to https://",
        ));
    }

    if !ctx.headers.contains("x-frame-options")
        && !ctx.headers.contains("content-security-policy")
    {
        score -= 5;
        issues.push(AuditIssue::info(
            "No clickjacking protection headers present",
            "Send X-Frame-Options or a Content-Security-Policy frame-ancestors directive",
        ));
    }

    // HSTS only makes sense once the site is on HTTPS.
    if is_https && !ctx.headers.contains("strict-transport-security") {
        score -= 5;
        issues.push(AuditIssue::info(
            "Strict-Transport-Security header is missing",
            "Send an HSTS header so browsers stay on HTTPS",
        ));
    }

    AuditSection::new(score, issues, BTreeMap::new())
}
