//! Performance heuristics inferred from markup structure.
//!
//! No real timing or byte sizes are measured; script/stylesheet counts,
//! image attributes and inline styles stand in as structural proxies.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use std::collections::BTreeMap;

use super::AuditContext;
use crate::report::{AuditIssue, AuditSection};

const MAX_SCRIPTS: usize = 20;
const MAX_LEGACY_FORMAT_IMAGES: usize = 5;
const MAX_INLINE_STYLES: usize = 50;
const MAX_STYLESHEETS: usize = 8;

static RE_RASTER_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(png|jpe?g)").expect("invalid raster regex"));
static RE_MODERN_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(webp|avif|svg)").expect("invalid modern regex"));

pub fn audit(ctx: &AuditContext<'_>) -> AuditSection {
    let mut score: i32 = 100;
    let mut issues = Vec::new();

    let script_count = ctx.document.count("script");
    if script_count > MAX_SCRIPTS {
        score -= 10;
        issues.push(AuditIssue::warning(
            format!("Page loads {script_count} script tags"),
            "Reduce or bundle scripts to cut request overhead and parse time",
        ));
    }

    let images = ctx.document.query_all("img");
    let image_count = images.len();

    // A single structural smell: deducted once no matter how many images
    // omit their dimensions.
    let missing_dimensions = images
        .iter()
        .filter(|img| {
            img.value().attr("width").is_none() || img.value().attr("height").is_none()
        })
        .count();
    if missing_dimensions > 0 {
        score -= 5;
        issues.push(AuditIssue::info(
            format!("{missing_dimensions} images are missing explicit width or height"),
            "Set explicit dimensions on images to avoid layout shift",
        ));
    }

    let legacy_format_count = images
        .iter()
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| RE_RASTER_SRC.is_match(src) && !RE_MODERN_SRC.is_match(src))
        .count();
    if legacy_format_count > MAX_LEGACY_FORMAT_IMAGES {
        score -= 15;
        issues.push(AuditIssue::warning(
            format!("{legacy_format_count} images use PNG/JPEG sources"),
            "Serve images in modern formats such as WebP or AVIF",
        ));
    }

    let inline_style_count = ctx.document.count("[style]");
    if inline_style_count > MAX_INLINE_STYLES {
        score -= 10;
        issues.push(AuditIssue::info(
            format!("{inline_style_count} elements carry inline style attributes"),
            "Move inline styles to CSS classes",
        ));
    }

    let stylesheet_count = ctx.document.count(r#"link[rel="stylesheet"]"#);
    if stylesheet_count > MAX_STYLESHEETS {
        score -= 10;
        issues.push(AuditIssue::warning(
            format!("Page links {stylesheet_count} stylesheets"),
            "Combine stylesheets to reduce render-blocking requests",
        ));
    }

    let details = BTreeMap::from([
        ("scriptCount".to_string(), json!(script_count)),
        ("imageCount".to_string(), json!(image_count)),
    ]);

    AuditSection::new(score, issues, details)
}
