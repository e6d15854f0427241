//! sitegrade: audit a live page for quality issues from the terminal.
//!
//! Fetches the page, hands `(url, html, headers)` to `sitegrade-core` and
//! prints the report as readable text or JSON.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use log::debug;
use url::Url;

use sitegrade_core::{run, AuditSection, ComprehensiveReport, ResponseHeaders, Severity};

const APP_NAME: &str = "sitegrade";
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq)]
enum OutputMode {
    Text,
    Json,
}

#[derive(Debug, PartialEq)]
struct CliOptions {
    url: String,
    mode: OutputMode,
    save_target: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
enum CliCommand {
    Run(CliOptions),
    Help,
    Version,
}

fn parse_arguments(args: &[String]) -> Result<CliCommand> {
    if args.is_empty() {
        return Ok(CliCommand::Help);
    }

    let mut url: Option<String> = None;
    let mut mode = OutputMode::Text;
    let mut save_target: Option<PathBuf> = None;
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if matches!(arg.as_str(), "-h" | "--help") {
            return Ok(CliCommand::Help);
        }

        if matches!(arg.as_str(), "-v" | "--version") {
            return Ok(CliCommand::Version);
        }

        if matches!(arg.as_str(), "-j" | "--json") {
            mode = OutputMode::Json;
            i += 1;
            continue;
        }

        if let Some(value) = arg.strip_prefix("--save=") {
            if save_target.is_some() {
                return Err(anyhow!("--save specified multiple times"));
            }
            save_target = Some(if value.is_empty() {
                PathBuf::from(".")
            } else {
                PathBuf::from(value)
            });
            i += 1;
            continue;
        }

        if matches!(arg.as_str(), "-s" | "--save") {
            if save_target.is_some() {
                return Err(anyhow!("--save specified multiple times"));
            }
            let next_is_path = url.is_some()
                && args
                    .get(i + 1)
                    .map(|next| !next.starts_with('-'))
                    .unwrap_or(false);

            if next_is_path {
                save_target = Some(PathBuf::from(args[i + 1].clone()));
                i += 2;
            } else {
                save_target = Some(PathBuf::from("."));
                i += 1;
            }
            continue;
        }

        if arg.starts_with('-') {
            return Err(anyhow!("unknown option: {arg}"));
        }

        if url.is_some() {
            return Err(anyhow!("multiple URLs supplied"));
        }
        url = Some(arg.clone());
        i += 1;
    }

    let url = url.ok_or_else(|| anyhow!("no URL supplied"))?;
    Ok(CliCommand::Run(CliOptions {
        url,
        mode,
        save_target,
    }))
}

fn print_help() {
    println!(
        "{APP_NAME} — rule-based website quality audits

Usage: {APP_NAME} [OPTIONS] <url>

Fetches the page and scores it across six categories (performance, SEO,
UI, accessibility, security, content), 0-100 each plus a weighted overall.

Options:
  -j, --json           Print the full report as JSON
  -s, --save [PATH]    Also write the JSON report to PATH (default: ./<host>-audit.json)
      --save=PATH
  -h, --help           Show this help
  -v, --version        Show version

Set RUST_LOG=debug for per-category logging."
    );
}

/// Parse the URL argument; a missing scheme defaults to https.
fn parse_target_url(input: &str) -> Result<Url> {
    let candidate = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{input}")
    };
    Url::parse(&candidate).with_context(|| format!("invalid URL: {input}"))
}

/// Fetch the page, keeping the post-redirect URL and the response headers.
async fn fetch_page(url: &Url) -> Result<(String, String, ResponseHeaders)> {
    let client = reqwest::Client::builder()
        .user_agent(format!("Mozilla/5.0 (compatible; {APP_NAME}/{VERSION})"))
        .build()?;

    let response = client
        .get(url.as_str())
        .send()
        .await
        .context("failed to fetch URL")?;

    let final_url = response.url().to_string();
    let headers: ResponseHeaders = response
        .headers()
        .iter()
        .map(|(name, value)| (name.as_str(), value.to_str().unwrap_or("")))
        .collect();

    debug!(
        "fetched {final_url}: status {}, {} headers",
        response.status(),
        headers.len()
    );

    let html = response
        .text()
        .await
        .context("failed to read response body")?;

    Ok((final_url, html, headers))
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "critical",
        Severity::Warning => "warning",
        Severity::Info => "info",
    }
}

fn format_section(out: &mut String, name: &str, section: &AuditSection) {
    out.push_str(&format!("  {name:<14} {:>3}/100\n", section.score));
    for issue in &section.issues {
        out.push_str(&format!(
            "    [{}] {} — {}\n",
            severity_label(issue.severity),
            issue.message,
            issue.recommendation
        ));
    }
}

fn format_report(report: &ComprehensiveReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Audit of {} ({})\n\n", report.url, report.timestamp));

    let categories = &report.categories;
    format_section(&mut out, "performance", &categories.performance);
    format_section(&mut out, "seo", &categories.seo);
    format_section(&mut out, "ui", &categories.ui);
    format_section(&mut out, "accessibility", &categories.accessibility);
    format_section(&mut out, "security", &categories.security);
    format_section(&mut out, "content", &categories.content);

    out.push_str(&format!("\nOverall score: {}/100\n", report.overall_score));
    out
}

/// A directory target gets a filename derived from the audited host.
fn resolve_save_path(target: PathBuf, url: &Url) -> PathBuf {
    if target.is_dir() {
        let host = url.host_str().unwrap_or("report");
        target.join(format!("{host}-audit.json"))
    } else {
        target
    }
}

async fn execute(options: CliOptions) -> Result<()> {
    let url = parse_target_url(&options.url)?;
    let (final_url, html, headers) = fetch_page(&url).await?;
    let report = run(&final_url, &html, &headers);

    match options.mode {
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputMode::Text => print!("{}", format_report(&report)),
    }

    if let Some(target) = options.save_target {
        let path = resolve_save_path(target, &url);
        fs::write(&path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Saved report to {}", path.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    match parse_arguments(&args) {
        Ok(CliCommand::Help) => {
            print_help();
            ExitCode::SUCCESS
        }
        Ok(CliCommand::Version) => {
            println!("{APP_NAME} {VERSION}");
            ExitCode::SUCCESS
        }
        Ok(CliCommand::Run(options)) => match execute(options).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("Error: {err:#}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            eprintln!("Error: {err:#}");
            eprintln!("Run `{APP_NAME} --help` for usage.");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_shows_help() {
        assert_eq!(parse_arguments(&[]).unwrap(), CliCommand::Help);
    }

    #[test]
    fn help_flag_wins_anywhere() {
        let parsed = parse_arguments(&args(&["https://example.com", "--help"])).unwrap();
        assert_eq!(parsed, CliCommand::Help);
    }

    #[test]
    fn bare_url_runs_in_text_mode() {
        let parsed = parse_arguments(&args(&["https://example.com"])).unwrap();
        assert_eq!(
            parsed,
            CliCommand::Run(CliOptions {
                url: "https://example.com".to_string(),
                mode: OutputMode::Text,
                save_target: None,
            })
        );
    }

    #[test]
    fn json_flag_switches_mode() {
        let parsed = parse_arguments(&args(&["-j", "https://example.com"])).unwrap();
        match parsed {
            CliCommand::Run(options) => assert_eq!(options.mode, OutputMode::Json),
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn save_with_explicit_path() {
        let parsed =
            parse_arguments(&args(&["https://example.com", "--save=reports/out.json"])).unwrap();
        match parsed {
            CliCommand::Run(options) => {
                assert_eq!(options.save_target, Some(PathBuf::from("reports/out.json")));
            }
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn save_after_url_takes_following_path() {
        let parsed = parse_arguments(&args(&["https://example.com", "-s", "out.json"])).unwrap();
        match parsed {
            CliCommand::Run(options) => {
                assert_eq!(options.save_target, Some(PathBuf::from("out.json")));
            }
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn bare_save_defaults_to_current_directory() {
        let parsed = parse_arguments(&args(&["-s", "https://example.com"])).unwrap();
        match parsed {
            CliCommand::Run(options) => {
                assert_eq!(options.url, "https://example.com");
                assert_eq!(options.save_target, Some(PathBuf::from(".")));
            }
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn unknown_option_is_rejected() {
        assert!(parse_arguments(&args(&["--frobnicate", "https://example.com"])).is_err());
    }

    #[test]
    fn multiple_urls_are_rejected() {
        assert!(parse_arguments(&args(&["https://a.com", "https://b.com"])).is_err());
    }

    #[test]
    fn flags_without_url_are_rejected() {
        assert!(parse_arguments(&args(&["-j"])).is_err());
    }

    #[test]
    fn scheme_defaults_to_https() {
        let url = parse_target_url("example.com/page").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");

        let url = parse_target_url("http://example.com").unwrap();
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn formatted_report_lists_every_category() {
        let headers = ResponseHeaders::new();
        let report = run("http://example.com", "<html><body></body></html>", &headers);
        let text = format_report(&report);

        for name in ["performance", "seo", "ui", "accessibility", "security", "content"] {
            assert!(text.contains(name), "missing {name} in:\n{text}");
        }
        assert!(text.contains("[critical] Page is not served over HTTPS"));
        assert!(text.contains(&format!("Overall score: {}/100", report.overall_score)));
    }

    #[test]
    fn save_path_resolution() {
        let url = Url::parse("https://example.com/page").unwrap();
        assert_eq!(
            resolve_save_path(PathBuf::from("."), &url),
            PathBuf::from("./example.com-audit.json")
        );
        assert_eq!(
            resolve_save_path(PathBuf::from("out.json"), &url),
            PathBuf::from("out.json")
        );
    }
}
