#![forbid(unsafe_code)]

//! Catalog linter for the translation pipeline.
//!
//! Runs the strict validation pass the runtime deliberately skips:
//! duplicate keys with conflicting translations, `%N` placeholder drift
//! between source and translation, and (optionally) a per-locale coverage
//! table against the base catalog. Meant for CI and translators, never
//! shipped with the game.

mod cli;

use std::process::ExitCode;

use soi_i18n::{CatalogLoader, lint, load};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let options = cli::Options::parse_or_exit();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut loader = CatalogLoader::new(options.base.clone());
    let mut findings = 0usize;
    let mut failures = 0usize;

    for path in &options.catalogs {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                eprintln!("{}: unreadable: {err}", path.display());
                failures += 1;
                continue;
            }
        };
        let locale = match load::document_locale(&bytes) {
            Ok(locale) => locale,
            Err(err) => {
                eprintln!("{}: {err}", path.display());
                failures += 1;
                continue;
            }
        };
        match lint::lint_document(&locale, &bytes) {
            Ok(document_findings) => {
                for finding in &document_findings {
                    println!("{finding}");
                }
                findings += document_findings.len();
                loader.add_document(&locale, &bytes);
            }
            Err(err) => {
                eprintln!("{}: {err}", path.display());
                failures += 1;
            }
        }
    }

    if options.coverage {
        match loader.finish() {
            Ok(registry) => print_coverage(&lint::coverage(&registry)),
            Err(err) => {
                eprintln!("coverage unavailable: {err}");
                failures += 1;
            }
        }
    }

    if findings == 0 && failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_coverage(report: &lint::CoverageReport) {
    println!();
    println!(
        "{:<8} {:>10} {:>10} {:>8} {:>8}",
        "locale", "translated", "unfinished", "missing", "percent"
    );
    for coverage in &report.locales {
        println!(
            "{:<8} {:>10} {:>10} {:>8} {:>7.1}%",
            coverage.locale.to_string(),
            coverage.translated,
            coverage.unfinished,
            coverage.missing.len(),
            coverage.percent(report.total_keys),
        );
    }
    for coverage in &report.locales {
        for key in &coverage.missing {
            println!(
                "{}: missing {:?} in context {:?}",
                coverage.locale, key.source, key.context
            );
        }
    }
}
