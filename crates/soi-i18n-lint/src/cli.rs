//! Command-line argument parsing for the catalog linter.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.

use std::path::PathBuf;
use std::process;

use soi_i18n::LocaleTag;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
soi-i18n-lint — catalog validation for Standard of Iron translations

USAGE:
    soi-i18n-lint [OPTIONS] <CATALOG>...

ARGS:
    <CATALOG>...         Catalog JSON documents; each declares its own locale

OPTIONS:
    --base=TAG           Base (source) locale tag (default: en_US)
    --coverage           Print a per-locale coverage table
    --help, -h           Show this help message
    --version, -V        Show version

Checks every document in strict mode: duplicate keys with conflicting
translations and %N placeholder drift between source and translation are
reported as findings. Exit status is 1 when any finding or load failure
occurs, 0 otherwise.
";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub base: LocaleTag,
    pub coverage: bool,
    pub catalogs: Vec<PathBuf>,
}

impl Options {
    /// Parse `std::env::args`, printing help/version or an error and
    /// exiting as appropriate.
    pub fn parse_or_exit() -> Self {
        match parse(std::env::args().skip(1)) {
            Ok(Parsed::Options(options)) => options,
            Ok(Parsed::Help) => {
                print!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Parsed::Version) => {
                println!("soi-i18n-lint {VERSION}");
                process::exit(0);
            }
            Err(message) => {
                eprintln!("error: {message}");
                eprintln!("run with --help for usage");
                process::exit(2);
            }
        }
    }
}

pub enum Parsed {
    Options(Options),
    Help,
    Version,
}

pub fn parse(args: impl Iterator<Item = String>) -> Result<Parsed, String> {
    let mut base: LocaleTag = "en_US"
        .parse()
        .expect("default base tag is well-formed");
    let mut coverage = false;
    let mut catalogs = Vec::new();

    for arg in args {
        if arg == "--help" || arg == "-h" {
            return Ok(Parsed::Help);
        } else if arg == "--version" || arg == "-V" {
            return Ok(Parsed::Version);
        } else if arg == "--coverage" {
            coverage = true;
        } else if let Some(value) = arg.strip_prefix("--base=") {
            base = value
                .parse()
                .map_err(|_| format!("invalid locale tag {value:?} for --base"))?;
        } else if arg.starts_with('-') && arg != "-" {
            return Err(format!("unknown option {arg:?}"));
        } else {
            catalogs.push(PathBuf::from(arg));
        }
    }

    if catalogs.is_empty() {
        return Err("no catalog documents given".to_string());
    }

    Ok(Parsed::Options(Options {
        base,
        coverage,
        catalogs,
    }))
}
