#![forbid(unsafe_code)]

//! Localization engine for Standard of Iron.
//!
//! # Role in the game
//! The UI layer renders every visible label through this crate. At startup
//! the game loads one message catalog per locale (German, English, Brazilian
//! Portuguese), publishes them in a [`CatalogRegistry`], and from then on
//! calls [`LookupResolver::resolve`] once per displayed string. A settings
//! action may switch the active locale at any time while render threads keep
//! reading.
//!
//! # Primary responsibilities
//! - **Catalog loading**: parse per-locale catalog documents into immutable
//!   [`Catalog`] values, skipping malformed locales without aborting startup.
//! - **Locale fallback**: exact `(language, region)` match, then language-only
//!   match, then the base locale.
//! - **Lookup**: map `(context, source text)` to locale-appropriate text,
//!   degrading to the source text for missing or unfinished translations.
//! - **Placeholder substitution**: `%1`, `%2`, … ordinal tokens replaced by
//!   caller-supplied values in a single pass.
//! - **Catalog linting**: duplicate-key conflicts, placeholder parity, and
//!   coverage reporting for the translation tooling.
//!
//! # How it fits in the system
//! The engine is a synchronous, call-and-return library with no background
//! tasks. Catalogs are built once and never mutated afterwards; the active
//! locale is a single atomic index, so render-time lookups never take a lock.

pub mod catalog;
pub mod format;
pub mod lint;
pub mod load;
pub mod locale;
pub mod registry;
pub mod resolve;

pub use catalog::{Catalog, Location, MessageKey, TranslationEntry, TranslationStatus};
pub use lint::{CoverageReport, LintFinding, LocaleCoverage};
pub use load::{CatalogLoader, LoadError};
pub use locale::{InvalidLocaleTag, LocaleTag};
pub use registry::CatalogRegistry;
pub use resolve::{LookupResolver, StatsSnapshot};
