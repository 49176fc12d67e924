//! Catalog validation for the translation tooling.
//!
//! Runtime loading is deliberately forgiving (last duplicate wins, missing
//! translations degrade to source text). This module is the strict
//! counterpart the catalog authors run: it re-walks the raw record sequence
//! of a document and reports what the forgiving path papered over, plus
//! per-locale coverage against the base catalog.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::catalog::MessageKey;
use crate::format;
use crate::load::{self, LoadError};
use crate::locale::LocaleTag;
use crate::registry::CatalogRegistry;

/// A problem found in a catalog document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintFinding {
    /// The same key occurs more than once with *different* translated text.
    /// Identical repeats are benign (the extraction tool emits one record
    /// per UI location) and are not reported.
    DuplicateKeyConflict {
        locale: LocaleTag,
        key: MessageKey,
        /// Text of the earlier occurrence, discarded by last-wins loading.
        discarded: String,
        /// Text of the later occurrence, the one the runtime serves.
        kept: String,
    },
    /// A finished translation references a different set of `%N` ordinals
    /// than its source text.
    PlaceholderMismatch {
        locale: LocaleTag,
        key: MessageKey,
        source_ordinals: Vec<u32>,
        translation_ordinals: Vec<u32>,
    },
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKeyConflict {
                locale,
                key,
                discarded,
                kept,
            } => write!(
                f,
                "{locale}: duplicate key {:?} in context {:?} with conflicting translations: {discarded:?} vs {kept:?}",
                key.source, key.context
            ),
            Self::PlaceholderMismatch {
                locale,
                key,
                source_ordinals,
                translation_ordinals,
            } => write!(
                f,
                "{locale}: placeholder mismatch for {:?} in context {:?}: source references {source_ordinals:?}, translation references {translation_ordinals:?}",
                key.source, key.context
            ),
        }
    }
}

/// Strict-mode pass over one catalog document.
///
/// Reports duplicate-key conflicts and placeholder parity violations in
/// record order. Never runs on the runtime load path.
///
/// # Errors
/// [`LoadError::Malformed`] when the document cannot be parsed; lint
/// requires a structurally valid document.
pub fn lint_document(locale: &LocaleTag, bytes: &[u8]) -> Result<Vec<LintFinding>, LoadError> {
    let records = load::parse_messages(locale, bytes)?;
    let mut findings = Vec::new();
    let mut seen: FxHashMap<MessageKey, String> = FxHashMap::default();
    for record in &records {
        if !record.unfinished {
            let source_ordinals = format::ordinals(&record.key.source);
            let translation_ordinals = format::ordinals(&record.text);
            if source_ordinals != translation_ordinals {
                findings.push(LintFinding::PlaceholderMismatch {
                    locale: locale.clone(),
                    key: record.key.clone(),
                    source_ordinals,
                    translation_ordinals,
                });
            }
        }
        match seen.insert(record.key.clone(), record.text.clone()) {
            Some(previous) if previous != record.text => {
                findings.push(LintFinding::DuplicateKeyConflict {
                    locale: locale.clone(),
                    key: record.key.clone(),
                    discarded: previous,
                    kept: record.text.clone(),
                });
            }
            _ => {}
        }
    }
    Ok(findings)
}

/// Per-locale coverage against the base catalog's key set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCoverage {
    pub locale: LocaleTag,
    /// Base keys with a finished translation.
    pub translated: usize,
    /// Base keys present but unfinished.
    pub unfinished: usize,
    /// Base keys absent from this catalog, sorted.
    pub missing: Vec<MessageKey>,
}

impl LocaleCoverage {
    /// Finished translations as a share of the base key set, 0.0–100.0.
    #[must_use]
    pub fn percent(&self, total_keys: usize) -> f32 {
        if total_keys == 0 {
            100.0
        } else {
            (self.translated as f32 / total_keys as f32) * 100.0
        }
    }
}

/// Coverage of every loaded locale against the base catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    /// Number of keys in the base catalog.
    pub total_keys: usize,
    /// Per-locale coverage, in sorted locale order.
    pub locales: Vec<LocaleCoverage>,
}

/// Compute coverage for all catalogs in `registry`.
///
/// The base catalog is the reference key set; each locale is scored by how
/// many of those keys it translates. Keys a locale adds beyond the base set
/// do not count either way.
#[must_use]
pub fn coverage(registry: &CatalogRegistry) -> CoverageReport {
    let mut base_keys: Vec<MessageKey> =
        registry.base_catalog().iter().map(|(key, _)| key).collect();
    base_keys.sort();

    let locales = registry
        .catalogs()
        .map(|catalog| {
            let mut translated = 0;
            let mut unfinished = 0;
            let mut missing = Vec::new();
            for key in &base_keys {
                match catalog.entry(&key.context, &key.source, key.disambiguation.as_deref()) {
                    Some(entry) if entry.is_finished() => translated += 1,
                    Some(_) => unfinished += 1,
                    None => missing.push(key.clone()),
                }
            }
            LocaleCoverage {
                locale: catalog.locale().clone(),
                translated,
                unfinished,
                missing,
            }
        })
        .collect();

    CoverageReport {
        total_keys: base_keys.len(),
        locales,
    }
}
