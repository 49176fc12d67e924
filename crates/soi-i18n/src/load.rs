//! Catalog document parsing and batch loading.
//!
//! One document per locale, produced by the translation pipeline: a JSON
//! rendition of the message records (context, source text, translation,
//! status flag, source locations). The engine only requires this record
//! shape; the pipeline owns the syntax and may add fields, which are
//! ignored here.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Malformed document | Not JSON / wrong shape | Locale skipped, others load |
//! | Empty document | Zero message records | Loads with a warning |
//! | Duplicate key | Same key twice in one document | Last occurrence wins |
//! | No catalogs at all | Every document rejected | [`LoadError::NoCatalogs`] |

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::{Catalog, Location, MessageKey, TranslationEntry, TranslationStatus};
use crate::locale::LocaleTag;
use crate::registry::CatalogRegistry;

/// Load-time errors.
///
/// Only [`LoadError::NoCatalogs`] is fatal; everything else degrades to
/// skipping or warning so startup continues with whatever parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The document could not be parsed at all. The locale is carried as a
    /// plain string because a corrupt document may not yield a usable tag.
    Malformed { locale: String, reason: String },
    /// The document parsed but contains zero entries. Warning-grade: the
    /// locale still loads and behaves as a fallback-to-source catalog.
    Empty { locale: String },
    /// Not a single locale loaded successfully. There is no text to show.
    NoCatalogs,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { locale, reason } => {
                write!(f, "catalog for {locale} is malformed: {reason}")
            }
            Self::Empty { locale } => write!(f, "catalog for {locale} contains no entries"),
            Self::NoCatalogs => f.write_str("no locale catalogs loaded"),
        }
    }
}

impl std::error::Error for LoadError {}

#[derive(Deserialize)]
struct CatalogDoc {
    language: String,
    #[serde(default)]
    contexts: Vec<ContextDoc>,
}

#[derive(Deserialize)]
struct ContextDoc {
    name: String,
    #[serde(default)]
    messages: Vec<MessageDoc>,
}

#[derive(Deserialize)]
struct MessageDoc {
    source: String,
    #[serde(default)]
    translation: Option<String>,
    #[serde(default)]
    unfinished: bool,
    #[serde(default)]
    disambiguation: Option<String>,
    #[serde(default)]
    locations: Vec<LocationDoc>,
}

#[derive(Deserialize)]
struct LocationDoc {
    file: String,
    line: u32,
}

/// One message record in document order, before duplicate collapsing.
/// The lint pass walks these; `load` folds them into a [`Catalog`].
pub(crate) struct RawMessage {
    pub key: MessageKey,
    pub text: String,
    pub unfinished: bool,
    pub locations: Vec<Location>,
}

pub(crate) fn parse_messages(
    locale: &LocaleTag,
    bytes: &[u8],
) -> Result<Vec<RawMessage>, LoadError> {
    let doc: CatalogDoc = serde_json::from_slice(bytes).map_err(|e| LoadError::Malformed {
        locale: locale.to_string(),
        reason: e.to_string(),
    })?;
    if let Ok(document_tag) = doc.language.parse::<LocaleTag>() {
        if document_tag != *locale {
            tracing::warn!(
                requested = %locale,
                document = %document_tag,
                "catalog language field disagrees with requested locale"
            );
        }
    }
    let mut records = Vec::new();
    for context in doc.contexts {
        for message in context.messages {
            let text = message.translation.unwrap_or_default();
            // An empty translation is unfinished even without the flag;
            // the flag forces unfinished regardless of text.
            let unfinished = message.unfinished || text.is_empty();
            let key = match message.disambiguation {
                Some(d) => {
                    MessageKey::with_disambiguation(context.name.clone(), message.source, d)
                }
                None => MessageKey::new(context.name.clone(), message.source),
            };
            records.push(RawMessage {
                key,
                text,
                unfinished,
                locations: message
                    .locations
                    .into_iter()
                    .map(|l| Location { file: l.file, line: l.line })
                    .collect(),
            });
        }
    }
    Ok(records)
}

/// Parse one locale's catalog document.
///
/// Duplicate keys within the document resolve last-occurrence-wins; records
/// with absent or empty translation text are tagged
/// [`TranslationStatus::Unfinished`].
///
/// # Errors
/// [`LoadError::Malformed`] when the document cannot be decomposed into
/// message records at all. An empty document is not an error here; the
/// [`CatalogLoader`] warns about it.
pub fn load(locale: &LocaleTag, bytes: &[u8]) -> Result<Catalog, LoadError> {
    let records = parse_messages(locale, bytes)?;
    let mut catalog = Catalog::new(locale.clone());
    for record in records {
        let status = if record.unfinished {
            TranslationStatus::Unfinished
        } else {
            TranslationStatus::Finished
        };
        catalog.insert(
            record.key,
            TranslationEntry {
                text: record.text,
                status,
                locations: record.locations,
            },
        );
    }
    Ok(catalog)
}

/// The language tag a document declares for itself.
///
/// Lets tooling process a directory of catalogs without a locale manifest.
///
/// # Errors
/// [`LoadError::Malformed`] when the document is not JSON or its `language`
/// field is not a locale tag.
pub fn document_locale(bytes: &[u8]) -> Result<LocaleTag, LoadError> {
    #[derive(Deserialize)]
    struct Header {
        language: String,
    }
    let header: Header = serde_json::from_slice(bytes).map_err(|e| LoadError::Malformed {
        locale: "unknown".to_string(),
        reason: e.to_string(),
    })?;
    header.language.parse().map_err(|_| LoadError::Malformed {
        locale: header.language.clone(),
        reason: format!("unrecognized language tag {:?}", header.language),
    })
}

/// Batch loader: collects per-locale documents, skips the broken ones, and
/// publishes the survivors as a [`CatalogRegistry`].
///
/// Startup never aborts on a single bad catalog — the failure is logged and
/// recorded, and loading continues. Only a completely empty result is fatal.
pub struct CatalogLoader {
    base: LocaleTag,
    catalogs: Vec<Catalog>,
    issues: Vec<LoadError>,
}

impl CatalogLoader {
    /// Start a load batch. `base` is the locale whose text is authored
    /// directly in the UI and serves as the universal fallback.
    #[must_use]
    pub fn new(base: LocaleTag) -> Self {
        Self {
            base,
            catalogs: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Parse and admit one locale's document. A malformed document is
    /// logged, recorded in [`issues`](Self::issues), and skipped; loading a
    /// locale twice replaces its catalog wholesale.
    pub fn add_document(&mut self, locale: &LocaleTag, bytes: &[u8]) {
        match load(locale, bytes) {
            Ok(catalog) => {
                if catalog.is_empty() {
                    tracing::warn!(locale = %locale, "catalog contains no entries");
                    self.issues.push(LoadError::Empty {
                        locale: locale.to_string(),
                    });
                }
                tracing::info!(locale = %locale, entries = catalog.len(), "catalog loaded");
                match self.catalogs.iter().position(|c| c.locale() == locale) {
                    Some(i) => self.catalogs[i] = catalog,
                    None => self.catalogs.push(catalog),
                }
            }
            Err(err) => {
                tracing::warn!(locale = %locale, error = %err, "catalog rejected");
                self.issues.push(err);
            }
        }
    }

    /// Read a document from disk and admit it. I/O failures are treated
    /// like malformed documents: logged, recorded, skipped.
    pub fn add_path(&mut self, locale: &LocaleTag, path: &Path) {
        match std::fs::read(path) {
            Ok(bytes) => self.add_document(locale, &bytes),
            Err(err) => {
                let err = LoadError::Malformed {
                    locale: locale.to_string(),
                    reason: format!("{}: {err}", path.display()),
                };
                tracing::warn!(locale = %locale, error = %err, "catalog unreadable");
                self.issues.push(err);
            }
        }
    }

    /// Non-fatal problems recorded so far (rejected or empty documents).
    #[must_use]
    pub fn issues(&self) -> &[LoadError] {
        &self.issues
    }

    /// Publish the loaded catalogs as a registry.
    ///
    /// # Errors
    /// [`LoadError::NoCatalogs`] when not a single document was admitted.
    pub fn finish(self) -> Result<CatalogRegistry, LoadError> {
        CatalogRegistry::from_catalogs(self.catalogs, self.base)
    }
}
