//! Message catalogs: the per-locale mapping from message identity to
//! translated text.
//!
//! # Invariants
//!
//! 1. **Key uniqueness**: within one [`Catalog`], a [`MessageKey`] maps to at
//!    most one [`TranslationEntry`]. Inserting an existing key replaces the
//!    previous entry (last occurrence wins at load time).
//!
//! 2. **Immutability after publication**: a catalog handed to the registry
//!    is never mutated again. Lookups from any thread see a fully-formed
//!    structure.
//!
//! 3. **Locations never affect lookup**: source-code locations are carried
//!    for tooling only.

use rustc_hash::FxHashMap;

use crate::locale::LocaleTag;

/// Identity of a translatable message.
///
/// `context` groups messages by the UI surface they belong to (a panel or
/// screen name); `source` is the canonical base-locale string, byte-exact
/// including embedded newlines and `%N` tokens; `disambiguation`
/// distinguishes two messages that share context and source text but must
/// translate differently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageKey {
    pub context: String,
    pub source: String,
    pub disambiguation: Option<String>,
}

impl MessageKey {
    #[must_use]
    pub fn new(context: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            source: source.into(),
            disambiguation: None,
        }
    }

    #[must_use]
    pub fn with_disambiguation(
        context: impl Into<String>,
        source: impl Into<String>,
        disambiguation: impl Into<String>,
    ) -> Self {
        Self {
            context: context.into(),
            source: source.into(),
            disambiguation: Some(disambiguation.into()),
        }
    }
}

/// Translation completion status.
///
/// `Unfinished` entries exist in the catalog but their text is absent or not
/// yet approved; lookups fall back to the source string instead of showing
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationStatus {
    Finished,
    Unfinished,
}

/// A source-code location annotation, carried for tooling and traceability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: String,
    pub line: u32,
}

/// One translated message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    /// Translated text. May be empty when the entry is unfinished.
    pub text: String,
    pub status: TranslationStatus,
    /// Where the source string appears in the UI sources, in document order.
    pub locations: Vec<Location>,
}

impl TranslationEntry {
    #[must_use]
    pub fn finished(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: TranslationStatus::Finished,
            locations: Vec::new(),
        }
    }

    #[must_use]
    pub fn unfinished() -> Self {
        Self {
            text: String::new(),
            status: TranslationStatus::Unfinished,
            locations: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == TranslationStatus::Finished
    }
}

/// Entries sharing one `(context, source)` pair: the undisambiguated entry
/// plus any disambiguated variants. Variants stay in a small vector — the
/// data has at most a handful per source string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct MessageSlot {
    default: Option<TranslationEntry>,
    variants: Vec<(String, TranslationEntry)>,
}

/// The complete set of translated messages for one locale.
///
/// Storage is a two-level map (context → source → entry) so the render-path
/// lookup works from borrowed `&str` keys without allocating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    locale: LocaleTag,
    contexts: FxHashMap<String, FxHashMap<String, MessageSlot>>,
    len: usize,
}

impl Catalog {
    /// Create an empty catalog for `locale`.
    #[must_use]
    pub fn new(locale: LocaleTag) -> Self {
        Self {
            locale,
            contexts: FxHashMap::default(),
            len: 0,
        }
    }

    /// The locale this catalog translates into.
    #[must_use]
    pub fn locale(&self) -> &LocaleTag {
        &self.locale
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert an entry, replacing any existing entry for the same key.
    ///
    /// Returns the displaced entry, so loaders can implement last-wins
    /// duplicate handling and linters can detect conflicting repeats.
    pub fn insert(&mut self, key: MessageKey, entry: TranslationEntry) -> Option<TranslationEntry> {
        let slot = self
            .contexts
            .entry(key.context)
            .or_default()
            .entry(key.source)
            .or_default();
        let displaced = match key.disambiguation {
            None => slot.default.replace(entry),
            Some(d) => match slot.variants.iter().position(|(v, _)| *v == d) {
                Some(i) => Some(std::mem::replace(&mut slot.variants[i].1, entry)),
                None => {
                    slot.variants.push((d, entry));
                    None
                }
            },
        };
        if displaced.is_none() {
            self.len += 1;
        }
        displaced
    }

    /// Look up an entry by borrowed key parts. Allocation-free.
    #[must_use]
    pub fn entry(
        &self,
        context: &str,
        source: &str,
        disambiguation: Option<&str>,
    ) -> Option<&TranslationEntry> {
        let slot = self.contexts.get(context)?.get(source)?;
        match disambiguation {
            None => slot.default.as_ref(),
            Some(d) => slot
                .variants
                .iter()
                .find(|(v, _)| v.as_str() == d)
                .map(|(_, e)| e),
        }
    }

    /// Iterate over all `(key, entry)` pairs, in unspecified order.
    ///
    /// Reconstructs owned keys per item; meant for lint and coverage
    /// tooling, not the render path.
    pub fn iter(&self) -> impl Iterator<Item = (MessageKey, &TranslationEntry)> + '_ {
        self.contexts.iter().flat_map(|(context, sources)| {
            sources.iter().flat_map(move |(source, slot)| {
                let default = slot
                    .default
                    .iter()
                    .map(move |entry| (MessageKey::new(context.clone(), source.clone()), entry));
                let variants = slot.variants.iter().map(move |(d, entry)| {
                    (
                        MessageKey::with_disambiguation(context.clone(), source.clone(), d.clone()),
                        entry,
                    )
                });
                default.chain(variants)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn de() -> LocaleTag {
        "de_DE".parse().unwrap()
    }

    #[test]
    fn insert_and_lookup() {
        let mut catalog = Catalog::new(de());
        catalog.insert(
            MessageKey::new("BattleSummary", "VICTORY!"),
            TranslationEntry::finished("SIEG!"),
        );
        let entry = catalog.entry("BattleSummary", "VICTORY!", None).unwrap();
        assert_eq!(entry.text, "SIEG!");
        assert!(entry.is_finished());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn missing_context_or_source() {
        let mut catalog = Catalog::new(de());
        catalog.insert(
            MessageKey::new("HUDTop", "Wood: %1"),
            TranslationEntry::finished("Holz: %1"),
        );
        assert!(catalog.entry("HUDBottom", "Wood: %1", None).is_none());
        assert!(catalog.entry("HUDTop", "Gold: %1", None).is_none());
    }

    #[test]
    fn reinsert_replaces_and_returns_displaced() {
        let mut catalog = Catalog::new(de());
        let key = MessageKey::new("MainMenu", "Quit");
        catalog.insert(key.clone(), TranslationEntry::finished("Verlassen"));
        let displaced = catalog.insert(key.clone(), TranslationEntry::finished("Beenden"));
        assert_eq!(displaced.unwrap().text, "Verlassen");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entry("MainMenu", "Quit", None).unwrap().text, "Beenden");
    }

    #[test]
    fn disambiguated_entries_coexist() {
        let mut catalog = Catalog::new(de());
        catalog.insert(
            MessageKey::new("MapSelect", "Open"),
            TranslationEntry::finished("Öffnen"),
        );
        catalog.insert(
            MessageKey::with_disambiguation("MapSelect", "Open", "adjective"),
            TranslationEntry::finished("Offen"),
        );
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entry("MapSelect", "Open", None).unwrap().text, "Öffnen");
        assert_eq!(
            catalog.entry("MapSelect", "Open", Some("adjective")).unwrap().text,
            "Offen"
        );
        assert!(catalog.entry("MapSelect", "Open", Some("verb")).is_none());
    }

    #[test]
    fn unfinished_entry_keeps_empty_text() {
        let entry = TranslationEntry::unfinished();
        assert!(!entry.is_finished());
        assert!(entry.text.is_empty());
    }

    #[test]
    fn iter_visits_every_entry() {
        let mut catalog = Catalog::new(de());
        catalog.insert(
            MessageKey::new("A", "one"),
            TranslationEntry::finished("eins"),
        );
        catalog.insert(
            MessageKey::new("B", "two"),
            TranslationEntry::finished("zwei"),
        );
        catalog.insert(
            MessageKey::with_disambiguation("B", "two", "ordinal"),
            TranslationEntry::finished("zweite"),
        );
        let mut keys: Vec<MessageKey> = catalog.iter().map(|(k, _)| k).collect();
        keys.sort();
        assert_eq!(keys.len(), 3);
        assert_eq!(keys[0], MessageKey::new("A", "one"));
        assert_eq!(keys[2].disambiguation.as_deref(), Some("ordinal"));
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let mut a = Catalog::new(de());
        let mut b = Catalog::new(de());
        for (ctx, src, tr) in [("X", "1", "a"), ("Y", "2", "b")] {
            a.insert(MessageKey::new(ctx, src), TranslationEntry::finished(tr));
        }
        for (ctx, src, tr) in [("Y", "2", "b"), ("X", "1", "a")] {
            b.insert(MessageKey::new(ctx, src), TranslationEntry::finished(tr));
        }
        assert_eq!(a, b);
    }
}
