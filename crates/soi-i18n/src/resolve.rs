//! Render-path lookup: `(context, source text, args)` → user-facing string.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Key missing in catalog | Translators lag UI changes | Source text returned |
//! | Entry unfinished | Translation absent or unapproved | Source text returned |
//! | `%N` without argument | Catalog/call-site drift | Token left verbatim |
//!
//! None of these raise: a missing or incomplete translation is an expected
//! runtime condition and must never break the UI. Each is counted on a
//! cheap atomic so tooling can detect catalog drift.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::catalog::Catalog;
use crate::format;
use crate::locale::LocaleTag;
use crate::registry::CatalogRegistry;

/// Point-in-time snapshot of the resolver's diagnostic counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Lookups that found no entry and fell back to source text.
    pub missing_translation: u64,
    /// Lookups that found an unfinished entry and fell back to source text.
    pub unfinished_fallback: u64,
    /// `%N` tokens left verbatim because no matching argument was supplied.
    pub unsubstituted_placeholder: u64,
}

#[derive(Debug, Default)]
struct Counters {
    missing_translation: AtomicU64,
    unfinished_fallback: AtomicU64,
    unsubstituted_placeholder: AtomicU64,
}

/// Resolves messages against the registry's catalogs.
///
/// Cheap to share: clone the [`Arc`] handles or the resolver itself per
/// subsystem. Safe to call from any thread.
#[derive(Debug, Clone)]
pub struct LookupResolver {
    registry: Arc<CatalogRegistry>,
    counters: Arc<Counters>,
}

impl LookupResolver {
    #[must_use]
    pub fn new(registry: Arc<CatalogRegistry>) -> Self {
        Self {
            registry,
            counters: Arc::new(Counters::default()),
        }
    }

    /// The registry this resolver reads from.
    #[must_use]
    pub fn registry(&self) -> &CatalogRegistry {
        &self.registry
    }

    /// Resolve against the currently active locale.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use std::sync::Arc;
    /// # use soi_i18n::{CatalogLoader, LookupResolver};
    /// # let loader = CatalogLoader::new("en_US".parse().unwrap());
    /// let registry = Arc::new(loader.finish()?);
    /// let resolver = LookupResolver::new(Arc::clone(&registry));
    ///
    /// registry.activate(&"de_DE".parse().unwrap());
    /// let label = resolver.resolve("BattleSummary", "Kills: %1", &["7"]);
    /// # Ok::<(), soi_i18n::LoadError>(())
    /// ```
    #[must_use]
    pub fn resolve(&self, context: &str, source: &str, args: &[&str]) -> String {
        // One atomic read pins the catalog for the whole lookup; a
        // concurrent locale switch cannot produce a mixed result.
        let catalog = self.registry.active_catalog();
        self.resolve_with(catalog, context, source, args)
    }

    /// Resolve against an explicit target locale, routed through the same
    /// fallback chain as [`CatalogRegistry::activate`].
    #[must_use]
    pub fn resolve_in(
        &self,
        locale: &LocaleTag,
        context: &str,
        source: &str,
        args: &[&str],
    ) -> String {
        let catalog = self.registry.matched_catalog(locale);
        self.resolve_with(catalog, context, source, args)
    }

    /// Current diagnostic counter values.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot {
            missing_translation: self.counters.missing_translation.load(Ordering::Relaxed),
            unfinished_fallback: self.counters.unfinished_fallback.load(Ordering::Relaxed),
            unsubstituted_placeholder: self
                .counters
                .unsubstituted_placeholder
                .load(Ordering::Relaxed),
        }
    }

    fn resolve_with(
        &self,
        catalog: &Catalog,
        context: &str,
        source: &str,
        args: &[&str],
    ) -> String {
        let candidate = match catalog.entry(context, source, None) {
            Some(entry) if entry.is_finished() => entry.text.as_str(),
            Some(_) => {
                self.counters
                    .unfinished_fallback
                    .fetch_add(1, Ordering::Relaxed);
                tracing::debug!(
                    locale = %catalog.locale(),
                    context,
                    source,
                    "unfinished translation, using source text"
                );
                source
            }
            None => {
                self.counters
                    .missing_translation
                    .fetch_add(1, Ordering::Relaxed);
                tracing::debug!(
                    locale = %catalog.locale(),
                    context,
                    source,
                    "missing translation, using source text"
                );
                source
            }
        };
        let substitution = format::substitute(candidate, args);
        if substitution.unsubstituted > 0 {
            self.counters
                .unsubstituted_placeholder
                .fetch_add(substitution.unsubstituted, Ordering::Relaxed);
            tracing::debug!(
                locale = %catalog.locale(),
                context,
                source,
                unsubstituted = substitution.unsubstituted,
                "placeholder without matching argument"
            );
        }
        substitution.text
    }
}
