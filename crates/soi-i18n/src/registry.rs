//! The published catalog set and the active-locale switch.
//!
//! # Invariants
//!
//! 1. **Immutable catalog set**: the catalogs and their order are fixed at
//!    construction. The only mutable state is the active-locale index, a
//!    single atomic word.
//!
//! 2. **Atomic switch**: once [`CatalogRegistry::activate`] returns, every
//!    subsequent lookup observes the new locale exclusively. A lookup never
//!    sees a mixture of two catalogs because it reads the index once and
//!    works against that one immutable catalog.
//!
//! 3. **Wait-free reads**: the render path performs one atomic load and an
//!    indexed access; no lock is ever taken. Concurrent `activate` calls
//!    serialize through the atomic store, last write wins.
//!
//! Hot-reloading catalogs means building a fresh loader and registry and
//! swapping the handle at the composition root; an existing registry is
//! never patched in place.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::catalog::Catalog;
use crate::load::LoadError;
use crate::locale::LocaleTag;

/// Owns every loaded [`Catalog`] plus the currently active locale.
///
/// Shared by arbitrarily many concurrent readers; the locale-change action
/// is the single writer path.
#[derive(Debug)]
pub struct CatalogRegistry {
    /// Sorted by locale for deterministic language-only fallback.
    catalogs: Vec<Catalog>,
    base: usize,
    active: AtomicUsize,
}

impl CatalogRegistry {
    /// Publish a catalog set. The base locale's catalog is guaranteed to be
    /// present afterwards: if its document did not survive loading, an
    /// empty identity catalog stands in (lookups then fall back to source
    /// text, which for the base locale is the correct rendering anyway).
    ///
    /// # Errors
    /// [`LoadError::NoCatalogs`] if `catalogs` is empty — with no text at
    /// all, startup must fail loudly.
    pub fn from_catalogs(
        mut catalogs: Vec<Catalog>,
        base: LocaleTag,
    ) -> Result<Self, LoadError> {
        if catalogs.is_empty() {
            return Err(LoadError::NoCatalogs);
        }
        if !catalogs.iter().any(|c| *c.locale() == base) {
            tracing::warn!(locale = %base, "base catalog missing; substituting empty identity catalog");
            catalogs.push(Catalog::new(base.clone()));
        }
        catalogs.sort_by(|a, b| a.locale().cmp(b.locale()));
        let base_index = catalogs
            .iter()
            .position(|c| *c.locale() == base)
            .expect("base catalog present after insertion above");
        Ok(Self {
            catalogs,
            base: base_index,
            active: AtomicUsize::new(base_index),
        })
    }

    /// The universal-fallback locale.
    #[must_use]
    pub fn base(&self) -> &LocaleTag {
        self.catalogs[self.base].locale()
    }

    /// The base locale's catalog.
    #[must_use]
    pub fn base_catalog(&self) -> &Catalog {
        &self.catalogs[self.base]
    }

    /// The presently active locale. Never blocks.
    #[must_use]
    pub fn current(&self) -> &LocaleTag {
        self.active_catalog().locale()
    }

    /// The presently active catalog, read with a single atomic load.
    #[must_use]
    pub fn active_catalog(&self) -> &Catalog {
        &self.catalogs[self.active.load(Ordering::Acquire)]
    }

    /// Exact-match read accessor.
    #[must_use]
    pub fn catalog_for(&self, locale: &LocaleTag) -> Option<&Catalog> {
        self.catalogs.iter().find(|c| c.locale() == locale)
    }

    /// All loaded locales, in sorted order. The settings UI builds its
    /// language menu from this.
    pub fn locales(&self) -> impl Iterator<Item = &LocaleTag> {
        self.catalogs.iter().map(Catalog::locale)
    }

    /// All loaded catalogs, in sorted locale order.
    pub fn catalogs(&self) -> impl Iterator<Item = &Catalog> {
        self.catalogs.iter()
    }

    /// Switch the active locale, applying the fallback chain: exact
    /// `(language, region)` match, then any catalog with the same language,
    /// then the base locale.
    ///
    /// Returns the locale actually activated — it differs from `requested`
    /// when fallback applied, so callers can surface "this language is
    /// incomplete" notices.
    pub fn activate(&self, requested: &LocaleTag) -> LocaleTag {
        let index = self.match_locale(requested);
        self.active.store(index, Ordering::Release);
        let activated = self.catalogs[index].locale().clone();
        if activated == *requested {
            tracing::info!(locale = %activated, "locale activated");
        } else {
            tracing::info!(requested = %requested, activated = %activated, "locale activated via fallback");
        }
        activated
    }

    /// [`activate`](Self::activate) from a raw user-supplied tag string.
    /// A malformed tag resolves to the base locale.
    pub fn activate_raw(&self, raw: &str) -> LocaleTag {
        match raw.parse::<LocaleTag>() {
            Ok(tag) => self.activate(&tag),
            Err(err) => {
                tracing::warn!(input = raw, error = %err, "unparseable locale tag; activating base locale");
                let base = self.base().clone();
                self.activate(&base)
            }
        }
    }

    /// The catalog `activate(requested)` would choose, without switching.
    pub(crate) fn matched_catalog(&self, requested: &LocaleTag) -> &Catalog {
        &self.catalogs[self.match_locale(requested)]
    }

    fn match_locale(&self, requested: &LocaleTag) -> usize {
        if let Some(i) = self.catalogs.iter().position(|c| c.locale() == requested) {
            return i;
        }
        if let Some(i) = self
            .catalogs
            .iter()
            .position(|c| c.locale().same_language(requested))
        {
            return i;
        }
        self.base
    }
}
