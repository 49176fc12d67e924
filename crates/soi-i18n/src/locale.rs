//! Locale identifiers and language matching.
//!
//! A [`LocaleTag`] is a `(language, region)` pair such as `de_DE` or `pt_BR`.
//! The language subtag is required; the region is optional (`fr` is a valid
//! tag). Tags are normalized on parse — language lowercased, region
//! uppercased — so `pt-br`, `PT_BR`, and `pt_BR` all denote the same locale.

use std::fmt;
use std::str::FromStr;

/// Structured locale identifier: required language, optional region.
///
/// Ordering is lexicographic on `(language, region)`, which gives catalog
/// sets a deterministic iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleTag {
    language: String,
    region: Option<String>,
}

/// A string did not parse as a locale tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLocaleTag {
    raw: String,
}

impl InvalidLocaleTag {
    /// The rejected input.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for InvalidLocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid locale tag: {:?}", self.raw)
    }
}

impl std::error::Error for InvalidLocaleTag {}

impl LocaleTag {
    /// Build a tag from parts, normalizing case.
    ///
    /// # Errors
    /// Returns [`InvalidLocaleTag`] if the language is not 2–8 ASCII letters
    /// or the region is present but not 2–3 ASCII alphanumerics.
    pub fn new(language: &str, region: Option<&str>) -> Result<Self, InvalidLocaleTag> {
        let invalid = || InvalidLocaleTag {
            raw: match region {
                Some(r) => format!("{language}_{r}"),
                None => language.to_string(),
            },
        };
        if !is_language_subtag(language) {
            return Err(invalid());
        }
        if let Some(r) = region {
            if !is_region_subtag(r) {
                return Err(invalid());
            }
        }
        Ok(Self {
            language: language.to_ascii_lowercase(),
            region: region.map(str::to_ascii_uppercase),
        })
    }

    /// The language subtag, lowercased (`"de"`, `"pt"`).
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The region subtag, uppercased (`"DE"`, `"BR"`), if present.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Whether two tags share a language, regardless of region.
    ///
    /// This is the second step of the fallback chain: `fr_CA` matches a
    /// loaded `fr_FR` catalog through this predicate.
    #[must_use]
    pub fn same_language(&self, other: &LocaleTag) -> bool {
        self.language == other.language
    }
}

impl FromStr for LocaleTag {
    type Err = InvalidLocaleTag;

    /// Parse `"de_DE"`, `"pt-br"`, `"fr"`. Both `_` and `-` separate the
    /// subtags. Anything with more than two subtags is rejected.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let mut parts = trimmed.split(['_', '-']);
        let language = parts.next().unwrap_or_default();
        let region = parts.next();
        if parts.next().is_some() {
            return Err(InvalidLocaleTag {
                raw: raw.to_string(),
            });
        }
        LocaleTag::new(language, region).map_err(|_| InvalidLocaleTag {
            raw: raw.to_string(),
        })
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}_{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}

fn is_language_subtag(s: &str) -> bool {
    (2..=8).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_region_subtag(s: &str) -> bool {
    (2..=3).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphanumeric())
}
