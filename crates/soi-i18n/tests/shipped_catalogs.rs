//! End-to-end checks against the catalogs that ship with the game.

use std::path::PathBuf;
use std::sync::Arc;

use soi_i18n::{
    CatalogLoader, CatalogRegistry, LocaleTag, LookupResolver, lint,
};

fn translations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../translations")
}

fn tag(raw: &str) -> LocaleTag {
    raw.parse().unwrap()
}

fn registry() -> Arc<CatalogRegistry> {
    let mut loader = CatalogLoader::new(tag("en_US"));
    for (locale, file) in [
        ("de_DE", "app_de.json"),
        ("en_US", "app_en.json"),
        ("pt_BR", "app_pt_br.json"),
    ] {
        loader.add_path(&tag(locale), &translations_dir().join(file));
    }
    assert!(loader.issues().is_empty(), "issues: {:?}", loader.issues());
    Arc::new(loader.finish().unwrap())
}

fn resolver() -> LookupResolver {
    LookupResolver::new(registry())
}

#[test]
fn all_three_locales_load() {
    let registry = registry();
    let locales: Vec<String> = registry.locales().map(ToString::to_string).collect();
    assert_eq!(locales, ["de_DE", "en_US", "pt_BR"]);
    for catalog in registry.catalogs() {
        assert!(!catalog.is_empty());
    }
}

#[test]
fn victory_in_german() {
    let resolver = resolver();
    assert_eq!(
        resolver.resolve_in(&tag("de_DE"), "BattleSummary", "VICTORY!", &[]),
        "SIEG!"
    );
}

#[test]
fn production_counter_in_english() {
    let resolver = resolver();
    assert_eq!(
        resolver.resolve_in(
            &tag("en_US"),
            "ProductionPanel",
            "Units Produced: %1 / %2",
            &["3", "5"]
        ),
        "Units Produced: 3 / 5"
    );
}

#[test]
fn unfinished_close_falls_back_to_source() {
    let resolver = resolver();
    assert_eq!(
        resolver.resolve_in(&tag("pt_BR"), "SettingsPanel", "Close", &[]),
        "Close"
    );
    assert_eq!(resolver.stats().unfinished_fallback, 1);
}

#[test]
fn activating_unavailable_french_falls_back_to_base() {
    let resolver = resolver();
    let activated = resolver.registry().activate(&tag("fr_FR"));
    assert_eq!(activated, tag("en_US"));
    assert_eq!(
        resolver.resolve("BattleSummary", "VICTORY!", &[]),
        "VICTORY!"
    );
}

#[test]
fn save_slot_in_portuguese() {
    let resolver = resolver();
    assert_eq!(
        resolver.resolve_in(&tag("pt_BR"), "LoadGamePanel", "Slot: %1", &["2"]),
        "Espaço: 2"
    );
}

#[test]
fn base_locale_is_identity_mapped() {
    let registry = registry();
    let resolver = LookupResolver::new(Arc::clone(&registry));
    for (key, entry) in registry.base_catalog().iter() {
        if entry.is_finished() {
            assert_eq!(entry.text, key.source, "base entry differs for {key:?}");
        }
    }
    // And through the resolver, without arguments a tokenless base string
    // comes back exactly.
    assert_eq!(
        resolver.resolve_in(&tag("en_US"), "MainMenu", "STANDARD OF IRON", &[]),
        "STANDARD OF IRON"
    );
}

#[test]
fn finished_entries_format_positionally_in_every_locale() {
    let registry = registry();
    let resolver = LookupResolver::new(Arc::clone(&registry));
    for catalog in registry.catalogs() {
        for (key, entry) in catalog.iter() {
            if !entry.is_finished() {
                continue;
            }
            let ordinals = soi_i18n::format::ordinals(&key.source);
            let count = ordinals.last().copied().unwrap_or(0) as usize;
            let owned: Vec<String> = (1..=count).map(|n| format!("arg{n}")).collect();
            let args: Vec<&str> = owned.iter().map(String::as_str).collect();
            let resolved = resolver.resolve_in(catalog.locale(), &key.context, &key.source, &args);
            let expected = soi_i18n::format::format(&entry.text, &args);
            assert_eq!(resolved, expected, "mismatch for {key:?} in {}", catalog.locale());
        }
    }
}

#[test]
fn german_catalog_has_known_gaps() {
    let report = lint::coverage(&registry());
    assert_eq!(report.total_keys, 132);

    let de = report
        .locales
        .iter()
        .find(|l| l.locale == tag("de_DE"))
        .unwrap();
    assert_eq!(de.missing.len(), 6);
    assert_eq!(de.unfinished, 0);
    assert_eq!(de.translated, report.total_keys - de.missing.len());

    let pt = report
        .locales
        .iter()
        .find(|l| l.locale == tag("pt_BR"))
        .unwrap();
    assert_eq!(pt.unfinished, 5);
    assert!(pt.missing.is_empty());

    let en = report
        .locales
        .iter()
        .find(|l| l.locale == tag("en_US"))
        .unwrap();
    assert_eq!(en.translated, report.total_keys);
}

#[test]
fn missing_german_keys_resolve_to_source() {
    let registry = registry();
    let resolver = LookupResolver::new(Arc::clone(&registry));
    let report = lint::coverage(&registry);
    let de = report
        .locales
        .iter()
        .find(|l| l.locale == tag("de_DE"))
        .unwrap();
    for key in &de.missing {
        let resolved = resolver.resolve_in(&tag("de_DE"), &key.context, &key.source, &[]);
        // Tokens stay verbatim with no arguments, so the fallback equals
        // the source string exactly.
        assert_eq!(resolved, key.source);
    }
    assert_eq!(resolver.stats().missing_translation, de.missing.len() as u64);
}

#[test]
fn shipped_catalogs_pass_lint() {
    for file in ["app_de.json", "app_en.json", "app_pt_br.json"] {
        let bytes = std::fs::read(translations_dir().join(file)).unwrap();
        let locale = soi_i18n::load::document_locale(&bytes).unwrap();
        let findings = lint::lint_document(&locale, &bytes).unwrap();
        assert!(findings.is_empty(), "{file}: {findings:?}");
    }
}

#[test]
fn reloading_identical_bytes_yields_equal_catalog() {
    let bytes = std::fs::read(translations_dir().join("app_de.json")).unwrap();
    let first = soi_i18n::load::load(&tag("de_DE"), &bytes).unwrap();
    let second = soi_i18n::load::load(&tag("de_DE"), &bytes).unwrap();
    assert_eq!(first, second);
}
