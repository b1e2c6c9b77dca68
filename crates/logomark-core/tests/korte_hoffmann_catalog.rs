use std::sync::Arc;

use logomark_core::catalog::canonical_stem;
use logomark_core::{AttributeGroup, BuiltinRule, Engine, EngineConfig, RawFileRecord, Vocabulary};

const LISTING: &[&str] = &[
    "assets/KH-Gruppe/Gruppe_Left_Bar_Black_Size-M_rgb.svg",
    "assets/KH-Gruppe/Gruppe_Left_Bar_Black_Size-M_cmyk.pdf",
    "assets/KH-Gruppe/Gruppe_Left_Bar_Black_Size-M.zip",
    "assets/KH-Gruppe/gruppe_center_white+accent_size-xxl.png",
    "assets/KH-Gebaeudedruck/Gebäudedruck_Right_White_Size-S_Trademark.jpg",
    "assets/KH-Immobilien/KH-Immobilien_Compact_Black_Size-L.svg",
    "assets/KORTE-HOFFMANN/Korte-Hoffmann_Compact_Black_Size-M_Clearspace.svg",
    "assets/KORTE-HOFFMANN/korte-hoffmann_favicon_white.png",
    "assets/Dreihaus/dreihaus_size-xxs_black_trademark.svg",
    "assets/monogram_black.svg",
    "assets/KH-Gruppe.zip",
    "assets/gruppe_no-lockup_black_size-m.svg",
    "assets/mystery_black.svg",
    "assets/gruppe_left_black_white_size-m_final.svg",
];

fn records() -> Vec<RawFileRecord> {
    LISTING.iter().map(|l| RawFileRecord::from_locator(*l)).collect()
}

fn vocabulary() -> Arc<Vocabulary> {
    Arc::new(Vocabulary::korte_hoffmann().unwrap())
}

#[test]
fn accepted_records_satisfy_their_contract() {
    let vocab = vocabulary();
    let run = Engine::new(Arc::clone(&vocab), EngineConfig::default())
        .unwrap()
        .run(&records())
        .unwrap();

    assert_eq!(run.total(), LISTING.len());
    assert_eq!(run.accepted.len(), 10);
    for accepted in &run.accepted {
        let spec = vocab.spec(accepted.asset_type().unwrap()).unwrap();
        for group in &spec.required {
            assert!(
                accepted.attributes.contains(*group),
                "{} lacks {group}",
                accepted.record.locator()
            );
        }
    }
}

#[test]
fn rejections_carry_every_reason() {
    let run = Engine::korte_hoffmann().unwrap().run(&records()).unwrap();

    let files: Vec<_> = run.rejections.iter().map(|r| r.file.as_str()).collect();
    assert_eq!(
        files,
        [
            "KH-Gruppe.zip",
            "gruppe_left_black_white_size-m_final.svg",
            "gruppe_no-lockup_black_size-m.svg",
            "mystery_black.svg",
        ]
    );

    let mixed = run.rejections[1].reason_texts();
    assert_eq!(mixed[0], "unmatched tokens: final");
    assert_eq!(mixed[1], "duplicate attribute: color (black, white)");

    let sentinel = run.rejections[2].reason_texts();
    assert_eq!(
        sentinel,
        ["`no-lockup` is not allowed for standard_logo: lockup is required"]
    );

    assert_eq!(run.summary.total_files, 4);
    assert!(run
        .summary
        .groups
        .iter()
        .any(|g| g.reason == "top-level brand archive" && g.count == 1));
}

#[test]
fn format_siblings_merge_into_one_variant() {
    let run = Engine::korte_hoffmann().unwrap().run(&records()).unwrap();

    let gruppe_left = run
        .variants
        .iter()
        .find(|v| v.slug == "gruppe_left_bar_size-m_black")
        .unwrap();
    let slots: Vec<_> = gruppe_left.links.keys().map(ToString::to_string).collect();
    assert_eq!(slots, ["bundle", "pdf_cmyk", "svg_rgb"]);
    assert_eq!(
        gruppe_left.preview.as_deref(),
        Some("assets/KH-Gruppe/Gruppe_Left_Bar_Black_Size-M_rgb.svg")
    );
}

#[test]
fn legacy_names_map_to_modern_attributes() {
    let run = Engine::korte_hoffmann().unwrap().run(&records()).unwrap();

    let immobilien = run
        .accepted
        .iter()
        .find(|a| a.record.stem() == "KH-Immobilien_Compact_Black_Size-L")
        .unwrap();
    assert_eq!(immobilien.attributes.text(AttributeGroup::Lockup), Some("center-compact"));
    assert_eq!(immobilien.attributes.text(AttributeGroup::OpticalSize), Some("xxl"));

    let placement = run
        .placements
        .iter()
        .find(|p| p.source_locator.ends_with("KH-Immobilien_Compact_Black_Size-L.svg"))
        .unwrap();
    assert_eq!(
        placement.destination(),
        "KH-Immobilien/Lockup=Center-Compact/Bar=No/Size=XXL/Trademark=No/Clearspace=No/\
         immobilien_center-compact_size-xxl_black.svg"
    );
}

#[test]
fn canonical_names_classify_back_to_themselves() {
    let vocab = vocabulary();
    let engine = Engine::new(Arc::clone(&vocab), EngineConfig::default()).unwrap();
    let run = engine.run(&records()).unwrap();

    for accepted in &run.accepted {
        let canonical = canonical_stem(&vocab, &accepted.attributes, true).unwrap();
        let reparsed = engine.classifier().classify_stem(&canonical).unwrap();
        assert_eq!(reparsed, accepted.attributes, "{canonical}");
        assert_eq!(
            engine.classifier().normalize(&canonical),
            canonical,
            "canonical names are already normalized"
        );
    }
}

#[test]
fn classification_is_repeatable() {
    let engine = Engine::korte_hoffmann().unwrap();
    let first = engine.run(&records()).unwrap();
    let second = engine.run(&records()).unwrap();
    assert_eq!(first.accepted, second.accepted);
    assert_eq!(first.rejections, second.rejections);
    assert_eq!(first.variants, second.variants);
    assert_eq!(first.placements, second.placements);
}

#[test]
fn builtin_retention_rules() {
    let config = EngineConfig::new()
        .with_rule(BuiltinRule::WhiteJpeg)
        .with_rule(BuiltinRule::SmallTrademark)
        .with_rule(BuiltinRule::AccentBan);
    let run = Engine::new(vocabulary(), config).unwrap().run(&records()).unwrap();

    let mut rules: Vec<_> = run.discards.iter().map(|d| d.rule.as_str()).collect();
    rules.sort_unstable();
    assert_eq!(rules, ["accent-ban", "small-trademark", "white-jpeg"]);

    // Discards thin the catalog, never the classification.
    assert_eq!(run.accepted.len(), 10);
    assert!(run.variants.iter().all(|v| !v.links.is_empty()));
    assert!(!run.variants.iter().any(|v| v.slug.starts_with("dreihaus")));
}

#[test]
fn brand_archive_names() {
    let vocab = vocabulary();
    assert_eq!(vocab.brand_archive_name("gruppe").as_deref(), Some("KH-Gruppe.zip"));
    assert_eq!(vocab.brand_archive_name("dreihaus"), None);
}
