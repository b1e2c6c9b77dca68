//! Built-in vocabulary for the Korte-Hoffmann logo catalog.

use crate::types::{AssetType, AttributeGroup as G};

use super::{
    AssetMarker, AssetTypeSpec, BrandKey, LegacyAlias, PathSegment, VocabularyDocument,
    VocabularyEntry,
};

/// Priority of deprecated spellings, below every canonical token.
const LEGACY: u16 = 0;

pub fn korte_hoffmann() -> VocabularyDocument {
    VocabularyDocument {
        entries: entries(),
        brands: brands(),
        markers: vec![
            AssetMarker::new("favicon", AssetType::Favicon),
            AssetMarker::new("monogram", AssetType::Monogram),
        ],
        legacy_aliases: vec![
            LegacyAlias::new(
                "compact",
                vec![AssetType::StandardLogo],
                G::Lockup,
                "center-compact",
            ),
            LegacyAlias::new("no-compact", vec![AssetType::StandardLogo], G::Lockup, "center"),
        ],
        asset_types: asset_types(),
        strip_prefixes: vec!["kh-".into()],
    }
}

fn entries() -> Vec<VocabularyEntry> {
    vec![
        VocabularyEntry::new("size-xxs", G::OpticalSize, "xxs", "Extra Extra Small"),
        VocabularyEntry::new("size-m", G::OpticalSize, "m", "Medium"),
        VocabularyEntry::new("size-xxl", G::OpticalSize, "xxl", "Extra Extra Large"),
        VocabularyEntry::new("size-s", G::OpticalSize, "xxs", "Small (Legacy)")
            .with_priority(LEGACY),
        VocabularyEntry::new("size-l", G::OpticalSize, "xxl", "Large (Legacy)")
            .with_priority(LEGACY),
        VocabularyEntry::named("black", G::Color, "Black"),
        VocabularyEntry::named("white", G::Color, "White"),
        VocabularyEntry::named("black+accent", G::Color, "Black+Accent"),
        VocabularyEntry::named("white+accent", G::Color, "White+Accent"),
        VocabularyEntry::named("center", G::Lockup, "Center"),
        VocabularyEntry::named("left", G::Lockup, "Left"),
        VocabularyEntry::named("right", G::Lockup, "Right"),
        VocabularyEntry::named("center-compact", G::Lockup, "Center-Compact"),
        VocabularyEntry::named("no-lockup", G::Lockup, "No Lockup").as_sentinel(),
        VocabularyEntry::new("bar", G::Bar, true, "Bar"),
        VocabularyEntry::new("no-bar", G::Bar, false, "No Bar"),
        VocabularyEntry::new("compact", G::Compact, true, "Compact"),
        VocabularyEntry::new("no-compact", G::Compact, false, "No Compact"),
        VocabularyEntry::new("trademark", G::Trademark, true, "With ®"),
        VocabularyEntry::new("no-trademark", G::Trademark, false, "Without ®"),
        VocabularyEntry::new("clearspace", G::Clearspace, true, "With Clearspace"),
        VocabularyEntry::new("no-clearspace", G::Clearspace, false, "Without Clearspace"),
        VocabularyEntry::named("rgb", G::ColorMode, "RGB"),
        VocabularyEntry::named("cmyk", G::ColorMode, "CMYK"),
    ]
}

fn brands() -> Vec<BrandKey> {
    vec![
        BrandKey::division(
            "architekten+ingenieure",
            AssetType::StandardLogo,
            "Architekten+Ingenieure",
            "KH-Architekten+Ingenieure",
        ),
        BrandKey::division(
            "gebaeudedruck",
            AssetType::StandardLogo,
            "Gebäudedruck",
            "KH-Gebaeudedruck",
        ),
        BrandKey::division("gruppe", AssetType::StandardLogo, "Gruppe", "KH-Gruppe"),
        BrandKey::division("immobilien", AssetType::StandardLogo, "Immobilien", "KH-Immobilien"),
        BrandKey::division(
            "korte-hoffmann",
            AssetType::Wordmark,
            "Korte-Hoffmann",
            "KORTE-HOFFMANN",
        ),
        // Spellings found in older uploads.
        BrandKey::alias(
            "architekten-ingenieure",
            AssetType::StandardLogo,
            "architekten+ingenieure",
        ),
        BrandKey::alias("group", AssetType::StandardLogo, "gruppe"),
        BrandKey::alias("korte-hoffman", AssetType::Wordmark, "korte-hoffmann"),
        BrandKey::alias("kortehoffmann", AssetType::Wordmark, "korte-hoffmann"),
        BrandKey::alias("kortehoffman", AssetType::Wordmark, "korte-hoffmann"),
        // Dreihaus is a Gebäudedruck product; brandless icons belong to the parent brand.
        BrandKey::alias("dreihaus", AssetType::SpecialLogo, "gebaeudedruck"),
        BrandKey::alias("favicon", AssetType::Favicon, "korte-hoffmann"),
        BrandKey::alias("monogram", AssetType::Monogram, "korte-hoffmann"),
    ]
}

fn asset_types() -> Vec<AssetTypeSpec> {
    use PathSegment::{Group, Literal};

    vec![
        AssetTypeSpec::new(
            AssetType::StandardLogo,
            vec![G::Division, G::OpticalSize, G::Color, G::Lockup],
        )
        .with_defaults(&[G::Bar, G::Trademark, G::Clearspace])
        .with_folder_schema(vec![
            Group(G::Division),
            Group(G::Lockup),
            Group(G::Bar),
            Group(G::OpticalSize),
            Group(G::Trademark),
            Group(G::Clearspace),
        ]),
        AssetTypeSpec::new(
            AssetType::Wordmark,
            vec![G::Division, G::OpticalSize, G::Color, G::Compact],
        )
        .with_defaults(&[G::Compact, G::Trademark, G::Clearspace])
        .with_folder_schema(vec![
            Group(G::Division),
            Group(G::Compact),
            Group(G::OpticalSize),
            Group(G::Trademark),
            Group(G::Clearspace),
        ]),
        AssetTypeSpec::new(AssetType::SpecialLogo, vec![G::OpticalSize, G::Color])
            .with_defaults(&[G::Trademark, G::Clearspace])
            .with_folder_schema(vec![
                Group(G::Division),
                Literal("Dreihaus".into()),
                Group(G::OpticalSize),
                Group(G::Trademark),
                Group(G::Clearspace),
            ]),
        AssetTypeSpec::new(AssetType::Monogram, vec![G::Color])
            .with_folder_schema(vec![Group(G::Division), Literal("Favicons".into())]),
        AssetTypeSpec::new(AssetType::Favicon, vec![G::Color])
            .with_folder_schema(vec![Group(G::Division), Literal("Favicons".into())]),
    ]
}
