use crate::parser::tokenizer::{Token, Tokenizer};
use crate::types::AssetType;
use crate::vocabulary::{BrandKey, TOKEN_SEPARATOR, Vocabulary};

/// Outcome of brand/asset-type prefix detection for one stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatch<'v> {
    /// The brand key that started the stem.
    pub brand: &'v BrandKey,
    /// Final asset type, after any marker promotion.
    pub asset_type: AssetType,
    pub division: Option<String>,
    /// Marker token that promoted the asset type, if any.
    pub promoted_by: Option<String>,
    /// Tokens after the prefix, with the promoting marker removed.
    pub remainder: Vec<Token>,
}

/// Resolves the brand prefix of a normalized stem.
///
/// Candidates are tried longest key first, so a key that is a prefix of a
/// longer valid key never shadows it. A key only matches on a token
/// boundary. Returns `None` when no key starts the stem.
pub fn resolve_prefix<'v>(vocabulary: &'v Vocabulary, stem: &str) -> Option<PrefixMatch<'v>> {
    let (brand, rest) = vocabulary.prefix_candidates().find_map(|brand| {
        let rest = stem.strip_prefix(brand.key.as_str())?;
        (rest.is_empty() || rest.starts_with(TOKEN_SEPARATOR)).then_some((brand, rest))
    })?;

    let mut remainder = Tokenizer::new().tokenize(rest);

    // Marker-typed keys (a bare `favicon`) never promote; a second marker
    // stays in the remainder and conflicts there.
    let promotable = !vocabulary
        .markers()
        .iter()
        .any(|m| m.asset_type == brand.asset_type);

    // Marker declaration order is the promotion priority.
    let promotion = if promotable {
        vocabulary.markers().iter().find_map(|marker| {
            remainder
                .iter()
                .position(|t| t.text == marker.token)
                .map(|pos| (pos, marker))
        })
    } else {
        None
    };

    let (asset_type, promoted_by) = match promotion {
        Some((pos, marker)) => {
            remainder.remove(pos);
            (marker.asset_type, Some(marker.token.clone()))
        }
        None => (brand.asset_type, None),
    };

    Some(PrefixMatch {
        brand,
        asset_type,
        division: brand.division.clone(),
        promoted_by,
        remainder,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{AssetTypeSpec, VocabularyDocument};

    fn vocab() -> Vocabulary {
        Vocabulary::korte_hoffmann().unwrap()
    }

    fn texts(m: &PrefixMatch<'_>) -> Vec<String> {
        m.remainder.iter().map(|t| t.text.clone()).collect()
    }

    #[test]
    fn resolves_division_prefix() {
        let v = vocab();
        let m = resolve_prefix(&v, "gruppe_left_black_size-m").unwrap();
        assert_eq!(m.asset_type, AssetType::StandardLogo);
        assert_eq!(m.division.as_deref(), Some("gruppe"));
        assert_eq!(texts(&m), ["left", "black", "size-m"]);
    }

    #[test]
    fn unknown_prefix_is_none() {
        let v = vocab();
        assert!(resolve_prefix(&v, "mystery_black").is_none());
        assert!(resolve_prefix(&v, "gruppen_black").is_none());
    }

    #[test]
    fn marker_promotes_and_keeps_division() {
        let v = vocab();
        let m = resolve_prefix(&v, "korte-hoffmann_favicon_black").unwrap();
        assert_eq!(m.asset_type, AssetType::Favicon);
        assert_eq!(m.division.as_deref(), Some("korte-hoffmann"));
        assert_eq!(m.promoted_by.as_deref(), Some("favicon"));
        assert_eq!(texts(&m), ["black"]);
    }

    #[test]
    fn bare_icon_key_files_under_parent_brand() {
        let v = vocab();
        let m = resolve_prefix(&v, "monogram_white").unwrap();
        assert_eq!(m.asset_type, AssetType::Monogram);
        assert_eq!(m.division.as_deref(), Some("korte-hoffmann"));
        assert_eq!(m.promoted_by, None);
    }

    #[test]
    fn bare_icon_key_is_not_promoted() {
        let v = vocab();
        let m = resolve_prefix(&v, "favicon_monogram_black").unwrap();
        assert_eq!(m.asset_type, AssetType::Favicon);
        assert_eq!(m.promoted_by, None);
        assert_eq!(texts(&m), ["monogram", "black"]);
    }

    #[test]
    fn alias_keys_resolve_to_canonical_division() {
        let v = vocab();
        for (stem, division) in [
            ("group_left_black_size-m", "gruppe"),
            ("architekten-ingenieure_left_black_size-m", "architekten+ingenieure"),
            ("korte-hoffman_size-m_black", "korte-hoffmann"),
            ("kortehoffmann_size-m_black", "korte-hoffmann"),
            ("dreihaus_size-m_black", "gebaeudedruck"),
        ] {
            let m = resolve_prefix(&v, stem).unwrap();
            assert_eq!(m.division.as_deref(), Some(division), "{stem}");
        }
        // The canonical key is longer than the misspelling and wins.
        assert_eq!(resolve_prefix(&v, "korte-hoffmann_black").unwrap().brand.key, "korte-hoffmann");
    }

    #[test]
    fn longest_prefix_wins() {
        let doc = VocabularyDocument {
            brands: vec![
                BrandKey::division("kh", AssetType::StandardLogo, "KH", "KH"),
                BrandKey::division("kh-extended", AssetType::StandardLogo, "KH Extended", "KH-X"),
            ],
            asset_types: vec![AssetTypeSpec::new(AssetType::StandardLogo, vec![])],
            ..Default::default()
        };
        let v = Vocabulary::new(doc).unwrap();

        let m = resolve_prefix(&v, "kh-extended_black").unwrap();
        assert_eq!(m.brand.key, "kh-extended");
        assert_eq!(m.division.as_deref(), Some("kh-extended"));

        let m = resolve_prefix(&v, "kh_black").unwrap();
        assert_eq!(m.brand.key, "kh");
    }
}
