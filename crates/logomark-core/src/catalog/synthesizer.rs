//! Canonical destination paths and filenames for accepted files.

use serde::Serialize;

use crate::error::{LogomarkError, Result};
use crate::types::{AcceptedRecord, AttributeGroup, AttributeValue, ClassifiedAttributes};
use crate::vocabulary::{AssetTypeSpec, PathSegment, TOKEN_SEPARATOR, Vocabulary};

/// Separator between destination folder segments.
pub const FOLDER_SEPARATOR: &str = "/";

/// Where one accepted file belongs in the canonical layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub source_locator: String,
    pub destination_folder_path: String,
    pub destination_filename: String,
    /// Name of the per-variant archive this file is bundled into.
    pub bundle_name: String,
}

impl Placement {
    /// Folder path and filename joined.
    #[must_use]
    pub fn destination(&self) -> String {
        if self.destination_folder_path.is_empty() {
            self.destination_filename.clone()
        } else {
            format!(
                "{}{FOLDER_SEPARATOR}{}",
                self.destination_folder_path, self.destination_filename
            )
        }
    }
}

/// Computes the placement of one accepted file.
///
/// # Errors
///
/// Returns `LogomarkError::Synthesis` when the attribute set cannot be
/// rendered with `vocabulary`, and `LogomarkError::UnknownAssetType` when
/// the asset type has no `AssetTypeSpec`.
pub fn synthesize(vocabulary: &Vocabulary, accepted: &AcceptedRecord) -> Result<Placement> {
    let attributes = &accepted.attributes;
    let spec = vocabulary.spec(asset_type_of(attributes)?)?;

    let folder = folder_segments(vocabulary, spec, attributes)?.join(FOLDER_SEPARATOR);
    let stem = canonical_stem(vocabulary, attributes, true)?;
    let bundle = canonical_stem(vocabulary, attributes, false)?;

    let destination_filename = if accepted.record.extension().is_empty() {
        stem
    } else {
        format!("{stem}.{}", accepted.record.extension())
    };

    Ok(Placement {
        source_locator: accepted.record.locator().to_string(),
        destination_folder_path: folder,
        destination_filename,
        bundle_name: format!("{bundle}.zip"),
    })
}

/// Renders the destination folder segments for an attribute set.
///
/// # Errors
///
/// Returns `LogomarkError::Synthesis` if a division segment has no value.
pub fn folder_segments(
    vocabulary: &Vocabulary,
    spec: &AssetTypeSpec,
    attributes: &ClassifiedAttributes,
) -> Result<Vec<String>> {
    let mut segments = Vec::with_capacity(spec.folder_schema.len());
    for segment in &spec.folder_schema {
        match segment {
            PathSegment::Literal(name) => segments.push(name.clone()),
            PathSegment::Group(AttributeGroup::Division) => {
                let Some(division) = attributes.division() else {
                    // Undivided variants of a divided schema.
                    continue;
                };
                let folder = vocabulary.division_folder(division).unwrap_or(division);
                if folder.is_empty() {
                    return Err(LogomarkError::Synthesis("empty division folder".into()));
                }
                segments.push(folder.to_string());
            }
            PathSegment::Group(group) => {
                if let Some(value) = attributes.get(*group) {
                    let label = group.folder_label();
                    segments.push(format!("{label}={}", folder_value(*group, value)));
                }
            }
        }
    }
    Ok(segments)
}

/// Canonical filename stem: the asset prefix followed by one token per
/// attribute, in canonical group order. Flags equal to their declared
/// default are left out.
///
/// The result parses back to the same attribute set, so distinct attribute
/// sets never share a stem.
///
/// # Errors
///
/// Returns `LogomarkError::Synthesis` if the prefix or a value has no token.
pub fn canonical_stem(
    vocabulary: &Vocabulary,
    attributes: &ClassifiedAttributes,
    include_color_mode: bool,
) -> Result<String> {
    let asset_type = asset_type_of(attributes)?;
    let spec = vocabulary.spec(asset_type)?;
    let prefix = vocabulary
        .prefix_for(asset_type, attributes.division())
        .ok_or_else(|| {
            LogomarkError::Synthesis(format!(
                "no prefix for {asset_type} in division {:?}",
                attributes.division()
            ))
        })?;

    let mut tokens = vec![prefix];
    for (group, value) in attributes.iter() {
        if matches!(group, AttributeGroup::AssetType | AttributeGroup::Division)
            || (group == AttributeGroup::ColorMode && !include_color_mode)
        {
            continue;
        }
        // A flag is implied only when it equals the declared default.
        if matches!(value, AttributeValue::Flag(flag) if spec.default_for(group) == Some(*flag)) {
            continue;
        }
        let token = vocabulary.canonical_token(group, value).ok_or_else(|| {
            LogomarkError::Synthesis(format!("no token encodes {group}={value}"))
        })?;
        tokens.push(token.to_string());
    }

    Ok(tokens.join(TOKEN_SEPARATOR.to_string().as_str()))
}

fn asset_type_of(attributes: &ClassifiedAttributes) -> Result<crate::types::AssetType> {
    attributes
        .asset_type()
        .ok_or_else(|| LogomarkError::Synthesis("attribute set has no asset type".into()))
}

fn folder_value(group: AttributeGroup, value: &AttributeValue) -> String {
    match value {
        AttributeValue::Flag(true) => "Yes".to_string(),
        AttributeValue::Flag(false) => "No".to_string(),
        AttributeValue::Text(text) if group == AttributeGroup::OpticalSize => text.to_uppercase(),
        AttributeValue::Text(text) => title_case(text),
    }
}

/// Capitalizes each word, keeping `-` and `+` delimiters in place.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        word_start = matches!(c, '-' | '+');
    }
    out
}
