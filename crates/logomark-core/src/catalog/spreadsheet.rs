//! Import spreadsheet: one row per variant for CMS collection imports.

use std::collections::BTreeSet;
use std::io;
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::grouper::{SlotKey, Variant};
use crate::catalog::retention::RetentionPredicate;
use crate::error::Result;
use crate::types::{AttributeGroup, AttributeValue};
use crate::vocabulary::Vocabulary;

pub const SLUG_COLUMN: &str = "Slug";
pub const DRAFT_COLUMN: &str = ":draft";
pub const IMAGE_COLUMN: &str = "Image";
pub const ALT_COLUMN: &str = "Image:alt";

/// Header row plus one row of cells per variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ImportSheet {
    /// Lays `variants` out as rows, in the order given.
    ///
    /// Columns are the slug, the draft marker, one column per attribute group
    /// any variant carries (canonical order, internal groups left out), the
    /// preview image with its alt text, then one link column per slot.
    /// A link cell stays blank when any of `cell_rules` rejects that slot.
    #[must_use]
    pub fn build(
        vocabulary: &Vocabulary,
        variants: &[Variant],
        cell_rules: &[Arc<dyn RetentionPredicate>],
    ) -> Self {
        let groups: BTreeSet<AttributeGroup> = variants
            .iter()
            .flat_map(|v| v.attributes.groups())
            .filter(|g| !g.is_internal())
            .collect();
        let slots: BTreeSet<&SlotKey> = variants.iter().flat_map(|v| v.links.keys()).collect();

        let mut headers = vec![SLUG_COLUMN.to_string(), DRAFT_COLUMN.to_string()];
        headers.extend(groups.iter().map(|g| g.display_name().to_string()));
        headers.push(IMAGE_COLUMN.to_string());
        headers.push(ALT_COLUMN.to_string());
        headers.extend(slots.iter().map(|s| s.to_string().to_uppercase()));

        let rows = variants
            .iter()
            .map(|variant| {
                let mut row = vec![variant.slug.clone(), "false".to_string()];
                row.extend(groups.iter().map(|group| {
                    variant
                        .attributes
                        .get(*group)
                        .map(|value| cell_text(vocabulary, *group, value))
                        .unwrap_or_default()
                }));
                row.push(variant.preview.clone().unwrap_or_default());
                row.push(alt_text(vocabulary, variant));
                row.extend(slots.iter().map(|slot| link_cell(variant, slot, cell_rules)));
                row
            })
            .collect();

        Self { headers, rows }
    }

    /// Cell under `header` in row `row`, if both exist.
    #[must_use]
    pub fn cell(&self, row: usize, header: &str) -> Option<&str> {
        let column = self.headers.iter().position(|h| h == header)?;
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Writes the header row and every variant row as CSV.
    ///
    /// # Errors
    ///
    /// Returns `LogomarkError::Csv` if the writer fails.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(&self.headers)?;
        for row in &self.rows {
            out.write_record(row)?;
        }
        out.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

fn cell_text(vocabulary: &Vocabulary, group: AttributeGroup, value: &AttributeValue) -> String {
    match value {
        AttributeValue::Flag(flag) => flag.to_string(),
        AttributeValue::Text(raw) => vocabulary
            .display_name(group, value)
            .unwrap_or(raw.as_str())
            .to_string(),
    }
}

fn link_cell(variant: &Variant, slot: &SlotKey, rules: &[Arc<dyn RetentionPredicate>]) -> String {
    match variant.links.get(slot) {
        Some(locator) if rules.iter().all(|r| r.retain(&variant.attributes, slot, locator)) => {
            locator.clone()
        }
        _ => String::new(),
    }
}

/// "Gruppe Standard Logo, Left, Medium, Black", with set flags appended.
fn alt_text(vocabulary: &Vocabulary, variant: &Variant) -> String {
    let label = |group: AttributeGroup| {
        variant
            .attributes
            .get(group)
            .and_then(|value| vocabulary.display_name(group, value))
    };
    let title: Vec<&str> = [AttributeGroup::Division, AttributeGroup::AssetType]
        .into_iter()
        .filter_map(label)
        .collect();

    let mut parts = vec![title.join(" ")];
    for (group, value) in variant.attributes.iter() {
        let shown = match value {
            AttributeValue::Flag(flag) => *flag,
            AttributeValue::Text(_) => !matches!(
                group,
                AttributeGroup::Division | AttributeGroup::AssetType | AttributeGroup::ColorMode
            ),
        };
        if let Some(name) = label(group).filter(|_| shown) {
            parts.push(name.to_string());
        }
    }
    parts.retain(|p| !p.is_empty());
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BuiltinRule;
    use crate::engine::Engine;
    use crate::types::RawFileRecord;

    fn variants(locators: &[&str]) -> Vec<Variant> {
        let records: Vec<_> = locators.iter().map(|l| RawFileRecord::from_locator(*l)).collect();
        Engine::korte_hoffmann().unwrap().run(&records).unwrap().variants
    }

    fn sheet(variants: &[Variant], rules: &[Arc<dyn RetentionPredicate>]) -> ImportSheet {
        ImportSheet::build(&Vocabulary::korte_hoffmann().unwrap(), variants, rules)
    }

    const LOGOS: &[&str] = &[
        "logos/gruppe_left_white_size-m.jpg",
        "logos/gruppe_left_white_size-m.png",
        "logos/gruppe_left_bar_black_size-m.jpg",
        "logos/gruppe_left_bar_black_size-m.svg",
    ];

    #[test]
    fn columns_follow_groups_then_slots() {
        let sheet = sheet(&variants(LOGOS), &[]);
        assert_eq!(
            sheet.headers,
            [
                "Slug",
                ":draft",
                "Asset Type",
                "Division",
                "Lockup",
                "Bar",
                "Optical Size",
                "Color",
                "Trademark",
                "Clearspace",
                "Image",
                "Image:alt",
                "JPG",
                "PNG",
                "SVG",
            ]
        );
        assert_eq!(sheet.rows.len(), 2);
        assert!(sheet.rows.iter().all(|r| r.len() == sheet.headers.len()));
    }

    #[test]
    fn cells_carry_display_names_and_flags() {
        let sheet = sheet(&variants(LOGOS), &[]);
        let black = sheet
            .rows
            .iter()
            .position(|r| r[0] == "gruppe_left_bar_size-m_black")
            .unwrap();

        assert_eq!(sheet.cell(black, "Division"), Some("Gruppe"));
        assert_eq!(sheet.cell(black, "Asset Type"), Some("Standard Logo"));
        assert_eq!(sheet.cell(black, "Bar"), Some("true"));
        assert_eq!(sheet.cell(black, "Trademark"), Some("false"));
        assert_eq!(sheet.cell(black, "PNG"), Some(""));
        assert_eq!(
            sheet.cell(black, "Image"),
            Some("logos/gruppe_left_bar_black_size-m.jpg")
        );
        let alt = sheet.cell(black, "Image:alt").unwrap();
        assert!(alt.starts_with("Gruppe Standard Logo, Left, Bar"), "{alt}");
    }

    #[test]
    fn white_variants_get_no_jpeg_link() {
        let variants = variants(LOGOS);
        let rules = [BuiltinRule::WhiteJpeg.predicate()];
        let sheet = sheet(&variants, &rules);

        let white = sheet.rows.iter().position(|r| r[0] == "gruppe_left_size-m_white").unwrap();
        let black = 1 - white;
        assert_eq!(sheet.cell(white, "JPG"), Some(""));
        assert_eq!(sheet.cell(white, "PNG"), Some("logos/gruppe_left_white_size-m.png"));
        assert_eq!(
            sheet.cell(black, "JPG"),
            Some("logos/gruppe_left_bar_black_size-m.jpg")
        );
        // The sheet rule blanks the cell; the variant keeps its file.
        assert!(variants.iter().all(|v| v.links.len() == 2));
    }

    #[test]
    fn csv_has_header_and_a_line_per_variant() {
        let sheet = sheet(&variants(LOGOS), &[BuiltinRule::WhiteJpeg.predicate()]);
        let mut out = Vec::new();
        sheet.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Slug,:draft,Asset Type,Division,"));
        assert!(lines[0].ends_with(",Image,Image:alt,JPG,PNG,SVG"));
        // Alt text holds commas, so the cell is quoted.
        assert!(lines.iter().skip(1).all(|l| l.contains(",\"Gruppe Standard Logo, Left")));
    }

    #[test]
    fn empty_variant_list_writes_fixed_columns() {
        let sheet = sheet(&[], &[]);
        assert_eq!(sheet.headers, ["Slug", ":draft", "Image", "Image:alt"]);
        assert!(sheet.rows.is_empty());
    }
}
