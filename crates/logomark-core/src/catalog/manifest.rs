use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::types::{AttributeGroup, AttributeValue, ClassifiedAttributes};
use crate::vocabulary::Vocabulary;

/// One selectable value of a manifest group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestOption {
    pub value: AttributeValue,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestGroup {
    pub display_name: String,
    pub options: Vec<ManifestOption>,
}

/// Per-group catalog of values that actually occur in accepted files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Manifest(BTreeMap<AttributeGroup, ManifestGroup>);

impl Manifest {
    /// Builds the manifest over every attribute set in `attributes`.
    ///
    /// Internal groups are left out. Options are unique and sorted by their
    /// string form. Values without a display name fall back to the raw value.
    pub fn build<'a, I>(vocabulary: &Vocabulary, attributes: I) -> Self
    where
        I: IntoIterator<Item = &'a ClassifiedAttributes>,
    {
        let mut observed: BTreeMap<AttributeGroup, BTreeSet<AttributeValue>> = BTreeMap::new();
        for attrs in attributes {
            for (group, value) in attrs.iter() {
                if !group.is_internal() {
                    observed.entry(group).or_default().insert(value.clone());
                }
            }
        }

        let groups = observed
            .into_iter()
            .map(|(group, values)| {
                let mut values: Vec<AttributeValue> = values.into_iter().collect();
                values.sort_by_cached_key(|v| (v.to_string(), v.clone()));
                let options = values
                    .into_iter()
                    .map(|value| ManifestOption {
                        display_name: vocabulary
                            .display_name(group, &value)
                            .map_or_else(|| value.to_string(), str::to_string),
                        value,
                    })
                    .collect();
                let entry = ManifestGroup {
                    display_name: group.display_name().to_string(),
                    options,
                };
                (group, entry)
            })
            .collect();

        Self(groups)
    }

    #[must_use]
    pub fn get(&self, group: AttributeGroup) -> Option<&ManifestGroup> {
        self.0.get(&group)
    }

    pub fn groups(&self) -> impl Iterator<Item = AttributeGroup> + '_ {
        self.0.keys().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
