use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::types::RejectionEntry;

/// Files rejected for one identical reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasonGroup {
    pub reason: String,
    pub count: usize,
    /// Up to the configured number of filenames, sorted.
    pub examples: Vec<String>,
}

/// The rejection log deduplicated by reason text.
///
/// A file rejected for several reasons counts once under each of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RejectionSummary {
    pub total_files: usize,
    pub groups: Vec<ReasonGroup>,
}

impl RejectionSummary {
    #[must_use]
    pub fn from_entries(entries: &[RejectionEntry], max_examples: usize) -> Self {
        let mut by_reason: BTreeMap<String, Vec<&str>> = BTreeMap::new();
        for entry in entries {
            for reason in entry.reason_texts() {
                by_reason.entry(reason).or_default().push(&entry.file);
            }
        }

        let groups = by_reason
            .into_iter()
            .map(|(reason, mut files)| {
                files.sort_unstable();
                let count = files.len();
                let examples = files
                    .into_iter()
                    .take(max_examples)
                    .map(str::to_string)
                    .collect();
                ReasonGroup {
                    reason,
                    count,
                    examples,
                }
            })
            .collect();

        Self {
            total_files: entries.len(),
            groups,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_files == 0
    }
}

impl fmt::Display for RejectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} file(s) rejected", self.total_files)?;
        for group in &self.groups {
            write!(f, "  {} [{}]", group.reason, group.count)?;
            if !group.examples.is_empty() {
                write!(f, ": {}", group.examples.join(", "))?;
                if group.count > group.examples.len() {
                    write!(f, ", ...")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
