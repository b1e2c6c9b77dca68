//! Token classification against the vocabulary.

use crate::parser::legacy::NormalizedToken;
use crate::types::{AttributeGroup, AttributeValue, ClassifiedAttributes, RejectionReason};
use crate::vocabulary::Vocabulary;

/// Everything the token pass found besides the attribute assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenFindings {
    /// Tokens outside the vocabulary and not asset keys, in filename order.
    pub unmatched: Vec<String>,
    /// One `DuplicateAttribute` per repeated group assignment.
    pub duplicates: Vec<RejectionReason>,
    /// Sentinel tokens seen, with the group they assigned.
    pub sentinels: Vec<(AttributeGroup, String)>,
}

impl TokenFindings {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unmatched.is_empty() && self.duplicates.is_empty()
    }
}

/// Assigns every token into `attributes`.
///
/// A group that is already set keeps its first value and the repeat is
/// recorded as a duplicate. A brand key or asset marker assigns the division
/// or asset type it stands for, so a second one conflicts with the prefix.
pub fn classify_tokens(
    vocabulary: &Vocabulary,
    tokens: &[NormalizedToken],
    attributes: &mut ClassifiedAttributes,
) -> TokenFindings {
    let mut findings = TokenFindings::default();

    for token in tokens {
        let (group, value) = match token {
            NormalizedToken::Rewritten { group, value, .. } => (*group, value.clone()),
            NormalizedToken::Plain(text) => match vocabulary.lookup(text) {
                Some(entry) => {
                    if entry.sentinel {
                        findings.sentinels.push((entry.group, text.clone()));
                    }
                    (entry.group, entry.value())
                }
                None => match vocabulary.identity_of(text) {
                    Some(identity) => identity,
                    None => {
                        findings.unmatched.push(text.clone());
                        continue;
                    }
                },
            },
        };
        assign(attributes, group, value, &mut findings);
    }

    findings
}

fn assign(
    attributes: &mut ClassifiedAttributes,
    group: AttributeGroup,
    value: AttributeValue,
    findings: &mut TokenFindings,
) {
    match attributes.get(group) {
        Some(first) => findings.duplicates.push(RejectionReason::DuplicateAttribute {
            group,
            first: first.to_string(),
            second: value.to_string(),
        }),
        None => {
            attributes.insert(group, value);
        }
    }
}
