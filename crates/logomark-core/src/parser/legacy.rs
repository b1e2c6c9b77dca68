//! Naming-convention migrations applied before classification.

use tracing::trace;

use crate::parser::tokenizer::Token;
use crate::types::{AttributeGroup, AttributeValue};
use crate::vocabulary::{AssetTypeSpec, Vocabulary};

/// A token after legacy rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedToken {
    /// Passed through unchanged; resolved against the vocabulary later.
    Plain(String),
    /// A deprecated token translated into its modern assignment.
    Rewritten {
        token: String,
        group: AttributeGroup,
        value: AttributeValue,
    },
}

impl NormalizedToken {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(t) => t,
            Self::Rewritten { token, .. } => token,
        }
    }
}

/// Rewrites legacy alias tokens for the resolved asset type.
///
/// An alias that applies to `spec` becomes a [`NormalizedToken::Rewritten`].
/// An alias token that does not apply is kept only when its own vocabulary
/// group is relevant to `spec`; otherwise it is dropped silently.
pub fn rewrite_legacy(
    vocabulary: &Vocabulary,
    spec: &AssetTypeSpec,
    tokens: &[Token],
) -> Vec<NormalizedToken> {
    tokens
        .iter()
        .filter_map(|token| {
            let text = token.text.as_str();
            let mut aliases = vocabulary.legacy_aliases_for(text).peekable();
            if aliases.peek().is_none() {
                return Some(NormalizedToken::Plain(text.to_string()));
            }

            if let Some(alias) = aliases.find(|a| a.applies_to(spec.asset_type)) {
                return Some(NormalizedToken::Rewritten {
                    token: text.to_string(),
                    group: alias.group,
                    value: alias.value.clone(),
                });
            }

            match vocabulary.lookup(text) {
                Some(entry) if spec.is_relevant(entry.group) => {
                    Some(NormalizedToken::Plain(text.to_string()))
                }
                _ => {
                    trace!(token = text, asset_type = %spec.asset_type, "dropping legacy token");
                    None
                }
            }
        })
        .collect()
}
