use crate::parser::tokens::TokenFindings;
use crate::types::{AttributeGroup, ClassifiedAttributes, RejectionReason};
use crate::vocabulary::AssetTypeSpec;

/// Applies boolean defaults and checks `attributes` against `spec`.
///
/// Returns every reason the file fails, or an empty list when it is
/// accepted. Groups the asset type does not name are left as they are.
pub fn validate(
    spec: &AssetTypeSpec,
    attributes: &mut ClassifiedAttributes,
    findings: TokenFindings,
) -> Vec<RejectionReason> {
    for default in &spec.defaults {
        attributes.insert_default(default.group, default.value);
    }

    let mut reasons = Vec::new();

    if !findings.unmatched.is_empty() {
        reasons.push(RejectionReason::UnmatchedTokens {
            tokens: findings.unmatched,
        });
    }

    reasons.extend(findings.duplicates);

    let mut missing: Vec<AttributeGroup> = spec
        .required
        .iter()
        .copied()
        .filter(|g| !attributes.contains(*g))
        .collect();
    missing.sort();
    missing.dedup();
    if !missing.is_empty() {
        reasons.push(RejectionReason::MissingRequired {
            asset_type: spec.asset_type,
            groups: missing,
        });
    }

    for (group, token) in findings.sentinels {
        if spec.requires(group) {
            reasons.push(RejectionReason::SentinelNotAllowed {
                asset_type: spec.asset_type,
                group,
                token,
            });
        }
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AssetType, AttributeValue};

    fn spec() -> AssetTypeSpec {
        AssetTypeSpec::new(
            AssetType::StandardLogo,
            vec![AttributeGroup::Division, AttributeGroup::Lockup, AttributeGroup::Color],
        )
        .with_defaults(&[AttributeGroup::Bar, AttributeGroup::Trademark])
    }

    fn complete() -> ClassifiedAttributes {
        let mut attrs = ClassifiedAttributes::new();
        attrs.insert(AttributeGroup::Division, "gruppe");
        attrs.insert(AttributeGroup::Lockup, "left");
        attrs.insert(AttributeGroup::Color, "black");
        attrs
    }

    #[test]
    fn complete_set_accepted_with_defaults() {
        let mut attrs = complete();
        let reasons = validate(&spec(), &mut attrs, TokenFindings::default());
        assert!(reasons.is_empty());
        assert_eq!(attrs.get(AttributeGroup::Bar), Some(&AttributeValue::Flag(false)));
        assert_eq!(attrs.get(AttributeGroup::Trademark), Some(&AttributeValue::Flag(false)));
        assert!(!attrs.contains(AttributeGroup::Clearspace));
    }

    #[test]
    fn explicit_flag_survives_defaulting() {
        let mut attrs = complete();
        attrs.insert(AttributeGroup::Bar, true);
        validate(&spec(), &mut attrs, TokenFindings::default());
        assert!(attrs.flag(AttributeGroup::Bar));
    }

    #[test]
    fn all_reasons_reported_together() {
        let mut attrs = ClassifiedAttributes::new();
        attrs.insert(AttributeGroup::Division, "gruppe");
        let findings = TokenFindings {
            unmatched: vec!["zebra".into()],
            duplicates: vec![RejectionReason::DuplicateAttribute {
                group: AttributeGroup::Color,
                first: "black".into(),
                second: "white".into(),
            }],
            sentinels: vec![],
        };
        let reasons = validate(&spec(), &mut attrs, findings);
        assert_eq!(reasons.len(), 3);
        assert!(matches!(reasons[0], RejectionReason::UnmatchedTokens { .. }));
        assert!(matches!(reasons[1], RejectionReason::DuplicateAttribute { .. }));
        match &reasons[2] {
            RejectionReason::MissingRequired { groups, .. } => {
                assert_eq!(groups, &vec![AttributeGroup::Lockup, AttributeGroup::Color]);
            }
            other => panic!("unexpected reason: {other}"),
        }
    }

    #[test]
    fn sentinel_rejected_only_when_group_required() {
        let mut attrs = complete();
        let findings = TokenFindings {
            sentinels: vec![(AttributeGroup::Lockup, "no-lockup".into())],
            ..Default::default()
        };
        let reasons = validate(&spec(), &mut attrs, findings.clone());
        assert!(matches!(reasons[..], [RejectionReason::SentinelNotAllowed { .. }]));

        let relaxed = AssetTypeSpec::new(AssetType::Favicon, vec![AttributeGroup::Color]);
        let mut attrs = complete();
        assert!(validate(&relaxed, &mut attrs, findings).is_empty());
    }
}
