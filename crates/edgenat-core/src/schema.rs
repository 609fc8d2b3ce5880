// ── Attribute schema checks ──
//
// Shape checks on declared attributes and the plan-time equivalences the
// gateway applies. None of this runs inside the mappers; the
// configuration layer calls it before planning.

use thiserror::Error;

use crate::model::DeclaredRuleConfig;

/// ICMP types the gateway accepts for DNAT rules.
pub const ICMP_TYPES: &[&str] = &[
    "any",
    "address-mask-request",
    "address-mask-reply",
    "destination-unreachable",
    "echo-request",
    "echo-reply",
    "parameter-problem",
    "redirect",
    "router-advertisement",
    "router-solicitation",
    "source-quench",
    "time-exceeded",
    "timestamp-request",
    "timestamp-reply",
];

/// Token the gateway reports for "no restriction" on protocol and ports.
pub const ANY: &str = "any";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("{attribute} is required")]
    Missing { attribute: &'static str },

    #[error("{attribute} must be lowercase, got '{value}'")]
    NotLowercase {
        attribute: &'static str,
        value: String,
    },

    #[error("unknown icmp_type '{value}'")]
    UnknownIcmpType { value: String },

    #[error("icmp_type is only supported with protocol 'icmp' (protocol is '{protocol}')")]
    IcmpTypeWithoutIcmp { protocol: String },
}

impl SchemaError {
    /// Attribute the error refers to.
    pub fn attribute(&self) -> &'static str {
        match self {
            Self::Missing { attribute } | Self::NotLowercase { attribute, .. } => attribute,
            Self::UnknownIcmpType { .. } | Self::IcmpTypeWithoutIcmp { .. } => "icmp_type",
        }
    }
}

fn require(attribute: &'static str, value: &str) -> Result<(), SchemaError> {
    if value.is_empty() {
        return Err(SchemaError::Missing { attribute });
    }
    Ok(())
}

fn lowercase(attribute: &'static str, value: Option<&str>) -> Result<(), SchemaError> {
    match value {
        Some(v) if v != v.to_lowercase() => Err(SchemaError::NotLowercase {
            attribute,
            value: v.to_owned(),
        }),
        _ => Ok(()),
    }
}

/// Check a declared rule's attribute shapes.
pub fn validate(config: &DeclaredRuleConfig) -> Result<(), SchemaError> {
    require("network_name", &config.network_name)?;
    require("original_address", &config.original_address)?;
    lowercase("protocol", config.protocol.as_deref())?;
    lowercase("icmp_type", config.icmp_type.as_deref())?;

    if let Some(icmp_type) = config.icmp_type.as_deref() {
        if !ICMP_TYPES.contains(&icmp_type) {
            return Err(SchemaError::UnknownIcmpType {
                value: icmp_type.to_owned(),
            });
        }
        let protocol = config.protocol.as_deref().unwrap_or_default();
        if protocol != "icmp" {
            return Err(SchemaError::IcmpTypeWithoutIcmp {
                protocol: protocol.to_owned(),
            });
        }
    }
    Ok(())
}

// ── Diff suppression ───────────────────────────────────────────────

/// True when `old` and `new` only differ by `word` standing in for an
/// unset value. The gateway reports `any` for an unset protocol or port.
pub fn suppress_word_to_empty(word: &str, old: &str, new: &str) -> bool {
    (old == word && new.is_empty()) || (old.is_empty() && new == word)
}

/// One attribute whose declared value differs from the observed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    pub attribute: &'static str,
    /// The rule has to be recreated for this change to apply.
    pub force_new: bool,
}

fn text(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}

/// Attributes that differ between a desired config and one read back from
/// the gateway.
///
/// `rule_category` is read only and never reported. `rule_tag` is only
/// compared when the desired config pins one.
pub fn diff(desired: &DeclaredRuleConfig, observed: &DeclaredRuleConfig) -> Vec<AttributeChange> {
    let mut changes = Vec::new();
    let mut push = |attribute: &'static str, changed: bool, force_new: bool| {
        if changed {
            changes.push(AttributeChange {
                attribute,
                force_new,
            });
        }
    };

    let any_equivalent = |old: Option<&String>, new: Option<&String>| {
        let (old, new) = (text(old), text(new));
        old == new || suppress_word_to_empty(ANY, old, new)
    };

    push(
        "network_name",
        desired.network_name != observed.network_name,
        false,
    );
    push(
        "network_kind",
        desired.network_kind != observed.network_kind,
        false,
    );
    push(
        "rule_tag",
        desired.rule_tag.is_some() && desired.rule_tag != observed.rule_tag,
        true,
    );
    push("enabled", desired.enabled != observed.enabled, false);
    push(
        "logging_enabled",
        desired.logging_enabled != observed.logging_enabled,
        false,
    );
    push(
        "description",
        text(desired.description.as_ref()) != text(observed.description.as_ref()),
        false,
    );
    push(
        "original_address",
        desired.original_address != observed.original_address,
        false,
    );
    push(
        "protocol",
        !any_equivalent(observed.protocol.as_ref(), desired.protocol.as_ref()),
        false,
    );
    push(
        "icmp_type",
        text(desired.icmp_type.as_ref()) != text(observed.icmp_type.as_ref()),
        false,
    );
    push(
        "original_port",
        !any_equivalent(
            observed.original_port.as_ref(),
            desired.original_port.as_ref(),
        ),
        false,
    );
    push(
        "translated_address",
        text(desired.translated_address.as_ref()) != text(observed.translated_address.as_ref()),
        false,
    );
    push(
        "translated_port",
        !any_equivalent(
            observed.translated_port.as_ref(),
            desired.translated_port.as_ref(),
        ),
        false,
    );

    changes
}
