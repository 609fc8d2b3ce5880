// ── NAT rule types ──
//
// `DeclaredRuleConfig` is what a user writes; `NatRule` is what the
// gateway's management API accepts and returns. The two are bridged by
// `crate::convert`.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::network::NetworkKind;

/// Translation direction of a gateway NAT rule.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NatAction {
    #[default]
    Dnat,
    Snat,
}

/// Declared attributes of a destination NAT rule.
///
/// Optional string attributes are `None` when not declared; the gateway
/// treats an empty value the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredRuleConfig {
    pub network_name: String,
    pub network_kind: NetworkKind,

    /// User-assigned rule tag. The gateway picks one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_tag: Option<u64>,

    /// Read only. Assigned by the gateway (`user`, `internal_high`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rule_category: String,

    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub logging_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Destination address or range matched by the rule.
    pub original_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icmp_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_port: Option<String>,
}

fn default_true() -> bool {
    true
}

impl DeclaredRuleConfig {
    /// A rule with only the required attributes set and defaults elsewhere.
    pub fn new(
        network_name: impl Into<String>,
        network_kind: NetworkKind,
        original_address: impl Into<String>,
    ) -> Self {
        Self {
            network_name: network_name.into(),
            network_kind,
            rule_tag: None,
            rule_category: String::new(),
            enabled: true,
            logging_enabled: false,
            description: None,
            original_address: original_address.into(),
            protocol: None,
            icmp_type: None,
            original_port: None,
            translated_address: None,
            translated_port: None,
        }
    }
}

/// Edge gateway NAT rule as exchanged with the management API.
///
/// Every value is stored the way the gateway stores it: plain strings,
/// empty when unset. `rule_tag` is the decimal text of an integer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatRule {
    #[serde(rename = "ruleId", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rule_tag: String,
    #[serde(rename = "ruleType", default, skip_serializing_if = "String::is_empty")]
    pub rule_category: String,
    pub action: NatAction,
    #[serde(rename = "vnic")]
    pub interface_index: u32,
    pub enabled: bool,
    #[serde(default)]
    pub logging_enabled: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub original_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub protocol: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icmp_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub original_port: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub translated_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub translated_port: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn declared_defaults_apply_on_deserialize() {
        let cfg: DeclaredRuleConfig = serde_json::from_value(serde_json::json!({
            "network_name": "ext-net",
            "network_kind": "ext",
            "original_address": "192.0.2.10"
        }))
        .unwrap();

        assert_eq!(
            cfg,
            DeclaredRuleConfig::new("ext-net", NetworkKind::External, "192.0.2.10")
        );
    }

    #[test]
    fn nat_rule_reads_gateway_field_names() {
        let rule: NatRule = serde_json::from_value(serde_json::json!({
            "ruleId": "196609",
            "ruleTag": "196609",
            "ruleType": "user",
            "action": "dnat",
            "vnic": 0,
            "enabled": true,
            "originalAddress": "192.0.2.10",
            "translatedAddress": "10.0.0.5"
        }))
        .unwrap();

        assert_eq!(rule.id, "196609");
        assert_eq!(rule.rule_category, "user");
        assert_eq!(rule.action, NatAction::Dnat);
        assert_eq!(rule.interface_index, 0);
        assert!(!rule.logging_enabled);
        assert!(rule.protocol.is_empty());
    }

    #[test]
    fn nat_action_tokens() {
        assert_eq!(NatAction::Dnat.to_string(), "dnat");
        assert_eq!("snat".parse::<NatAction>().unwrap(), NatAction::Snat);
    }
}
