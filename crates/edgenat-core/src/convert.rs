// ── Declared config <-> gateway NAT rule conversions ──
//
// Two pure functions bridge `DeclaredRuleConfig` and `NatRule`. Each does
// one resolver lookup and then copies fields. The only parsing is the rule
// tag, which the gateway stores as text and which must never be coerced.

use tracing::{debug, warn};

use crate::error::{CoreError, Direction};
use crate::model::{DeclaredRuleConfig, NatAction, NatRule};
use crate::resolver::InterfaceResolver;

// ── Helpers ────────────────────────────────────────────────────────

/// Render a declared rule tag the way the gateway stores it.
///
/// `None` becomes the empty string, which lets the gateway assign a tag.
pub fn render_rule_tag(tag: Option<u64>) -> String {
    tag.map(|t| t.to_string()).unwrap_or_default()
}

/// Parse a gateway rule tag. Empty means unset.
pub fn parse_rule_tag(raw: &str) -> Result<Option<u64>, CoreError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u64>()
        .map(Some)
        .map_err(|source| CoreError::Format {
            field: "rule_tag",
            value: raw.to_owned(),
            source,
        })
}

fn non_empty(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_owned())
}

// ── Declared config -> NAT rule ─────────────────────────────────────

/// Build the gateway rule for a declared DNAT rule.
///
/// The network reference is resolved to a vNIC index; everything else is
/// copied. Rule id and rule category are left for the gateway to fill.
pub fn nat_rule_from_config<R>(
    config: &DeclaredRuleConfig,
    resolver: &R,
) -> Result<NatRule, CoreError>
where
    R: InterfaceResolver + ?Sized,
{
    let interface_index = resolver
        .resolve_index(&config.network_name, config.network_kind)
        .map_err(|source| CoreError::Resolution {
            direction: Direction::Inbound,
            source,
        })?;
    debug!(
        network = %config.network_name,
        kind = %config.network_kind,
        vnic = interface_index,
        "resolved network to vNIC"
    );

    Ok(NatRule {
        id: String::new(),
        rule_tag: render_rule_tag(config.rule_tag),
        rule_category: String::new(),
        action: NatAction::Dnat,
        interface_index,
        enabled: config.enabled,
        logging_enabled: config.logging_enabled,
        description: config.description.clone().unwrap_or_default(),
        original_address: config.original_address.clone(),
        protocol: config.protocol.clone().unwrap_or_default(),
        icmp_type: config.icmp_type.clone().unwrap_or_default(),
        original_port: config.original_port.clone().unwrap_or_default(),
        translated_address: config.translated_address.clone().unwrap_or_default(),
        translated_port: config.translated_port.clone().unwrap_or_default(),
    })
}

// ── NAT rule -> declared config ─────────────────────────────────────

/// Read a gateway rule back into declared attributes.
///
/// Either every attribute is produced or an error is returned; callers
/// persist the result only on success.
pub fn config_from_nat_rule<R>(
    rule: &NatRule,
    resolver: &R,
) -> Result<DeclaredRuleConfig, CoreError>
where
    R: InterfaceResolver + ?Sized,
{
    let network = resolver
        .resolve_network(rule.interface_index)
        .map_err(|source| CoreError::Resolution {
            direction: Direction::Outbound,
            source,
        })?;
    debug!(
        vnic = rule.interface_index,
        network = %network.name,
        kind = %network.kind,
        "resolved vNIC to network"
    );

    let rule_tag = parse_rule_tag(&rule.rule_tag).inspect_err(|_| {
        warn!(rule_id = %rule.id, rule_tag = %rule.rule_tag, "gateway returned a malformed rule tag");
    })?;

    Ok(DeclaredRuleConfig {
        network_name: network.name,
        network_kind: network.kind,
        rule_tag,
        rule_category: rule.rule_category.clone(),
        enabled: rule.enabled,
        logging_enabled: rule.logging_enabled,
        description: non_empty(&rule.description),
        original_address: rule.original_address.clone(),
        protocol: non_empty(&rule.protocol),
        icmp_type: non_empty(&rule.icmp_type),
        original_port: non_empty(&rule.original_port),
        translated_address: non_empty(&rule.translated_address),
        translated_port: non_empty(&rule.translated_port),
    })
}
