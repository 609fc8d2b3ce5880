#![allow(clippy::unwrap_used)]
// Loading, saving and planning manifests from disk.

use std::fs;

use pretty_assertions::assert_eq;

use edgenat_config::{ConfigError, Manifest, load_manifest_from, save_manifest};
use edgenat_core::{CoreError, NatAction, NetworkKind, ResolveError, config_from_nat_rule};

const MANIFEST: &str = r#"
[gateway]
org = "acme"
vdc = "vdc-01"
edge_gateway = "edge-01"

[[gateway.interfaces]]
index = 0
name = "uplink"
kind = "ext"

[[gateway.interfaces]]
index = 1
name = "app-net"
kind = "org"

[[rules]]
network_name = "uplink"
network_kind = "ext"
original_address = "192.0.2.10"
protocol = "tcp"
original_port = "80"
translated_address = "10.0.0.5"
translated_port = "8080"

[[rules]]
network_name = "app-net"
network_kind = "org"
rule_tag = 65535
logging_enabled = true
description = "ping the jump host"
original_address = "10.10.0.1"
protocol = "icmp"
icmp_type = "echo-request"
translated_address = "10.10.0.20"
above_rule_id = "196609"
"#;

fn write_manifest(body: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.toml");
    fs::write(&path, body).unwrap();
    (dir, path)
}

#[test]
fn loads_gateway_and_rules() {
    let (_dir, path) = write_manifest(MANIFEST);
    let manifest = load_manifest_from(&path).unwrap();

    assert_eq!(manifest.gateway.org.as_deref(), Some("acme"));
    assert_eq!(manifest.gateway.edge_gateway, "edge-01");
    assert_eq!(manifest.gateway.interfaces.len(), 2);
    assert_eq!(manifest.rules.len(), 2);

    let web = &manifest.rules[0].rule;
    assert!(web.enabled);
    assert!(!web.logging_enabled);
    assert_eq!(web.rule_tag, None);

    let ping = &manifest.rules[1];
    assert_eq!(ping.rule.network_kind, NetworkKind::Organization);
    assert_eq!(ping.rule.rule_tag, Some(65_535));
    assert_eq!(ping.above_rule_id.as_deref(), Some("196609"));
}

#[test]
fn plans_every_rule() {
    let (_dir, path) = write_manifest(MANIFEST);
    let manifest = load_manifest_from(&path).unwrap();
    let planned = manifest.plan().unwrap();

    assert_eq!(planned.len(), 2);
    assert_eq!(planned[0].rule.interface_index, 0);
    assert_eq!(planned[0].rule.action, NatAction::Dnat);
    assert_eq!(planned[0].rule.rule_tag, "");
    assert_eq!(planned[0].above_rule_id, None);

    assert_eq!(planned[1].rule.interface_index, 1);
    assert_eq!(planned[1].rule.rule_tag, "65535");
    assert_eq!(planned[1].rule.icmp_type, "echo-request");
    assert_eq!(planned[1].above_rule_id.as_deref(), Some("196609"));
}

#[test]
fn planned_rules_read_back_to_declared_rules() {
    let (_dir, path) = write_manifest(MANIFEST);
    let manifest = load_manifest_from(&path).unwrap();
    let table = manifest.interface_table().unwrap();

    for (entry, planned) in manifest.rules.iter().zip(manifest.plan().unwrap()) {
        let back = config_from_nat_rule(&planned.rule, &table).unwrap();
        assert_eq!(back, entry.rule);
    }
}

#[test]
fn plan_reports_unknown_network_with_index() {
    let body = MANIFEST.replace("network_name = \"app-net\"", "network_name = \"ghost\"");
    let (_dir, path) = write_manifest(&body);
    let manifest = load_manifest_from(&path).unwrap();

    let err = manifest.plan().unwrap_err();
    match err {
        ConfigError::Plan { index, source } => {
            assert_eq!(index, 1);
            assert_eq!(
                source.not_found(),
                Some(&ResolveError::NetworkNotFound {
                    name: "ghost".into(),
                    kind: NetworkKind::Organization,
                })
            );
        }
        other => panic!("expected Plan error, got: {other:?}"),
    }
}

#[test]
fn plan_rejects_icmp_type_without_icmp() {
    let body = MANIFEST.replace("protocol = \"icmp\"", "protocol = \"udp\"");
    let (_dir, path) = write_manifest(&body);
    let err = load_manifest_from(&path).unwrap().plan().unwrap_err();
    assert!(
        matches!(err, ConfigError::Rule { index: 1, .. }),
        "got: {err:?}"
    );
}

#[test]
fn unknown_network_kind_fails_to_load() {
    let body = MANIFEST.replace("kind = \"org\"", "kind = \"organization\"");
    let (_dir, path) = write_manifest(&body);
    assert!(matches!(
        load_manifest_from(&path),
        Err(ConfigError::Figment(_))
    ));
}

#[test]
fn missing_file_loads_empty_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = load_manifest_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(manifest, Manifest::default());
    assert!(matches!(
        manifest.validate(),
        Err(ConfigError::Validation { .. })
    ));
}

#[test]
fn duplicate_vnic_fails_validation() {
    let body = MANIFEST.replace("index = 1", "index = 0");
    let (_dir, path) = write_manifest(&body);
    let err = load_manifest_from(&path).unwrap().validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Core(CoreError::DuplicateInterface { index: 0, .. })
    ));
}

#[test]
fn save_then_load_is_lossless() {
    let (_dir, path) = write_manifest(MANIFEST);
    let manifest = load_manifest_from(&path).unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("nested").join("manifest.toml");
    save_manifest(&manifest, &out).unwrap();

    assert_eq!(load_manifest_from(&out).unwrap(), manifest);
}
