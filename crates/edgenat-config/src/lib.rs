//! Manifest configuration for edgenat.
//!
//! A manifest describes one edge gateway: its scope (org / VDC / name), the
//! networks bound to its vNICs, and the DNAT rules declared against it.
//! Manifests are TOML, loaded through figment with `EDGENAT_` environment
//! overrides, and turn into gateway rule payloads via [`Manifest::plan`].

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use edgenat_core::{
    CoreError, DeclaredRuleConfig, InterfaceBinding, InterfaceTable, NatRule, SchemaError,
    nat_rule_from_config, schema,
};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("invalid rules[{index}]: {source}")]
    Rule {
        index: usize,
        #[source]
        source: SchemaError,
    },

    #[error("cannot plan rules[{index}]: {source}")]
    Plan {
        index: usize,
        #[source]
        source: CoreError,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("failed to serialize manifest: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("manifest loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML manifest structs ───────────────────────────────────────────

/// Top-level manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Manifest {
    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

/// The edge gateway rules are applied to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Organization name. Optional when the API session is scoped to one.
    pub org: Option<String>,

    /// VDC name. Optional when the API session is scoped to one.
    pub vdc: Option<String>,

    /// Edge gateway name.
    #[serde(default)]
    pub edge_gateway: String,

    /// Networks attached to the gateway's vNICs.
    #[serde(default)]
    pub interfaces: Vec<InterfaceBinding>,
}

/// A declared rule plus placement data only the orchestrator uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleEntry {
    #[serde(flatten)]
    pub rule: DeclaredRuleConfig,

    /// Insert the rule above this existing rule id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub above_rule_id: Option<String>,
}

/// A gateway rule payload ready to be sent, with its placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRule {
    pub rule: NatRule,
    pub above_rule_id: Option<String>,
}

impl Manifest {
    /// Check gateway scope, interface table and every rule's attributes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.edge_gateway.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "gateway.edge_gateway".into(),
                reason: "edge gateway name must not be empty".into(),
            });
        }
        self.interface_table()?;
        for (index, entry) in self.rules.iter().enumerate() {
            schema::validate(&entry.rule).map_err(|source| ConfigError::Rule { index, source })?;
            if entry.above_rule_id.as_deref().is_some_and(str::is_empty) {
                return Err(ConfigError::Validation {
                    field: format!("rules[{index}].above_rule_id"),
                    reason: "must not be empty when set".into(),
                });
            }
        }
        Ok(())
    }

    /// Resolver over the gateway's declared interfaces.
    pub fn interface_table(&self) -> Result<InterfaceTable, ConfigError> {
        Ok(InterfaceTable::new(self.gateway.interfaces.iter().cloned())?)
    }

    /// Validate, then translate every declared rule into a gateway rule.
    pub fn plan(&self) -> Result<Vec<PlannedRule>, ConfigError> {
        self.validate()?;
        let table = self.interface_table()?;

        self.rules
            .iter()
            .enumerate()
            .map(|(index, entry)| -> Result<PlannedRule, ConfigError> {
                let rule = nat_rule_from_config(&entry.rule, &table)
                    .map_err(|source| ConfigError::Plan { index, source })?;
                Ok(PlannedRule {
                    rule,
                    above_rule_id: entry.above_rule_id.clone(),
                })
            })
            .collect()
    }
}

// ── Manifest file path ──────────────────────────────────────────────

/// Resolve the default manifest path via XDG / platform conventions.
pub fn manifest_path() -> PathBuf {
    ProjectDirs::from("com", "edgenat", "edgenat").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("manifest.toml");
            p
        },
        |dirs| dirs.config_dir().join("manifest.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("edgenat");
    p
}

// ── Manifest loading ────────────────────────────────────────────────

/// Load the manifest from the default path + environment.
pub fn load_manifest() -> Result<Manifest, ConfigError> {
    load_manifest_from(&manifest_path())
}

/// Load a manifest from `path`, then apply `EDGENAT_` environment overrides
/// (e.g. `EDGENAT_GATEWAY__EDGE_GATEWAY=edge-02`).
pub fn load_manifest_from(path: &Path) -> Result<Manifest, ConfigError> {
    debug!(path = %path.display(), "loading manifest");

    let figment = Figment::new()
        .merge(Serialized::defaults(Manifest::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("EDGENAT_").split("__"));

    let manifest: Manifest = figment.extract()?;
    debug!(
        edge_gateway = %manifest.gateway.edge_gateway,
        interfaces = manifest.gateway.interfaces.len(),
        rules = manifest.rules.len(),
        "manifest loaded"
    );
    Ok(manifest)
}

// ── Manifest saving ─────────────────────────────────────────────────

/// Serialize the manifest to TOML and write it to `path`.
pub fn save_manifest(manifest: &Manifest, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(manifest)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
