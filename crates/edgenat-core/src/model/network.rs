// ── Network reference types ──
//
// A NAT rule on an edge gateway is bound to one of the gateway's vNICs.
// Users refer to that vNIC by the network attached to it; the gateway
// refers to it by index. These types carry the user-facing half.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Classification of the network a NAT rule attaches to.
///
/// Only two kinds exist. The textual forms (`ext`, `org`) are the ones
/// users write in configuration and are case sensitive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum NetworkKind {
    #[serde(rename = "ext")]
    #[strum(serialize = "ext")]
    External,
    #[serde(rename = "org")]
    #[strum(serialize = "org")]
    Organization,
}

/// A `(name, kind)` pair identifying a network attached to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkRef {
    pub name: String,
    pub kind: NetworkKind,
}

impl NetworkRef {
    pub fn new(name: impl Into<String>, kind: NetworkKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// One vNIC of the gateway and the network bound to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceBinding {
    pub index: u32,
    pub name: String,
    pub kind: NetworkKind,
}

impl InterfaceBinding {
    pub fn network(&self) -> NetworkRef {
        NetworkRef::new(self.name.clone(), self.kind)
    }
}
