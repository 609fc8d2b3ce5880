// ── Network interface resolution ──
//
// The mappers never decide which vNIC a network lives on. They ask an
// `InterfaceResolver` bound to one gateway, and the resolver's answer is
// authoritative for the duration of the call.

use std::collections::BTreeMap;
use std::collections::HashMap;

use tracing::trace;

use crate::error::{CoreError, ResolveError};
use crate::model::{InterfaceBinding, NetworkKind, NetworkRef};

/// Resolves between network references and gateway vNIC indices.
///
/// Implementations are bound to a single gateway and must return a stable,
/// unique index per network reference (and the reverse) for that gateway.
/// Any caching, rate limiting or remote I/O is the implementation's concern.
pub trait InterfaceResolver: Send + Sync {
    /// Index of the vNIC the `(name, kind)` network is attached to.
    fn resolve_index(&self, name: &str, kind: NetworkKind) -> Result<u32, ResolveError>;

    /// Network attached to the vNIC at `index`.
    fn resolve_network(&self, index: u32) -> Result<NetworkRef, ResolveError>;
}

/// In-memory resolver over a fixed set of interface bindings.
///
/// Built from a gateway's declared interfaces. Rejects tables where an
/// index or a network reference appears twice, so lookups in both
/// directions are unambiguous.
#[derive(Debug, Clone, Default)]
pub struct InterfaceTable {
    by_index: BTreeMap<u32, NetworkRef>,
    by_network: HashMap<NetworkRef, u32>,
}

impl InterfaceTable {
    pub fn new(bindings: impl IntoIterator<Item = InterfaceBinding>) -> Result<Self, CoreError> {
        let mut table = Self::default();
        for binding in bindings {
            table.insert(binding)?;
        }
        Ok(table)
    }

    fn insert(&mut self, binding: InterfaceBinding) -> Result<(), CoreError> {
        let network = binding.network();
        if self.by_index.contains_key(&binding.index) || self.by_network.contains_key(&network) {
            return Err(CoreError::DuplicateInterface {
                index: binding.index,
                name: binding.name,
                kind: binding.kind,
            });
        }
        self.by_network.insert(network.clone(), binding.index);
        self.by_index.insert(binding.index, network);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }

    /// Bindings ordered by vNIC index.
    pub fn bindings(&self) -> impl Iterator<Item = InterfaceBinding> + '_ {
        self.by_index.iter().map(|(index, network)| InterfaceBinding {
            index: *index,
            name: network.name.clone(),
            kind: network.kind,
        })
    }
}

impl InterfaceResolver for InterfaceTable {
    fn resolve_index(&self, name: &str, kind: NetworkKind) -> Result<u32, ResolveError> {
        let key = NetworkRef::new(name, kind);
        let index = self
            .by_network
            .get(&key)
            .copied()
            .ok_or(ResolveError::NetworkNotFound {
                name: key.name,
                kind,
            })?;
        trace!(network = name, %kind, index, "interface table hit");
        Ok(index)
    }

    fn resolve_network(&self, index: u32) -> Result<NetworkRef, ResolveError> {
        self.by_index
            .get(&index)
            .cloned()
            .ok_or(ResolveError::IndexNotFound { index })
    }
}
