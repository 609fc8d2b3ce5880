// ── Core error types ──
//
// `ResolveError` is what an `InterfaceResolver` returns when a lookup
// misses. The mappers wrap it in `CoreError::Resolution` with the
// direction they were translating in; nothing is retried or defaulted.

use std::num::ParseIntError;

use strum::Display;
use thiserror::Error;

use crate::model::NetworkKind;

/// Which way a translation was going when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Direction {
    /// Declared attributes to gateway rule.
    #[strum(serialize = "declared config -> nat rule")]
    Inbound,
    /// Gateway rule to declared attributes.
    #[strum(serialize = "nat rule -> declared config")]
    Outbound,
}

/// Lookup miss from an interface resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no {kind} network named '{name}' is attached to the gateway")]
    NetworkNotFound { name: String, kind: NetworkKind },

    #[error("no network is bound to vNIC index {index}")]
    IndexNotFound { index: u32 },
}

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("cannot resolve network ({direction}): {source}")]
    Resolution {
        direction: Direction,
        #[source]
        source: ResolveError,
    },

    #[error("could not convert {field} ({value:?}) from string to int: {source}")]
    Format {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("conflicting interface binding: vNIC {index} -> {kind} network '{name}'")]
    DuplicateInterface {
        index: u32,
        name: String,
        kind: NetworkKind,
    },
}

impl CoreError {
    /// The resolver miss behind a `Resolution` error, unchanged.
    pub fn not_found(&self) -> Option<&ResolveError> {
        match self {
            Self::Resolution { source, .. } => Some(source),
            Self::Format { .. } | Self::DuplicateInterface { .. } => None,
        }
    }
}
