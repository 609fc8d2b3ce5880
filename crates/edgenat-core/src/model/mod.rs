// ── Domain model ──
//
// Declared (user-side) and gateway-side representations of a NAT rule,
// plus the network reference types used to bind a rule to a vNIC.

pub mod nat;
pub mod network;

pub use nat::{DeclaredRuleConfig, NatAction, NatRule};
pub use network::{InterfaceBinding, NetworkKind, NetworkRef};
