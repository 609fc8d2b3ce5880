//! Translation layer between declared NAT rule attributes and the NAT rule
//! objects of an edge gateway's management API.
//!
//! - **[`nat_rule_from_config`]** turns a [`DeclaredRuleConfig`] into a
//!   [`NatRule`], resolving the declared network to the gateway vNIC index.
//! - **[`config_from_nat_rule`]** reads a [`NatRule`] returned by the gateway
//!   back into a [`DeclaredRuleConfig`], resolving the vNIC index to a
//!   network reference and parsing the textual rule tag.
//!
//! Both directions go through an [`InterfaceResolver`] bound to one gateway.
//! [`InterfaceTable`] is an in-memory resolver for a known set of bindings.
//! The [`schema`] module holds attribute checks and plan-time diffing, which
//! callers apply outside the mappers.

pub mod convert;
pub mod error;
pub mod model;
pub mod resolver;
pub mod schema;

// ── Primary re-exports ──────────────────────────────────────────────
pub use convert::{config_from_nat_rule, nat_rule_from_config, parse_rule_tag, render_rule_tag};
pub use error::{CoreError, Direction, ResolveError};
pub use model::{DeclaredRuleConfig, InterfaceBinding, NatAction, NatRule, NetworkKind, NetworkRef};
pub use resolver::{InterfaceResolver, InterfaceTable};
pub use schema::{AttributeChange, SchemaError};
