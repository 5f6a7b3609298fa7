//! Ports module
//!
//! Hexagonal architecture seams: inbound use-case traits, outbound
//! repository traits.

pub mod inbound;
pub mod outbound;
