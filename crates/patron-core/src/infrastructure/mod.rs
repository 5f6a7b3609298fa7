//! Infrastructure layer
//!
//! Concrete adapter implementations for the outbound ports.

pub mod persistence;
