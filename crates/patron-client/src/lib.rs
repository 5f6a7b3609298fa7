//! Patron API Client
//!
//! The external-collaborator half of the dashboard: typed REST access to
//! the CRM backend with bearer-token auth, session state injected by the
//! host application, and a session-scoped dataset cache with an explicit
//! refresh entry point.
//!
//! The client implements `patron-core`'s outbound repository ports, so the
//! core's application services run against this crate in production and
//! against in-memory adapters in tests.

pub mod api;
pub mod cache;
pub mod config;
pub mod session;

pub use api::{ApiClient, ApiError};
pub use cache::{DatasetCache, DatasetSnapshot};
pub use config::{Config, ConfigError, HttpConfig, ServerConfig};
pub use session::{BearerToken, SessionError, SessionStore};
