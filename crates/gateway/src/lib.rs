//! # Switchboard Gateway Crate
//!
//! HTTP implementation of the group sync core's `RequestGateway`. Calls are
//! issued with `reqwest` against the configured API root, carrying the
//! session's bearer token.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use switchboard_gateway::HttpGateway;
//!
//! let gateway = HttpGateway::new(&config.api)?;
//! let groups = gateway.get("/groups").await?;
//! ```

pub mod error;
pub mod http;

pub use error::{network_error, service_error};
pub use http::HttpGateway;
