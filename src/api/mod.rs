//! HTTP API layer: error mapping, shared request context, router and
//! server lifecycle.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;
