//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the widget session.

pub(crate) mod handlers;
mod server;

pub use server::HttpServer;
