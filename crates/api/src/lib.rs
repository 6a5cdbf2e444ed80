//! Maintenance planning HTTP API (axum router, handlers, error mapping).

pub mod app;
