//! HTTP/JSON API server for per-user flow editor documents.
//!
//! Exposes REST endpoints to save, load, mutate, and delete the nodes and
//! edges of a visual flow editor. This crate contains the data access layer
//! ([`service::FlowService`]), API schema types, error handling, handlers,
//! configuration, and route definitions.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod service;
pub mod state;
