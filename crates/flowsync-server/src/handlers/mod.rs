//! HTTP handler modules for the flowsync API.
//!
//! Each sub-module implements thin handlers that parse requests, acquire the
//! service lock, delegate to [`FlowService`](crate::service::FlowService),
//! and return JSON responses. No storage logic lives in handlers.

pub mod fallback;
pub mod flows;
pub mod health;
pub mod users;
