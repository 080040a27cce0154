//! HTTP middleware.
//!
//! Provides short link resolution and request tracing.

pub mod redirect;
pub mod tracing;
