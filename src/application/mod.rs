//! Application layer services implementing the shortener's logic.
//!
//! This layer composes the storage tiers and collaborators defined by the
//! domain layer and exposes them to HTTP handlers and middleware.
//!
//! # Available Services
//!
//! - [`services::tiered_cache::TieredCache`] - Memory → static seed → remote lookup
//! - [`services::key_generator::KeyGenerator`] - Collision-checked random keys
//! - [`services::redirect_resolver::RedirectResolver`] - Per-request redirect decision
//! - [`services::shorten_service::ShortenService`] - Write path for new short links

pub mod services;
