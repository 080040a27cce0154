//! # keyhop
//!
//! A small URL shortener that resolves short path segments to destination
//! URLs, with optional password-gated links.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Short keys, redirect decisions, collaborator traits
//! - **Application Layer** ([`application`]) - Tiered cache, key generation, redirect resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis, static seed, Telegram, Vercel
//! - **API Layer** ([`api`]) - Handlers, DTOs, and middleware
//!
//! ## Lookup Tiers
//!
//! Every lookup checks an in-process memory map, then a built-in seed table,
//! then Redis. Redis hits are copied into memory. Redis is optional and may
//! fail at any time; the service keeps working from the first two tiers.
//!
//! ## Password-gated Links
//!
//! A link created with password `p` is stored as `key$p`. Visiting `/key`
//! redirects to `/unlock?key=key`; visiting `/key$p` redirects to the
//! destination.
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"  # Optional
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        KeyGenerator, RedirectResolver, ShortenService, ShortenedLink, Tier, TieredCache,
    };
    pub use crate::domain::{
        KeyValueStore, NotificationSink, RequestMeta, Resolution, ShortKey, StoreError,
        StoreResult,
    };
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{NullStore, StaticSeed};
    pub use crate::state::AppState;
}
