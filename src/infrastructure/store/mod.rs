//! Storage tiers backing the tiered cache.
//!
//! - [`RedisStore`] - Remote tier backed by Redis, connected lazily
//! - [`NullStore`] - Inert remote tier used when no Redis is configured
//! - [`StaticSeed`] - Built-in fallback table, read-only at runtime

mod null_store;
mod redis_store;
mod static_seed;

pub use null_store::NullStore;
pub use redis_store::RedisStore;
pub use static_seed::{SeedError, StaticSeed};
