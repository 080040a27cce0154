//! Business logic services for the application layer.

pub mod key_generator;
pub mod redirect_resolver;
pub mod shorten_service;
pub mod tiered_cache;

pub use key_generator::KeyGenerator;
pub use redirect_resolver::RedirectResolver;
pub use shorten_service::{ShortenService, ShortenedLink};
pub use tiered_cache::{Tier, TieredCache};
