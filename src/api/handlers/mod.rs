//! HTTP request handlers for API endpoints.

pub mod domains;
pub mod health;
pub mod shorten;

pub use domains::add_domain_handler;
pub use health::health_handler;
pub use shorten::shorten_handler;
