//! Domain layer containing the core model and collaborator contracts.
//!
//! # Architecture
//!
//! - [`short_key`] - Short keys and their optional password suffix
//! - [`resolution`] - Redirect decisions and request metadata
//! - [`store`] - Contract of the durable key-value store (Remote tier)
//! - [`notifier`] - Contract of the best-effort notification sink
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Collaborator traits define contracts implemented by the infrastructure layer
//! - Business logic lives in services (see [`crate::application::services`])

pub mod notifier;
pub mod resolution;
pub mod short_key;
pub mod store;

pub use notifier::{NotificationSink, NotifyError};
pub use resolution::{GeoInfo, RequestMeta, Resolution};
pub use short_key::{SECURE_SEPARATOR, ShortKey, bare_token};
pub use store::{KeyValueStore, StoreError, StoreResult};

#[cfg(test)]
pub use notifier::MockNotificationSink;
#[cfg(test)]
pub use store::MockKeyValueStore;
