//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for storage and outbound calls.
//!
//! # Modules
//!
//! - [`store`] - Remote store implementations and the static seed table
//! - [`notify`] - Notification sinks (Telegram and no-op)
//! - [`vercel`] - Domain registration client

pub mod notify;
pub mod store;
pub mod vercel;
