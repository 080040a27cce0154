//! Utility functions for URL handling and request inspection.
//!
//! - [`url_scheme`] - Scheme detection and defaulting for destination URLs
//! - [`request_meta`] - Origin and geo extraction from HTTP headers

pub mod request_meta;
pub mod url_scheme;
