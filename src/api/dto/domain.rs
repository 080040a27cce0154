//! DTOs for the domain registration endpoint.

use serde::Deserialize;

/// Query string of `POST /api/v5/domain`.
#[derive(Debug, Deserialize)]
pub struct AddDomainQuery {
    /// Domain to register; an `http(s)://` prefix is tolerated.
    pub add: Option<String>,
}
