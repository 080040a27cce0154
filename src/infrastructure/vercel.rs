//! Domain registration through the Vercel projects API.

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_API_BASE: &str = "https://api.vercel.com";

/// Errors raised while talking to the Vercel API.
#[derive(Debug, thiserror::Error)]
pub enum VercelError {
    #[error("Vercel API transport error: {0}")]
    Transport(String),

    #[error("Vercel API returned an unreadable body: {0}")]
    Decode(String),
}

/// Result of a domain registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainOutcome {
    Added,
    Forbidden,
    Taken,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: Option<String>,
}

/// Credentials and target project for domain registration.
#[derive(Debug, Clone)]
pub struct VercelSettings {
    pub api_base: String,
    pub project_id: String,
    pub team_id: String,
    pub bearer_token: String,
}

/// Adds custom domains to the project serving the shortener.
pub struct VercelClient {
    http: reqwest::Client,
    settings: VercelSettings,
}

impl VercelClient {
    /// # Errors
    ///
    /// Returns [`VercelError::Transport`] if the HTTP client cannot be built.
    pub fn new(settings: VercelSettings) -> Result<Self, VercelError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| VercelError::Transport(e.to_string()))?;

        Ok(Self { http, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v9/projects/{}/domains?teamId={}",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.project_id,
            self.settings.team_id
        )
    }

    /// Registers `domain` with the project.
    ///
    /// Any `http://` or `https://` in the input is removed first.
    ///
    /// # Errors
    ///
    /// Returns [`VercelError`] if the request fails or the body is not JSON.
    pub async fn add_domain(&self, domain: &str) -> Result<DomainOutcome, VercelError> {
        let name = strip_scheme(domain);
        debug!("Registering domain {}", name);

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.settings.bearer_token)
            .json(&json!({ "name": name }))
            .send()
            .await
            .map_err(|e| VercelError::Transport(e.to_string()))?;

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| VercelError::Decode(e.to_string()))?;

        let outcome = classify(&body);
        if outcome != DomainOutcome::Added {
            warn!("Domain {} rejected: {:?}", name, outcome);
        }

        Ok(outcome)
    }
}

fn strip_scheme(domain: &str) -> String {
    domain.replace("http://", "").replace("https://", "")
}

fn classify(body: &ApiResponse) -> DomainOutcome {
    match body.error.as_ref().and_then(|e| e.code.as_deref()) {
        Some("forbidden") => DomainOutcome::Forbidden,
        Some("domain_taken") => DomainOutcome::Taken,
        _ => DomainOutcome::Added,
    }
}
