use std::{ops::Deref, sync::Arc};

use anyhow::{anyhow, Context};
use folio_models::contact::ContactSubmission;
use folio_persistence_contracts::{ContactRepoCreateError, ContactRepository};
use folio_utils::trace_instrument;
use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

pub static USER_AGENT: &str = concat!(
    "Folio (",
    env!("CARGO_PKG_HOMEPAGE"),
    ", ",
    env!("CARGO_PKG_REPOSITORY"),
    ", Version ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

const _: () = {
    assert!(!env!("CARGO_PKG_HOMEPAGE").is_empty());
    assert!(!env!("CARGO_PKG_REPOSITORY").is_empty());
};

#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl HttpClient {
    pub fn new() -> anyhow::Result<Self> {
        reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map(Self)
            .context("Failed to build http client")
    }
}

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Stores contact messages in a table exposed through a PostgREST API, as
/// offered by Supabase.
#[derive(Debug, Clone)]
pub struct PostgrestContactRepository {
    config: Arc<PostgrestContactRepositoryConfig>,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct PostgrestContactRepositoryConfig {
    endpoint: Url,
    api_key: String,
}

impl PostgrestContactRepositoryConfig {
    /// `base_url` is the root of the project (the part before `rest/v1/`)
    /// and must end with a slash.
    pub fn new(base_url: &Url, table: &str, api_key: String) -> anyhow::Result<Self> {
        if table.is_empty() || table.contains(['/', '?', '#']) {
            return Err(anyhow!("Invalid table name {table:?}"));
        }

        let endpoint = base_url
            .join(&format!("rest/v1/{table}"))
            .with_context(|| format!("Failed to build endpoint url from {base_url}"))?;

        Ok(Self { endpoint, api_key })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl PostgrestContactRepository {
    pub fn new(config: PostgrestContactRepositoryConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config: config.into(),
            client: HttpClient::new()?,
        })
    }
}

impl ContactRepository for PostgrestContactRepository {
    #[trace_instrument(skip(self))]
    async fn create(&self, submission: &ContactSubmission) -> Result<(), ContactRepoCreateError> {
        let response = self
            .client
            .post(self.config.endpoint.clone())
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("Prefer", "return=minimal")
            .json(&ContactRow::from(submission))
            .send()
            .await
            .context("Failed to send insert request")?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("json"));
        let body = response
            .bytes()
            .await
            .context("Failed to read error response")?;

        warn!(%status, "contact store rejected insert");

        Err(ContactRepoCreateError::Rejected(error_message(
            status, is_json, &body,
        )))
    }
}

#[derive(Serialize)]
struct ContactRow<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

impl<'a> From<&'a ContactSubmission> for ContactRow<'a> {
    fn from(value: &'a ContactSubmission) -> Self {
        Self {
            name: &value.name,
            email: &value.email,
            message: &value.message,
        }
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

fn error_message(status: StatusCode, is_json: bool, body: &[u8]) -> String {
    is_json
        .then(|| serde_json::from_slice::<ErrorResponse>(body).ok())
        .flatten()
        .and_then(|response| response.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| status.to_string())
}
