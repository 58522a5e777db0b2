use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::error::{MinterError, MinterResult};

/// Default Aptos Names lookup endpoint; the name is appended as the last path segment
pub const DEFAULT_NAME_SERVICE_URL: &str = "https://www.aptosnames.com/api/mainnet/v1/address";

/// Maps a human-readable name to the address registered for it
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// `Ok(None)` when the service does not know the name
    async fn resolve(&self, name: &str) -> MinterResult<Option<String>>;
}

#[derive(Debug, Deserialize)]
struct NameLookupResponse {
    address: Option<String>,
}

/// HTTP client for the Aptos Names directory
pub struct AnsClient {
    client: Client,
    base_url: Url,
}

impl AnsClient {
    pub fn new(base_url: &str) -> MinterResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| MinterError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(MinterError::InvalidUrl {
                url: base_url.to_string(),
                reason: "cannot be used as a base URL".to_string(),
            });
        }

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// Build the lookup URL, percent-encoding the name as a single path segment
    pub fn lookup_url(&self, name: &str) -> MinterResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MinterError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "cannot be used as a base URL".to_string(),
            })?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }
}

#[async_trait]
impl NameResolver for AnsClient {
    async fn resolve(&self, name: &str) -> MinterResult<Option<String>> {
        let url = self.lookup_url(name)?;
        tracing::debug!("Looking up name {} at {}", name, url);

        let response = self.client.get(url).send().await?;

        if response.status() != StatusCode::OK {
            tracing::debug!("Name lookup for {} returned status {}", name, response.status());
            return Ok(None);
        }

        let body: NameLookupResponse = response.json().await?;
        Ok(body.address.filter(|address| !address.is_empty()))
    }
}
