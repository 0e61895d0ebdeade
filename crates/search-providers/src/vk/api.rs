use crate::vk::parser::{parse_audio_search_response, ApiOutcome};
use crate::vk::VkClientError;
use crate::{AccessToken, SearchResults, MAX_SEARCH_RESULTS};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

pub const VK_API_HOST: &str = "https://api.vk.com";
pub const DEFAULT_API_VERSION: &str = "5.131";

/// Client of the official `audio.search` API method.
pub struct VkApiClient {
    client: Client,
    api_host: String,
    api_version: String,
}

impl VkApiClient {
    pub fn create(api_version: &str, timeout: Duration) -> Result<Self, VkClientError> {
        Self::create_with_host(VK_API_HOST, api_version, timeout)
    }

    pub fn create_with_host(
        api_host: &str,
        api_version: &str,
        timeout: Duration,
    ) -> Result<Self, VkClientError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_host: api_host.trim_end_matches('/').to_string(),
            api_version: api_version.to_string(),
        })
    }

    pub async fn search_audio(
        &self,
        access_token: &AccessToken,
        query_str: &str,
    ) -> Result<SearchResults, VkClientError> {
        #[derive(Serialize)]
        struct Query<'a> {
            q: &'a str,
            access_token: &'a str,
            v: &'a str,
            count: usize,
        }

        let query = Query {
            q: query_str,
            access_token: &**access_token,
            v: &self.api_version,
            count: MAX_SEARCH_RESULTS,
        };

        let response = self
            .client
            .get(format!("{}/method/audio.search", self.api_host))
            .query(&query)
            .send()
            .await?
            .error_for_status()?;

        let raw_json = response.text().await?;

        match parse_audio_search_response(&raw_json)? {
            ApiOutcome::Tracks(tracks) => {
                debug!(count = tracks.len(), "Parsed audio.search response");
                Ok(tracks)
            }
            ApiOutcome::Error(error) => Err(error.into()),
        }
    }
}
