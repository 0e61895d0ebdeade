use crate::vk::parser::parse_mobile_search_results;
use crate::vk::VkClientError;
use crate::SearchResults;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::redirect::Policy;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

pub const VK_MOBILE_HOST: &str = "https://m.vk.com";
const AUDIO_SECTION: &str = "audio";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 13; Pixel 7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";

/// Scrapes the audio section of the mobile search page.
pub struct VkMobileClient {
    client: Client,
    mobile_host: String,
}

impl VkMobileClient {
    pub fn create(session_cookie: Option<&str>, timeout: Duration) -> Result<Self, VkClientError> {
        Self::create_with_host(VK_MOBILE_HOST, session_cookie, timeout)
    }

    pub fn create_with_host(
        mobile_host: &str,
        session_cookie: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, VkClientError> {
        let mut headers = HeaderMap::new();

        if let Some(cookie) = session_cookie {
            let mut value = HeaderValue::from_str(cookie)
                .map_err(|_| VkClientError::InvalidSessionCookie)?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .redirect(Policy::limited(10))
            .cookie_store(true)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            mobile_host: mobile_host.trim_end_matches('/').to_string(),
        })
    }

    pub async fn search_audio(&self, query_str: &str) -> Result<SearchResults, VkClientError> {
        #[derive(Serialize)]
        struct Query<'a> {
            #[serde(rename = "c[section]")]
            section: &'a str,
            q: &'a str,
        }

        let query = Query {
            section: AUDIO_SECTION,
            q: query_str,
        };

        let response = self
            .client
            .get(format!("{}/search", self.mobile_host))
            .query(&query)
            .send()
            .await?
            .error_for_status()?;

        let raw_html = response.text().await?;
        let results = parse_mobile_search_results(&raw_html)?;

        debug!(count = results.len(), "Parsed mobile search page");

        Ok(results)
    }
}
