use crate::vk::{ParseError, VkClientError};
use crate::AccessToken;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const VK_OAUTH_HOST: &str = "https://oauth.vk.com";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Obtains service tokens through the client credentials grant.
pub struct VkOAuthClient {
    client: Client,
    oauth_host: String,
    app_id: String,
    app_secret: String,
    api_version: String,
}

impl VkOAuthClient {
    pub fn create(
        app_id: &str,
        app_secret: &str,
        api_version: &str,
        timeout: Duration,
    ) -> Result<Self, VkClientError> {
        Self::create_with_host(VK_OAUTH_HOST, app_id, app_secret, api_version, timeout)
    }

    pub fn create_with_host(
        oauth_host: &str,
        app_id: &str,
        app_secret: &str,
        api_version: &str,
        timeout: Duration,
    ) -> Result<Self, VkClientError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            oauth_host: oauth_host.trim_end_matches('/').to_string(),
            app_id: app_id.to_string(),
            app_secret: app_secret.to_string(),
            api_version: api_version.to_string(),
        })
    }

    pub async fn obtain_access_token(&self) -> Result<AccessToken, VkClientError> {
        #[derive(Serialize)]
        struct Query<'a> {
            client_id: &'a str,
            client_secret: &'a str,
            v: &'a str,
            grant_type: &'a str,
        }

        let query = Query {
            client_id: &self.app_id,
            client_secret: &self.app_secret,
            v: &self.api_version,
            grant_type: "client_credentials",
        };

        // VK answers OAuth failures with 401 and a JSON body worth reading
        let response = self
            .client
            .get(format!("{}/access_token", self.oauth_host))
            .query(&query)
            .send()
            .await?;

        let raw_json = response.text().await?;
        let token_response: TokenResponse =
            serde_json::from_str(&raw_json).map_err(ParseError::from)?;

        match token_response {
            TokenResponse {
                access_token: Some(token),
                ..
            } => {
                debug!("Obtained VK service token");
                Ok(AccessToken(token))
            }
            TokenResponse {
                error,
                error_description,
                ..
            } => Err(VkClientError::OAuthError(
                error_description
                    .or(error)
                    .unwrap_or_else(|| "access_token is missing".to_string()),
            )),
        }
    }
}
