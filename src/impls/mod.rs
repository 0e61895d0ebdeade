mod chat_messenger;
mod search_provider;

pub(crate) use chat_messenger::TelegramMessenger;
pub(crate) use search_provider::{AccessTokenSource, ApiSearchProvider, MobileSearchProvider};

use crate::config::{Config, ConfigError, SearchBackend};
use crate::storage::InMemoryTokenStorage;
use request_processors::SearchProvider;
use search_providers::{VkApiClient, VkClientError, VkMobileClient, VkOAuthClient};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub(crate) enum SearchProviderSetupError {
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    #[error(transparent)]
    VkClientError(#[from] VkClientError),
}

pub(crate) fn create_search_provider(
    config: &Config,
) -> Result<Arc<dyn SearchProvider + Send + Sync>, SearchProviderSetupError> {
    let timeout = config.request_timeout();

    let provider: Arc<dyn SearchProvider + Send + Sync> = match config.search_backend()? {
        SearchBackend::Mobile { session_cookie } => {
            info!(
                with_session_cookie = session_cookie.is_some(),
                "Using VK mobile search page"
            );
            let client = VkMobileClient::create(session_cookie.as_deref(), timeout)?;

            Arc::new(MobileSearchProvider(client))
        }
        SearchBackend::ApiToken { access_token } => {
            info!("Using VK audio.search API with a static access token");
            let client = VkApiClient::create(&config.vk_api_version, timeout)?;

            Arc::new(ApiSearchProvider::new(
                client,
                AccessTokenSource::Static(access_token.into()),
            ))
        }
        SearchBackend::ApiOAuth { app_id, app_secret } => {
            info!(%app_id, "Using VK audio.search API with OAuth client credentials");
            let client = VkApiClient::create(&config.vk_api_version, timeout)?;
            let oauth_client =
                VkOAuthClient::create(&app_id, &app_secret, &config.vk_api_version, timeout)?;

            Arc::new(ApiSearchProvider::new(
                client,
                AccessTokenSource::OAuth {
                    client: oauth_client,
                    storage: Arc::new(InMemoryTokenStorage::new()),
                },
            ))
        }
    };

    Ok(provider)
}
