use async_trait::async_trait;
use request_processors::{
    CandidateSet, ChatId, SearchProvider, SearchProviderError, TokenStorage, Track,
};
use search_providers::{AccessToken, SearchResults, VkApiClient, VkMobileClient, VkOAuthClient};
use std::sync::Arc;
use tracing::{debug, info, warn};

fn into_candidates(results: SearchResults) -> CandidateSet {
    results
        .into_iter()
        .map(|result| Track::new(&result.artist, &result.title, result.media_ref))
        .collect()
}

pub(crate) struct MobileSearchProvider(pub(crate) VkMobileClient);

#[async_trait]
impl SearchProvider for MobileSearchProvider {
    async fn search(
        &self,
        _chat_id: &ChatId,
        query: &str,
    ) -> Result<CandidateSet, SearchProviderError> {
        let results = self
            .0
            .search_audio(query)
            .await
            .map_err(SearchProviderError::new)?;

        Ok(into_candidates(results))
    }
}

pub(crate) enum AccessTokenSource {
    Static(AccessToken),
    OAuth {
        client: VkOAuthClient,
        storage: Arc<dyn TokenStorage + Send + Sync>,
    },
}

pub(crate) struct ApiSearchProvider {
    client: VkApiClient,
    token_source: AccessTokenSource,
}

impl ApiSearchProvider {
    pub(crate) fn new(client: VkApiClient, token_source: AccessTokenSource) -> Self {
        Self {
            client,
            token_source,
        }
    }

    async fn resolve_access_token(
        &self,
        chat_id: &ChatId,
    ) -> Result<AccessToken, SearchProviderError> {
        let (client, storage) = match &self.token_source {
            AccessTokenSource::Static(token) => return Ok(token.clone()),
            AccessTokenSource::OAuth { client, storage } => (client, storage),
        };

        if let Some(token) = storage
            .load_token(chat_id)
            .await
            .map_err(SearchProviderError::new)?
        {
            return Ok(token.into());
        }

        let token = client
            .obtain_access_token()
            .await
            .map_err(SearchProviderError::new)?;

        storage
            .save_token(chat_id, &token)
            .await
            .map_err(SearchProviderError::new)?;

        info!(%chat_id, "Obtained VK access token for chat");

        Ok(token)
    }

    async fn forget_access_token(&self, chat_id: &ChatId) {
        if let AccessTokenSource::OAuth { storage, .. } = &self.token_source {
            match storage.delete_token(chat_id).await {
                Ok(()) => debug!(%chat_id, "Rejected VK access token has been evicted"),
                Err(error) => warn!(%chat_id, %error, "Unable to evict rejected VK access token"),
            }
        }
    }
}

#[async_trait]
impl SearchProvider for ApiSearchProvider {
    async fn search(
        &self,
        chat_id: &ChatId,
        query: &str,
    ) -> Result<CandidateSet, SearchProviderError> {
        let token = self.resolve_access_token(chat_id).await?;

        match self.client.search_audio(&token, query).await {
            Ok(results) => Ok(into_candidates(results)),
            Err(error) => {
                if error.is_authorization_failure() {
                    self.forget_access_token(chat_id).await;
                }

                Err(SearchProviderError::new(error))
            }
        }
    }
}
