use crate::track_selection::types::{CandidateSet, Chooser, MediaRef};
use crate::{ChatId, MessageId};
use async_trait::async_trait;
use std::fmt::Formatter;

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub struct SearchProviderError(BoxedError);

impl SearchProviderError {
    pub fn new(error: impl Into<BoxedError>) -> Self {
        Self(error.into())
    }
}

impl std::fmt::Display for SearchProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[async_trait]
pub trait SearchProvider {
    /// Finds candidate tracks for `query` on behalf of the chat.
    async fn search(
        &self,
        chat_id: &ChatId,
        query: &str,
    ) -> Result<CandidateSet, SearchProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub struct MessengerError(BoxedError);

impl MessengerError {
    pub fn new(error: impl Into<BoxedError>) -> Self {
        Self(error.into())
    }
}

impl std::fmt::Display for MessengerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[async_trait]
pub trait ChatMessenger {
    async fn send_text(
        &self,
        chat_id: &ChatId,
        text: &str,
        chooser: Option<&Chooser>,
    ) -> Result<(), MessengerError>;
    async fn edit_message_text(
        &self,
        chat_id: &ChatId,
        message_id: &MessageId,
        text: &str,
    ) -> Result<(), MessengerError>;
    async fn send_audio(
        &self,
        chat_id: &ChatId,
        media_ref: &MediaRef,
        title: &str,
    ) -> Result<(), MessengerError>;
}

#[derive(Debug, thiserror::Error)]
pub struct TokenStorageError(BoxedError);

impl TokenStorageError {
    pub fn new(error: impl Into<BoxedError>) -> Self {
        Self(error.into())
    }
}

impl std::fmt::Display for TokenStorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-chat credential cache, kept for the process lifetime.
#[async_trait]
pub trait TokenStorage {
    async fn load_token(&self, chat_id: &ChatId) -> Result<Option<String>, TokenStorageError>;
    async fn save_token(&self, chat_id: &ChatId, token: &str) -> Result<(), TokenStorageError>;
    async fn delete_token(&self, chat_id: &ChatId) -> Result<(), TokenStorageError>;
}
