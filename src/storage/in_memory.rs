use async_trait::async_trait;
use request_processors::{ChatId, TokenStorage, TokenStorageError};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

pub(crate) struct InMemoryTokenStorage {
    storage: Mutex<HashMap<ChatId, String>>,
}

impl InMemoryTokenStorage {
    pub(crate) fn new() -> Self {
        Self {
            storage: Mutex::new(HashMap::new()),
        }
    }

    fn guard(&self) -> Result<MutexGuard<'_, HashMap<ChatId, String>>, TokenStorageError> {
        self.storage
            .lock()
            .map_err(|_| TokenStorageError::new("Token storage lock is poisoned"))
    }
}

#[async_trait]
impl TokenStorage for InMemoryTokenStorage {
    async fn load_token(&self, chat_id: &ChatId) -> Result<Option<String>, TokenStorageError> {
        Ok(self.guard()?.get(chat_id).cloned())
    }

    async fn save_token(&self, chat_id: &ChatId, token: &str) -> Result<(), TokenStorageError> {
        self.guard()?.insert(*chat_id, token.to_string());

        Ok(())
    }

    async fn delete_token(&self, chat_id: &ChatId) -> Result<(), TokenStorageError> {
        self.guard()?.remove(chat_id);

        Ok(())
    }
}
