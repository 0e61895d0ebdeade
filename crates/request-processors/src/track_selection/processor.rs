use crate::track_selection::action_payload::decode_action_payload;
use crate::track_selection::traits::{ChatMessenger, MessengerError, SearchProvider};
use crate::track_selection::types::{CandidateSet, ChatState, Chooser, SelectionOutcome};
use crate::{ChatId, MessageId};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const SEARCH_PROMPT_TEXT: &str = "Введите название трека для поиска:";
pub const NO_RESULTS_TEXT: &str = "Треки не найдены.";
pub const SEARCH_RESULTS_TEXT: &str = "Результаты поиска:";
pub const DOWNLOADING_TEXT: &str = "Скачиваю…";
pub const FALLBACK_TRACK_TITLE: &str = "Трек из VK";
const DELIVERY_FAILED_TEXT: &str = "Не удалось отправить трек";
const CHOOSER_FAILED_TEXT: &str = "Не удалось показать результаты поиска";

#[derive(Debug, thiserror::Error)]
pub enum ProcessingRequestError {
    #[error(transparent)]
    MessengerError(#[from] MessengerError),
}

/// Search-then-choose interaction with a chat.
///
/// Keeps no per-chat memory: every chooser button carries the media
/// reference it stands for, so stale choosers stay usable.
pub struct TrackSelectionProcessor {
    search_provider: Arc<dyn SearchProvider + Send + Sync>,
    messenger: Arc<dyn ChatMessenger + Send + Sync>,
}

impl TrackSelectionProcessor {
    pub fn new(
        search_provider: Arc<dyn SearchProvider + Send + Sync>,
        messenger: Arc<dyn ChatMessenger + Send + Sync>,
    ) -> Self {
        Self {
            search_provider,
            messenger,
        }
    }

    pub async fn greet(&self, chat_id: &ChatId) -> Result<(), ProcessingRequestError> {
        self.messenger
            .send_text(chat_id, SEARCH_PROMPT_TEXT, None)
            .await?;

        Ok(())
    }

    pub async fn process_query(
        &self,
        chat_id: &ChatId,
        text: &str,
    ) -> Result<ChatState, ProcessingRequestError> {
        let query = text.trim();

        if query.is_empty() {
            return Ok(ChatState::Idle);
        }

        info!(%chat_id, query, "Track search request");

        let candidates = self.find_candidates(chat_id, query).await;

        if candidates.is_empty() {
            self.messenger
                .send_text(chat_id, NO_RESULTS_TEXT, None)
                .await?;

            return Ok(ChatState::Idle);
        }

        let chooser = Chooser::from(&candidates);

        // An oversized button payload makes the messenger reject the whole chooser
        if let Err(error) = self
            .messenger
            .send_text(chat_id, SEARCH_RESULTS_TEXT, Some(&chooser))
            .await
        {
            error!(%chat_id, %error, "Unable to send chooser");

            let notice = format!("{}: {}", CHOOSER_FAILED_TEXT, error);
            self.messenger.send_text(chat_id, &notice, None).await?;

            return Ok(ChatState::Idle);
        }

        debug!(%chat_id, count = candidates.len(), "Chooser has been sent");

        Ok(ChatState::CandidatesOffered)
    }

    // Backend failures read as "no results" to the user, the logs keep the difference.
    async fn find_candidates(&self, chat_id: &ChatId, query: &str) -> CandidateSet {
        match self.search_provider.search(chat_id, query).await {
            Ok(candidates) => {
                info!(%chat_id, count = candidates.len(), "Track search finished");
                candidates
            }
            Err(error) => {
                error!(%chat_id, %error, "Track search failed");
                CandidateSet::empty()
            }
        }
    }

    pub async fn process_selection(
        &self,
        chat_id: &ChatId,
        message_id: &MessageId,
        payload: &str,
    ) -> Result<SelectionOutcome, ProcessingRequestError> {
        let media_ref = match decode_action_payload(payload) {
            Some(media_ref) => media_ref,
            None => {
                debug!(%chat_id, payload, "Payload is not a download action");
                return Ok(SelectionOutcome::Ignored);
            }
        };

        info!(%chat_id, %message_id, %media_ref, "Track selected");

        if let Err(error) = self
            .messenger
            .edit_message_text(chat_id, message_id, DOWNLOADING_TEXT)
            .await
        {
            warn!(%chat_id, %message_id, %error, "Unable to update chooser message");
        }

        match self
            .messenger
            .send_audio(chat_id, &media_ref, FALLBACK_TRACK_TITLE)
            .await
        {
            Ok(()) => {
                info!(%chat_id, %media_ref, "Track delivered");
                Ok(SelectionOutcome::Delivered(media_ref))
            }
            Err(error) => {
                error!(%chat_id, %media_ref, %error, "Track delivery failed");

                let notice = format!("{}: {}", DELIVERY_FAILED_TEXT, error);
                self.messenger.send_text(chat_id, &notice, None).await?;

                Ok(SelectionOutcome::DeliveryFailed(media_ref))
            }
        }
    }
}
