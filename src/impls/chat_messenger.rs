use async_trait::async_trait;
use request_processors::{ChatId, ChatMessenger, Chooser, MediaRef, MessageId, MessengerError};
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile};
use tracing::warn;
use url::Url;

// Telegram rejects callback data longer than this.
const MAX_CALLBACK_DATA_LEN: usize = 64;

pub(crate) fn to_inline_keyboard(chooser: &Chooser) -> InlineKeyboardMarkup {
    let rows = chooser
        .buttons
        .iter()
        .map(|button| {
            if button.payload.len() > MAX_CALLBACK_DATA_LEN {
                warn!(
                    len = button.payload.len(),
                    label = %button.label,
                    "Button payload exceeds Telegram callback data limit"
                );
            }

            vec![InlineKeyboardButton::callback(
                button.label.clone(),
                button.payload.clone(),
            )]
        })
        .collect::<Vec<_>>();

    InlineKeyboardMarkup::new(rows)
}

fn media_url(media_ref: &MediaRef) -> Option<Url> {
    Url::parse(media_ref)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

/// Direct links are sent by URL, anything else is taken for a Telegram file id.
pub(crate) fn to_input_file(media_ref: &MediaRef) -> InputFile {
    match media_url(media_ref) {
        Some(url) => InputFile::url(url),
        None => InputFile::file_id(media_ref.to_string()),
    }
}

pub(crate) struct TelegramMessenger(pub(crate) Bot);

#[async_trait]
impl ChatMessenger for TelegramMessenger {
    async fn send_text(
        &self,
        chat_id: &ChatId,
        text: &str,
        chooser: Option<&Chooser>,
    ) -> Result<(), MessengerError> {
        let request = self.0.send_message(teloxide::types::ChatId(**chat_id), text);

        let response = match chooser {
            Some(chooser) => request.reply_markup(to_inline_keyboard(chooser)).await,
            None => request.await,
        };

        response.map_err(MessengerError::new)?;

        Ok(())
    }

    async fn edit_message_text(
        &self,
        chat_id: &ChatId,
        message_id: &MessageId,
        text: &str,
    ) -> Result<(), MessengerError> {
        self.0
            .edit_message_text(
                teloxide::types::ChatId(**chat_id),
                teloxide::types::MessageId(**message_id),
                text,
            )
            .await
            .map_err(MessengerError::new)?;

        Ok(())
    }

    async fn send_audio(
        &self,
        chat_id: &ChatId,
        media_ref: &MediaRef,
        title: &str,
    ) -> Result<(), MessengerError> {
        self.0
            .send_audio(teloxide::types::ChatId(**chat_id), to_input_file(media_ref))
            .title(title)
            .await
            .map_err(MessengerError::new)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use request_processors::ChooserButton;

    #[test]
    fn should_render_one_button_per_row() {
        let chooser = Chooser {
            buttons: vec![
                ChooserButton {
                    label: "A — T".into(),
                    payload: "dl_u1".into(),
                },
                ChooserButton {
                    label: "B — S".into(),
                    payload: "dl_u2".into(),
                },
            ],
        };

        let keyboard = to_inline_keyboard(&chooser);

        assert_eq!(2, keyboard.inline_keyboard.len());
        assert!(keyboard.inline_keyboard.iter().all(|row| row.len() == 1));
        assert_eq!("A — T", keyboard.inline_keyboard[0][0].text);
        assert_eq!("B — S", keyboard.inline_keyboard[1][0].text);
    }

    #[test]
    fn should_recognize_direct_links() {
        assert_eq!(
            Some("https://cs1.vkuseraudio.net/a.mp3?extra=x_y"),
            media_url(&MediaRef::from("https://cs1.vkuseraudio.net/a.mp3?extra=x_y"))
                .as_ref()
                .map(Url::as_str)
        );
        assert_eq!(None, media_url(&MediaRef::from("371745449_456289405")));
        assert_eq!(None, media_url(&MediaRef::from("CQACAgIAAxkBAAIBZ2X")));
        assert_eq!(None, media_url(&MediaRef::from("vk:audio:1")));
    }
}
