use request_processors::{ChatId, MessageId, TrackSelectionProcessor};
use std::convert::Infallible;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::UpdateKind;
use tracing::{debug, error, warn};

const START_COMMAND: &str = "start";

#[derive(Debug, PartialEq)]
pub(crate) enum InboundText<'a> {
    Start,
    OtherCommand,
    Query(&'a str),
}

pub(crate) fn classify_text(text: &str) -> InboundText<'_> {
    let text = text.trim();

    match text.strip_prefix('/') {
        Some(command) => {
            // "/start@my_bot payload" addresses the bot explicitly in groups
            let name = command
                .split(|c: char| c.is_whitespace() || c == '@')
                .next()
                .unwrap_or_default();

            if name == START_COMMAND {
                InboundText::Start
            } else {
                InboundText::OtherCommand
            }
        }
        None => InboundText::Query(text),
    }
}

pub(crate) async fn handle_message(processor: &TrackSelectionProcessor, message: &Message) {
    let Some(text) = message.text() else {
        return;
    };
    let chat_id = ChatId(message.chat.id.0);

    let result = match classify_text(text) {
        InboundText::Start => processor.greet(&chat_id).await,
        InboundText::OtherCommand => {
            debug!(%chat_id, "Ignoring unsupported command");
            return;
        }
        InboundText::Query(query) => processor
            .process_query(&chat_id, query)
            .await
            .map(|state| debug!(%chat_id, ?state, "Query processed")),
    };

    if let Err(error) = result {
        error!(%chat_id, %error, "Unable to handle incoming message");
    }
}

pub(crate) async fn handle_callback_query(
    bot: &Bot,
    processor: &TrackSelectionProcessor,
    query: &CallbackQuery,
) {
    if let Err(error) = bot.answer_callback_query(query.id.clone()).await {
        warn!(%error, "Unable to answer callback query");
    }

    let (Some(payload), Some(message)) = (query.data.as_deref(), query.message.as_ref()) else {
        debug!("Callback query without payload or message");
        return;
    };
    let chat_id = ChatId(message.chat().id.0);
    let message_id = MessageId(message.id().0);

    match processor
        .process_selection(&chat_id, &message_id, payload)
        .await
    {
        Ok(outcome) => debug!(%chat_id, ?outcome, "Selection processed"),
        Err(error) => error!(%chat_id, %error, "Unable to handle track selection"),
    }
}

pub(crate) async fn route_update(bot: &Bot, processor: &TrackSelectionProcessor, update: Update) {
    match update.kind {
        UpdateKind::Message(message) => handle_message(processor, &message).await,
        UpdateKind::CallbackQuery(query) => handle_callback_query(bot, processor, &query).await,
        _ => debug!("Skipping unsupported update"),
    }
}

async fn on_message(
    processor: Arc<TrackSelectionProcessor>,
    message: Message,
) -> Result<(), Infallible> {
    handle_message(&processor, &message).await;

    Ok(())
}

async fn on_callback_query(
    bot: Bot,
    processor: Arc<TrackSelectionProcessor>,
    query: CallbackQuery,
) -> Result<(), Infallible> {
    handle_callback_query(&bot, &processor, &query).await;

    Ok(())
}

pub(crate) fn schema() -> UpdateHandler<Infallible> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback_query))
}
