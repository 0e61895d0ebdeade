mod handlers;

pub(crate) use handlers::{route_update, schema};

use request_processors::TrackSelectionProcessor;
use std::sync::Arc;
use teloxide::dispatching::{DefaultKey, Dispatcher};
use teloxide::prelude::*;
use teloxide::RequestError;
use tracing::info;
use url::Url;

pub(crate) async fn start_polling(
    bot: Bot,
    processor: Arc<TrackSelectionProcessor>,
) -> Result<Dispatcher<Bot, std::convert::Infallible, DefaultKey>, RequestError> {
    // getUpdates conflicts with an active webhook
    bot.delete_webhook().drop_pending_updates(true).await?;

    info!("Webhook removed, delivering updates by long polling");

    Ok(Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![processor])
        .build())
}

pub(crate) async fn register_webhook(bot: &Bot, url: Url) -> Result<(), RequestError> {
    bot.set_webhook(url.clone()).await?;

    info!(%url, "Webhook registered");

    Ok(())
}
