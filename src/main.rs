use crate::config::{Config, DeliveryMode, WEBHOOK_PATH};
use crate::impls::TelegramMessenger;
use actix_rt::signal::unix;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use futures_lite::FutureExt;
use request_processors::TrackSelectionProcessor;
use std::io::Error;
use std::sync::Arc;
use teloxide::Bot;
use tracing::{error, info};

mod bot;
mod config;
mod http;
mod impls;
mod storage;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let mut terminate = unix::signal(unix::SignalKind::terminate())?;
    let mut interrupt = unix::signal(unix::SignalKind::interrupt())?;

    dotenv::dotenv().ok();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(error) => panic!("Invalid configuration: {}", error),
    };

    info!(version = VERSION, "Starting application...");

    let bot = Bot::new(&config.bot_token);
    let search_provider = impls::create_search_provider(&config).map_err(Error::other)?;
    let messenger = TelegramMessenger(bot.clone());

    let track_selection_processor = Arc::new(TrackSelectionProcessor::new(
        search_provider,
        Arc::new(messenger),
    ));

    let delivery_mode = config.delivery_mode;
    let shutdown_timeout = config.shutdown_timeout;
    let bind_address = config.bind_address();

    let server = HttpServer::new({
        let bot = bot.clone();
        let track_selection_processor = Arc::clone(&track_selection_processor);

        move || {
            let app = App::new()
                .app_data(Data::new(bot.clone()))
                .app_data(Data::new(Arc::clone(&track_selection_processor)))
                .service(web::resource("/health").route(web::get().to(http::liveness_check)));

            match delivery_mode {
                DeliveryMode::Webhook => app.service(
                    web::resource(WEBHOOK_PATH).route(web::post().to(http::receive_update)),
                ),
                DeliveryMode::Polling => app,
            }
        }
    })
    .shutdown_timeout(shutdown_timeout)
    .bind(bind_address)?
    .run();

    let server_handle = server.handle();

    actix_rt::spawn({
        async move {
            if let Err(error) = server.await {
                error!(?error, "Error on http server");
            }
        }
    });

    let shutdown_token = match delivery_mode {
        DeliveryMode::Polling => {
            let mut dispatcher =
                bot::start_polling(bot.clone(), Arc::clone(&track_selection_processor))
                    .await
                    .map_err(Error::other)?;
            let shutdown_token = dispatcher.shutdown_token();

            actix_rt::spawn(async move {
                dispatcher.dispatch().await;
            });

            Some(shutdown_token)
        }
        DeliveryMode::Webhook => {
            let webhook_url = config.webhook_url().map_err(Error::other)?;
            bot::register_webhook(&bot, webhook_url)
                .await
                .map_err(Error::other)?;

            None
        }
    };

    info!(?delivery_mode, port = bind_address.1, "Application started");

    interrupt.recv().or(terminate.recv()).await;

    info!("Received shutdown signal. Shutting down gracefully...");

    if let Some(shutdown_token) = shutdown_token {
        match shutdown_token.shutdown() {
            Ok(stopped) => stopped.await,
            Err(error) => error!(?error, "Unable to stop update dispatcher"),
        }
    }

    server_handle.stop(true).await;

    Ok(())
}
