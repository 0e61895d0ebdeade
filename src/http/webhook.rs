use crate::bot::route_update;
use actix_web::web::{Data, Json};
use actix_web::{HttpResponse, Responder};
use request_processors::TrackSelectionProcessor;
use std::sync::Arc;
use teloxide::types::Update;
use teloxide::Bot;

pub(crate) async fn receive_update(
    bot: Data<Bot>,
    processor: Data<Arc<TrackSelectionProcessor>>,
    update: Json<Update>,
) -> impl Responder {
    let bot = bot.get_ref().clone();
    let processor = Arc::clone(processor.get_ref());

    // Telegram redelivers updates that are not acknowledged in time
    actix_rt::spawn(async move {
        route_update(&bot, &processor, update.into_inner()).await;
    });

    HttpResponse::Ok().finish()
}
