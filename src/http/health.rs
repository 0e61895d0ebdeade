use actix_web::{HttpResponse, Responder};

pub(crate) async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}
