use actix_web::{get, web, HttpResponse};
use serde::Serialize;

#[derive(Serialize)]
struct PingResponse {
    status: &'static str,
}

pub fn init_ping_api(cfg: &mut web::ServiceConfig) {
    cfg.service(index);
    cfg.service(ping);
}

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().body("Task Management API")
}

#[get("/ping")]
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(PingResponse { status: "up" })
}
