//! `GET /`, `GET /doc`

use actix_web::{get, web, HttpResponse};

use crate::core::state::AppState;
use crate::services::system;

#[get("/")]
pub async fn api_status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(system::status_report(&state))
}

#[get("/doc")]
pub async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(system::documentation())
}
