//! # Event HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` / `POST` | `/api/events` | 목록 / 생성 |
//! | `GET` / `PUT` / `DELETE` | `/api/events/{id}` | 조회 / 수정 / 삭제 |
//! | `PUT` | `/api/events/{id}/participant/{user_id}` | 참석 확인 |

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::{
    CreateEventRequest, MessageResponse, UpdateEventRequest, UpdateParticipantRequest,
};
use crate::services::events::EVENT_DELETED;

#[get("")]
pub async fn list_events(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let events = state.events.list().await?;
    Ok(HttpResponse::Ok().json(events))
}

#[post("")]
pub async fn create_event(
    state: web::Data<AppState>,
    payload: web::Json<CreateEventRequest>,
) -> Result<HttpResponse, AppError> {
    let event = state.events.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(event))
}

#[get("/{id}")]
pub async fn get_event(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let event = state.events.get(&id).await?;
    Ok(HttpResponse::Ok().json(event))
}

#[put("/{id}")]
pub async fn update_event(
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: web::Json<UpdateEventRequest>,
) -> Result<HttpResponse, AppError> {
    let event = state.events.update(&id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(event))
}

#[put("/{id}/participant/{user_id}")]
pub async fn update_participant(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateParticipantRequest>,
) -> Result<HttpResponse, AppError> {
    let (id, user_id) = path.into_inner();
    let event = state
        .events
        .update_participant(&id, &user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(event))
}

#[delete("/{id}")]
pub async fn delete_event(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.events.delete(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(EVENT_DELETED)))
}
