//! # Guide HTTP Handlers
//!
//! 조회는 공개, 생성/수정/삭제/상태 변경은 Bearer 토큰이 필요합니다.
//! 본문(`contenido`)이 바뀌는 수정만 patch 버전을 올리고 이력을 남깁니다.

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::{
    ChangeGuideStatusRequest, CreateGuideRequest, MessageResponse, UpdateGuideRequest,
};
use crate::domain::models::AuthenticatedUser;
use crate::services::guides::GUIDE_DELETED;

#[get("")]
pub async fn list_guides(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let guides = state.guides.list().await?;
    Ok(HttpResponse::Ok().json(guides))
}

#[post("")]
pub async fn create_guide(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    payload: web::Json<CreateGuideRequest>,
) -> Result<HttpResponse, AppError> {
    let guide = state.guides.create(payload.into_inner(), &caller).await?;
    Ok(HttpResponse::Created().json(guide))
}

#[get("/{id}")]
pub async fn get_guide(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let guide = state.guides.get(&id).await?;
    Ok(HttpResponse::Ok().json(guide))
}

#[put("/{id}")]
pub async fn update_guide(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    id: web::Path<String>,
    payload: web::Json<UpdateGuideRequest>,
) -> Result<HttpResponse, AppError> {
    let guide = state.guides.update(&id, payload.into_inner(), &caller).await?;
    Ok(HttpResponse::Ok().json(guide))
}

#[put("/{id}/status")]
pub async fn change_guide_status(
    state: web::Data<AppState>,
    _caller: AuthenticatedUser,
    id: web::Path<String>,
    payload: web::Json<ChangeGuideStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let guide = state.guides.change_status(&id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(guide))
}

#[delete("/{id}")]
pub async fn delete_guide(
    state: web::Data<AppState>,
    _caller: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.guides.delete(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(GUIDE_DELETED)))
}
