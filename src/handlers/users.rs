//! # User Management HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/api/users?rol=` | 사용자 목록 | 200 / 400 |
//! | `POST` | `/api/users` | 사용자 생성 | 201 / 400 |
//! | `GET` | `/api/users/{id}` | 사용자 조회 | 200 / 404 |
//! | `PUT` | `/api/users/{id}` | 부분 수정 | 200 / 400 / 404 |
//! | `DELETE` | `/api/users/{id}` | 삭제 | 200 / 404 |
//! | `PUT` | `/api/users/{id}/instructor-status` | 강사 승인 상태 | 200 / 400 / 404 |
//! | `PUT` | `/api/users/{id}/etiquetas` | 태그 교체 | 200 / 404 |

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::{
    CreateUserRequest, MessageResponse, UpdateInstructorStatusRequest, UpdateTagsRequest,
    UpdateUserRequest, UserListQuery,
};

#[get("")]
pub async fn list_users(
    state: web::Data<AppState>,
    query: web::Query<UserListQuery>,
) -> Result<HttpResponse, AppError> {
    let users = state.users.list(query.rol.as_deref()).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[post("")]
pub async fn create_user(
    state: web::Data<AppState>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.users.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

#[get("/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = state.users.get(&id).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[put("/{id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.users.update(&id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.users.delete(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Usuario eliminado")))
}

#[put("/{id}/instructor-status")]
pub async fn update_instructor_status(
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: web::Json<UpdateInstructorStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let estado = payload.into_inner().estado_instructor.unwrap_or_default();
    let user = state.users.set_instructor_status(&id, &estado).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[put("/{id}/etiquetas")]
pub async fn update_tags(
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: web::Json<UpdateTagsRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.users.replace_tags(&id, payload.into_inner().etiquetas).await?;
    Ok(HttpResponse::Ok().json(user))
}
