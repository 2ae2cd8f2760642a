//! # Activity HTTP Handlers
//!
//! `/api/activities` CRUD. 응답의 `responsable`과 `participantes`는 공개 사용자
//! 정보로 채워집니다.

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::{CreateActivityRequest, MessageResponse, UpdateActivityRequest};
use crate::services::activities::ACTIVITY_DELETED;

#[get("")]
pub async fn list_activities(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let activities = state.activities.list().await?;
    Ok(HttpResponse::Ok().json(activities))
}

#[post("")]
pub async fn create_activity(
    state: web::Data<AppState>,
    payload: web::Json<CreateActivityRequest>,
) -> Result<HttpResponse, AppError> {
    let activity = state.activities.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(activity))
}

#[get("/{id}")]
pub async fn get_activity(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let activity = state.activities.get(&id).await?;
    Ok(HttpResponse::Ok().json(activity))
}

#[put("/{id}")]
pub async fn update_activity(
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: web::Json<UpdateActivityRequest>,
) -> Result<HttpResponse, AppError> {
    let activity = state.activities.update(&id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(activity))
}

#[delete("/{id}")]
pub async fn delete_activity(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.activities.delete(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(ACTIVITY_DELETED)))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use mongodb::bson::oid::ObjectId;
    use serde_json::{json, Value};

    use crate::core::state::AppState;
    use crate::routes::configure_app;

    #[actix_web::test]
    async fn test_created_activity_is_listed_with_populated_users() {
        let app = test::init_service(App::new().configure(configure_app(AppState::for_tests()))).await;

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({
                "nombre": "Ana Ruiz",
                "tipoDocumento": "CC",
                "documento": "555",
                "correoInstitucional": "ana@sena.edu.co",
                "correoPersonal": "ana@gmail.com",
                "password": "secreto",
                "rol": "Coordinacion"
            }))
            .to_request();
        let owner: Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/activities")
            .set_json(json!({
                "titulo": "Revisión de guías",
                "descripcion": "Revisión trimestral",
                "tipo": "Proyecto",
                "fechaInicio": "2025-03-01T13:00:00Z",
                "fechaFin": "2025-03-01T15:00:00Z",
                "responsable": owner["_id"],
                "participantes": [owner["_id"]]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::get().uri("/api/activities").to_request();
        let list: Value = test::call_and_read_body_json(&app, req).await;
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["estado"], "Pendiente");
        assert_eq!(list[0]["responsable"]["nombre"], "Ana Ruiz");
        assert_eq!(list[0]["participantes"][0]["correoInstitucional"], "ana@sena.edu.co");
        assert!(list[0]["responsable"].get("password").is_none());
    }

    #[actix_web::test]
    async fn test_missing_activity() {
        let app = test::init_service(App::new().configure(configure_app(AppState::for_tests()))).await;
        let missing = ObjectId::new().to_hex();

        let req = test::TestRequest::get().uri(&format!("/api/activities/{}", missing)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete().uri(&format!("/api/activities/{}", missing)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Actividad no encontrada");

        let req = test::TestRequest::get().uri("/api/activities/no-es-un-id").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }
}
