//! # Notification HTTP Handlers
//!
//! `PUT /api/notifications/{id}`는 본문 없이 읽음 처리만 수행합니다.

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::{CreateNotificationRequest, MessageResponse};
use crate::services::notifications::NOTIFICATION_DELETED;

#[get("")]
pub async fn list_notifications(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let notifications = state.notifications.list().await?;
    Ok(HttpResponse::Ok().json(notifications))
}

#[post("")]
pub async fn create_notification(
    state: web::Data<AppState>,
    payload: web::Json<CreateNotificationRequest>,
) -> Result<HttpResponse, AppError> {
    let notification = state.notifications.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(notification))
}

/// 특정 사용자가 받은 알림
#[get("/user/{user_id}")]
pub async fn list_user_notifications(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let notifications = state.notifications.list_for_user(&user_id).await?;
    Ok(HttpResponse::Ok().json(notifications))
}

#[get("/{id}")]
pub async fn get_notification(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let notification = state.notifications.get(&id).await?;
    Ok(HttpResponse::Ok().json(notification))
}

#[put("/{id}")]
pub async fn mark_notification_read(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let notification = state.notifications.mark_read(&id).await?;
    Ok(HttpResponse::Ok().json(notification))
}

#[delete("/{id}")]
pub async fn delete_notification(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.notifications.delete(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(NOTIFICATION_DELETED)))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use mongodb::bson::oid::ObjectId;
    use serde_json::{json, Value};

    use crate::core::state::AppState;
    use crate::realtime::{events, Namespace};
    use crate::routes::configure_app;

    fn user_body(documento: &str, nombre: &str) -> Value {
        json!({
            "nombre": nombre,
            "tipoDocumento": "CC",
            "documento": documento,
            "correoInstitucional": format!("u{}@sena.edu.co", documento),
            "correoPersonal": format!("u{}@gmail.com", documento),
            "password": "secreto",
            "rol": "Instructor"
        })
    }

    fn notification_body(destinatario: &str) -> Value {
        json!({
            "titulo": "Guía publicada",
            "mensaje": "La guía de evaluación está disponible",
            "tipo": "Info",
            "destinatario": destinatario
        })
    }

    #[actix_web::test]
    async fn test_created_notification_is_listed_with_populated_recipient() {
        let app = test::init_service(App::new().configure(configure_app(AppState::for_tests()))).await;

        let req = test::TestRequest::post().uri("/api/users").set_json(user_body("701", "Sofía Herrera")).to_request();
        let recipient: Value = test::call_and_read_body_json(&app, req).await;
        let recipient_id = recipient["_id"].as_str().unwrap();

        let req = test::TestRequest::post()
            .uri("/api/notifications")
            .set_json(notification_body(recipient_id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        for uri in ["/api/notifications".to_string(), format!("/api/notifications/user/{}", recipient_id)] {
            let req = test::TestRequest::get().uri(&uri).to_request();
            let list: Value = test::call_and_read_body_json(&app, req).await;
            let list = list.as_array().unwrap();
            assert_eq!(list.len(), 1);

            let destinatario = &list[0]["destinatario"];
            assert_eq!(destinatario["nombre"], "Sofía Herrera");
            assert_eq!(destinatario["correoInstitucional"], "u701@sena.edu.co");
            assert!(destinatario.get("password").is_none());
        }
    }

    #[actix_web::test]
    async fn test_mark_read_sets_timestamp_and_broadcasts() {
        let state = AppState::for_tests();
        let mut rx = state.hub.subscribe(Namespace::Notifications);
        let app = test::init_service(App::new().configure(configure_app(state))).await;

        let req = test::TestRequest::post()
            .uri("/api/notifications")
            .set_json(notification_body(&ObjectId::new().to_hex()))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created["leida"], false);

        let req = test::TestRequest::put()
            .uri(&format!("/api/notifications/{}", created["_id"].as_str().unwrap()))
            .to_request();
        let read: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(read["leida"], true);
        assert!(read["fechaLectura"].is_string());

        let first = rx.recv().await.unwrap();
        assert_eq!(first.event, "notification-created");
        assert_eq!(first.seq, Some(1));
        let second = rx.recv().await.unwrap();
        assert_eq!(second.event, events::NOTIFICATION_READ);
        assert_eq!(second.seq, Some(2));
    }

    #[actix_web::test]
    async fn test_list_for_user() {
        let app = test::init_service(App::new().configure(configure_app(AppState::for_tests()))).await;
        let target = ObjectId::new().to_hex();

        for destinatario in [target.clone(), ObjectId::new().to_hex(), target.clone()] {
            let req = test::TestRequest::post()
                .uri("/api/notifications")
                .set_json(notification_body(&destinatario))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get()
            .uri(&format!("/api/notifications/user/{}", target))
            .to_request();
        let list: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list.as_array().unwrap().len(), 2);

        let req = test::TestRequest::get().uri("/api/notifications").to_request();
        let all: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.as_array().unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn test_missing_notification() {
        let app = test::init_service(App::new().configure(configure_app(AppState::for_tests()))).await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/notifications/{}", ObjectId::new().to_hex()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Notificación no encontrada");
    }
}
