//! API 라우트 설정 모듈
//!
//! 리소스별 `web::scope`로 핸들러를 묶고, 애플리케이션 상태와 추출기 오류 설정을
//! 함께 등록합니다.
//!
//! # Route Groups
//!
//! | 접두사 | 핸들러 모듈 | 인증 |
//! |--------|-------------|------|
//! | `/`, `/doc` | [`handlers::status`] | 불필요 |
//! | `/api/auth` | [`handlers::auth`] | `profile`만 필요 |
//! | `/api/users` | [`handlers::users`] | 불필요 |
//! | `/api/activities` | [`handlers::activities`] | 불필요 |
//! | `/api/events` | [`handlers::events`] | 불필요 |
//! | `/api/guides` | [`handlers::guides`] | 쓰기 작업에 필요 |
//! | `/api/notifications` | [`handlers::notifications`] | 불필요 |
//! | `/ws`, `/ws/{namespace}` | [`handlers::realtime`] | 불필요 |
//!
//! 인증이 필요한 핸들러는 `AuthenticatedUser` 추출기로 토큰을 요구하므로
//! 토큰 검증 자체는 앱 전체에 한 번 적용되는 `AuthMiddleware`가 담당합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new()
//!     .wrap(AuthMiddleware::optional())
//!     .configure(configure_app(state));
//! ```

use actix_web::web;

use crate::core::errors::{json_config, path_config, query_config};
use crate::core::state::AppState;
use crate::handlers;

/// 상태와 모든 라우트를 등록하는 설정 함수를 만듭니다.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(state))
            .app_data(json_config())
            .app_data(query_config())
            .app_data(path_config());

        configure_all_routes(cfg);
    }
}

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::status::api_status)
        .service(handlers::status::api_documentation);

    configure_auth_routes(cfg);
    configure_resource_routes(cfg);
    configure_socket_routes(cfg);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .service(handlers::auth::login)
            .service(handlers::auth::register)
            .service(handlers::auth::profile),
    );
}

fn configure_resource_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .service(handlers::users::list_users)
            .service(handlers::users::create_user)
            .service(handlers::users::update_instructor_status)
            .service(handlers::users::update_tags)
            .service(handlers::users::get_user)
            .service(handlers::users::update_user)
            .service(handlers::users::delete_user),
    );

    cfg.service(
        web::scope("/api/activities")
            .service(handlers::activities::list_activities)
            .service(handlers::activities::create_activity)
            .service(handlers::activities::get_activity)
            .service(handlers::activities::update_activity)
            .service(handlers::activities::delete_activity),
    );

    cfg.service(
        web::scope("/api/events")
            .service(handlers::events::list_events)
            .service(handlers::events::create_event)
            .service(handlers::events::update_participant)
            .service(handlers::events::get_event)
            .service(handlers::events::update_event)
            .service(handlers::events::delete_event),
    );

    // 가이드 쓰기 핸들러는 AuthenticatedUser를 요구합니다.
    cfg.service(
        web::scope("/api/guides")
            .service(handlers::guides::list_guides)
            .service(handlers::guides::create_guide)
            .service(handlers::guides::change_guide_status)
            .service(handlers::guides::get_guide)
            .service(handlers::guides::update_guide)
            .service(handlers::guides::delete_guide),
    );

    cfg.service(
        web::scope("/api/notifications")
            .service(handlers::notifications::list_notifications)
            .service(handlers::notifications::create_notification)
            .service(handlers::notifications::list_user_notifications)
            .service(handlers::notifications::get_notification)
            .service(handlers::notifications::mark_notification_read)
            .service(handlers::notifications::delete_notification),
    );
}

fn configure_socket_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::realtime::root_socket)
        .service(handlers::realtime::namespace_socket);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;

    use crate::core::errors::route_not_found;

    #[actix_web::test]
    async fn test_status_and_doc_are_public() {
        let app = test::init_service(App::new().configure(configure_app(AppState::for_tests()))).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let status: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(status["status"], "online");

        let req = test::TestRequest::get().uri("/doc").to_request();
        let doc: Value = test::call_and_read_body_json(&app, req).await;
        assert!(doc["endpoints"].as_array().unwrap().len() > 30);
    }

    #[actix_web::test]
    async fn test_unknown_route_uses_json_404() {
        let app = test::init_service(
            App::new()
                .configure(configure_app(AppState::for_tests()))
                .default_service(web::route().to(route_not_found)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/reportes").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Ruta no encontrada");
    }

    #[actix_web::test]
    async fn test_malformed_json_is_400() {
        let app = test::init_service(App::new().configure(configure_app(AppState::for_tests()))).await;

        let req = test::TestRequest::post()
            .uri("/api/activities")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{ no es json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
