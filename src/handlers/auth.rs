//! # Authentication HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/auth/login` | 로그인 | 200 / 401 |
//! | `POST` | `/api/auth/register` | 회원 가입 | 201 / 400 |
//! | `GET` | `/api/auth/profile` | 현재 사용자 | 200 / 401 |

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::{LoginRequest, RegisterRequest};
use crate::domain::models::AuthenticatedUser;

/// `correo`는 기관 이메일 또는 개인 이메일
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = state.auth.login(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = state.auth.register(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/profile")]
pub async fn profile(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.auth.profile(&caller).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    use crate::core::state::AppState;
    use crate::middlewares::AuthMiddleware;
    use crate::routes::configure_app;

    fn register_body(correo: &str, password: &str) -> Value {
        json!({
            "nombre": "María López",
            "tipoDocumento": "CC",
            "documento": "10203040",
            "correoInstitucional": correo,
            "correoPersonal": "maria@gmail.com",
            "password": password,
            "rol": "Coordinacion"
        })
    }

    #[actix_web::test]
    async fn test_register_rejects_foreign_domain() {
        let app = test::init_service(
            App::new().wrap(AuthMiddleware::optional()).configure(configure_app(AppState::for_tests())),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(register_body("maria@gmail.com", "secreto"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "El correo debe ser institucional (@sena.edu.co)");
    }

    #[actix_web::test]
    async fn test_register_rejects_short_password() {
        let app = test::init_service(
            App::new().wrap(AuthMiddleware::optional()).configure(configure_app(AppState::for_tests())),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(register_body("maria@sena.edu.co", "12345"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_register_login_and_profile() {
        let app = test::init_service(
            App::new().wrap(AuthMiddleware::optional()).configure(configure_app(AppState::for_tests())),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(register_body("maria@sena.edu.co", "secreto"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let registered: Value = test::read_body_json(resp).await;
        assert!(registered["user"].get("password").is_none());

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "correo": "maria@sena.edu.co", "password": "secreto" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let login: Value = test::read_body_json(resp).await;
        let token = login["token"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/api/auth/profile")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let profile: Value = test::read_body_json(resp).await;
        assert_eq!(profile["_id"], registered["user"]["_id"]);

        let req = test::TestRequest::get().uri("/api/auth/profile").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_login_with_bad_password() {
        let app = test::init_service(
            App::new().wrap(AuthMiddleware::optional()).configure(configure_app(AppState::for_tests())),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(register_body("maria@sena.edu.co", "secreto"))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "correo": "maria@gmail.com", "password": "incorrecta" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Credenciales inválidas");
    }
}
