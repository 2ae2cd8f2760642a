//! # 애플리케이션 에러 처리
//!
//! SenaCloud 백엔드 전체에서 사용하는 통합 에러 타입입니다.
//! 모든 계층(리포지토리, 서비스, 핸들러, 실시간 소켓)이 같은 `AppError`를
//! 반환하고, HTTP 경계에서는 `ResponseError` 구현이 상태 코드와
//! `{ "message": ... }` 형식의 JSON 본문으로 변환합니다.
//!
//! ## 상태 코드 매핑
//!
//! | 변형 | HTTP 상태 | 응답 메시지 |
//! |------|-----------|-------------|
//! | `ValidationError` | 400 | 원본 메시지 |
//! | `NotFound` | 404 | 원본 메시지 |
//! | `AuthenticationError` | 401 | 원본 메시지 |
//! | `DatabaseError` / `InternalError` | 500 | 일반 메시지 (원인은 로그) |
//!
//! 5xx 계열의 원인은 클라이언트에 노출하지 않고 `log::error!`로만 남깁니다.
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn get(&self, id: &str) -> AppResult<UserResponse> {
//!     let object_id = parse_object_id(id)?;
//!     self.users.find_by_id(&object_id).await?
//!         .map(UserResponse::from)
//!         .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))
//! }
//! ```

use actix_web::{HttpRequest, HttpResponse, error, web};
use mongodb::bson::oid::ObjectId;
use thiserror::Error;
use validator::ValidationErrors;

/// 5xx 응답에 사용하는 일반 메시지
pub const GENERIC_SERVER_MESSAGE: &str = "Error en el servidor";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력 검증 실패 (400). 메시지는 그대로 클라이언트에 전달됩니다.
    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AuthenticationError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트에 노출해도 되는 메시지
    ///
    /// 서버 측 에러는 원인 대신 일반 메시지를 돌려줍니다.
    pub fn public_message(&self) -> String {
        if self.is_server_error() {
            GENERIC_SERVER_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            AppError::DatabaseError(_) | AppError::InternalError(_)
        )
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        }

        HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "message": self.public_message()
            }))
    }
}

/// validator 에러를 사람이 읽을 수 있는 한 줄 메시지로 변환
///
/// 필드 이름 순으로 정렬해 응답이 항상 같은 순서를 갖도록 합니다.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let messages: Vec<String> = fields
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} no es válido", field))
                })
            })
            .collect();

        AppError::ValidationError(messages.join(", "))
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(e: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON 직렬화 실패: {}", e))
    }
}

impl From<mongodb::bson::de::Error> for AppError {
    fn from(e: mongodb::bson::de::Error) -> Self {
        AppError::InternalError(format!("BSON 역직렬화 실패: {}", e))
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 외부 에러에 컨텍스트를 붙여 `InternalError`로 변환하는 확장 트레이트
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

/// 16진수 문자열을 `ObjectId`로 변환합니다. 형식 오류는 400입니다.
pub fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id.trim())
        .map_err(|_| AppError::ValidationError("ID inválido".to_string()))
}

/// JSON 본문 역직렬화 실패를 400 응답으로 변환하는 설정
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
            AppError::ValidationError(format!("Datos inválidos: {}", err)).into()
        })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err: error::QueryPayloadError, _req: &HttpRequest| {
            AppError::ValidationError(format!("Parámetros inválidos: {}", err)).into()
        })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err: error::PathError, _req: &HttpRequest| {
            AppError::ValidationError(format!("Ruta inválida: {}", err)).into()
        })
}

/// 등록되지 않은 경로에 대한 기본 응답
pub async fn route_not_found() -> AppResult<HttpResponse> {
    Err(AppError::NotFound("Ruta no encontrada".to_string()))
}
