//! 로그인 요청

use serde::Deserialize;
use validator::Validate;

/// `POST /api/auth/login`
///
/// `correo`는 기관 이메일 또는 개인 이메일 어느 쪽이든 될 수 있습니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "El correo es requerido"))]
    pub correo: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "La contraseña es requerida"))]
    pub password: String,
}
