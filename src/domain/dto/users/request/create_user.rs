//! 사용자 생성 / 회원 가입 요청

use serde::Deserialize;
use validator::Validate;

use crate::domain::dto::validators::{INSTITUTIONAL_EMAIL, PERSONAL_EMAIL};
use crate::domain::entities::{DocumentType, InstructorStatus, Role};

/// `POST /api/users`, `POST /api/auth/register`, 소켓 `create-instructor` 공통 본문
///
/// 강사 역할이면서 `estadoInstructor`가 없으면 `pendiente`로 저장됩니다.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "El nombre es requerido"))]
    pub nombre: String,

    pub tipo_documento: DocumentType,

    #[serde(default)]
    #[validate(length(min = 1, message = "El número de documento es requerido"))]
    pub documento: String,

    #[serde(default)]
    #[validate(regex(path = *INSTITUTIONAL_EMAIL, message = "El correo debe ser institucional (@sena.edu.co)"))]
    pub correo_institucional: String,

    #[serde(default)]
    #[validate(regex(path = *PERSONAL_EMAIL, message = "Por favor ingrese un correo válido"))]
    pub correo_personal: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: String,

    pub rol: Role,

    #[serde(default)]
    pub etiquetas: Vec<String>,

    #[serde(default)]
    pub estado_instructor: Option<InstructorStatus>,
}

/// 회원 가입은 사용자 생성과 같은 본문을 사용합니다.
pub type RegisterRequest = CreateUserRequest;
