//! 사용자 부분 수정 요청
//!
//! 역할(`rol`)과 비밀번호는 이 DTO로 바꿀 수 없습니다.
//! 강사 승인 상태는 전용 엔드포인트(`/instructor-status`)로만 변경됩니다.

use serde::Deserialize;
use validator::Validate;

use crate::domain::dto::validators::{INSTITUTIONAL_EMAIL, PERSONAL_EMAIL};
use crate::domain::entities::{DocumentType, User};
use crate::utils::string_utils::normalize_tags;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "El nombre es requerido"))]
    pub nombre: Option<String>,

    pub tipo_documento: Option<DocumentType>,

    #[validate(length(min = 1, message = "El número de documento es requerido"))]
    pub documento: Option<String>,

    #[validate(regex(path = *INSTITUTIONAL_EMAIL, message = "El correo debe ser institucional (@sena.edu.co)"))]
    pub correo_institucional: Option<String>,

    #[validate(regex(path = *PERSONAL_EMAIL, message = "Por favor ingrese un correo válido"))]
    pub correo_personal: Option<String>,

    /// 주어지면 목록 전체를 교체합니다.
    pub etiquetas: Option<Vec<String>>,
}

impl UpdateUserRequest {
    pub fn apply(self, user: &mut User) {
        if let Some(nombre) = self.nombre {
            user.nombre = nombre;
        }
        if let Some(tipo) = self.tipo_documento {
            user.tipo_documento = tipo;
        }
        if let Some(documento) = self.documento {
            user.documento = documento;
        }
        if let Some(correo) = self.correo_institucional {
            user.correo_institucional = correo;
        }
        if let Some(correo) = self.correo_personal {
            user.correo_personal = correo;
        }
        if let Some(etiquetas) = self.etiquetas {
            user.etiquetas = normalize_tags(etiquetas);
        }
    }
}

/// `PUT /api/users/{id}/instructor-status`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstructorStatusRequest {
    #[serde(default)]
    pub estado_instructor: Option<String>,
}

/// `PUT /api/users/{id}/etiquetas`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTagsRequest {
    pub etiquetas: Vec<String>,
}

/// `GET /api/users?rol=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    pub rol: Option<String>,
}
