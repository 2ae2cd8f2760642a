//! User Entity Implementation
//!
//! SenaCloud 사용자(관리자, 코디네이터, 교육팀, 강사) 엔티티입니다.
//! 비밀번호는 bcrypt 해시로만 저장되며 응답 DTO로 변환될 때 제외됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::repositories::Entity;

/// 신분증 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    CC,
    CE,
    TI,
    #[serde(rename = "PASAPORTE")]
    Pasaporte,
}

/// 사용자 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Instructor,
    EquipoPedagogico,
    Coordinacion,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Instructor => "Instructor",
            Role::EquipoPedagogico => "EquipoPedagogico",
            Role::Coordinacion => "Coordinacion",
            Role::Admin => "Admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Instructor" => Some(Role::Instructor),
            "EquipoPedagogico" => Some(Role::EquipoPedagogico),
            "Coordinacion" => Some(Role::Coordinacion),
            "Admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// 강사 승인 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructorStatus {
    Pendiente,
    Aprobado,
}

impl InstructorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstructorStatus::Pendiente => "pendiente",
            InstructorStatus::Aprobado => "aprobado",
        }
    }

    /// `pendiente`/`aprobado` 외의 값은 `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "pendiente" => Some(InstructorStatus::Pendiente),
            "aprobado" => Some(InstructorStatus::Aprobado),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub nombre: String,

    pub tipo_documento: DocumentType,

    /// 고유 값
    pub documento: String,

    /// 고유 값, 항상 `@sena.edu.co`로 끝남
    pub correo_institucional: String,

    /// 고유 값
    pub correo_personal: String,

    /// bcrypt 해시
    pub password: String,

    pub rol: Role,

    #[serde(default)]
    pub etiquetas: Vec<String>,

    /// 강사에게만 존재
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado_instructor: Option<InstructorStatus>,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 사용자를 만듭니다.
    ///
    /// 강사 역할이면 승인 상태를 보정합니다(미지정 시 `pendiente`),
    /// 다른 역할이면 승인 상태를 제거합니다.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        nombre: String,
        tipo_documento: DocumentType,
        documento: String,
        correo_institucional: String,
        correo_personal: String,
        password_hash: String,
        rol: Role,
        etiquetas: Vec<String>,
        estado_instructor: Option<InstructorStatus>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            nombre,
            tipo_documento,
            documento,
            correo_institucional,
            correo_personal,
            password: password_hash,
            rol,
            etiquetas,
            estado_instructor: Self::normalize_status(rol, estado_instructor),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn normalize_status(
        rol: Role,
        estado: Option<InstructorStatus>,
    ) -> Option<InstructorStatus> {
        match rol {
            Role::Instructor => Some(estado.unwrap_or(InstructorStatus::Pendiente)),
            _ => None,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_instructor(&self) -> bool {
        self.rol == Role::Instructor
    }
}

impl Entity for User {
    const COLLECTION: &'static str = "users";
    const UNIQUE_FIELDS: &'static [&'static str] =
        &["documento", "correoInstitucional", "correoPersonal"];

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }
}
