//! 사용자 응답 DTO

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{DocumentType, InstructorStatus, Role, User};
use crate::utils::time::to_chrono;

/// 공개 사용자 정보 (비밀번호 해시 제외)
///
/// 다른 엔티티의 사용자 참조를 채울 때도 이 형태를 사용합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub nombre: String,
    pub tipo_documento: DocumentType,
    pub documento: String,
    pub correo_institucional: String,
    pub correo_personal: String,
    pub rol: Role,
    pub etiquetas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado_instructor: Option<InstructorStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            nombre: user.nombre,
            tipo_documento: user.tipo_documento,
            documento: user.documento,
            correo_institucional: user.correo_institucional,
            correo_personal: user.correo_personal,
            rol: user.rol,
            etiquetas: user.etiquetas,
            estado_instructor: user.estado_instructor,
            created_at: to_chrono(user.created_at),
            updated_at: to_chrono(user.updated_at),
        }
    }
}

/// 로그인 / 회원 가입 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

/// `instructor-status-updated` 브로드캐스트 페이로드
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorStatusChanged {
    pub instructor_id: String,
    pub status: InstructorStatus,
    pub timestamp: DateTime<Utc>,
}

/// 응답 생성 시 참조를 채우기 위한 사용자 조회 결과
#[derive(Debug, Clone, Default)]
pub struct PopulatedUsers {
    users: HashMap<ObjectId, UserResponse>,
}

impl PopulatedUsers {
    pub fn new(users: Vec<User>) -> Self {
        let users = users
            .into_iter()
            .filter_map(|u| u.id.map(|id| (id, UserResponse::from(u))))
            .collect();
        Self { users }
    }

    /// 삭제된 사용자를 가리키면 `None`
    pub fn get(&self, id: &ObjectId) -> Option<UserResponse> {
        self.users.get(id).cloned()
    }

    /// 존재하는 사용자만 순서대로 반환합니다.
    pub fn many(&self, ids: &[ObjectId]) -> Vec<UserResponse> {
        ids.iter().filter_map(|id| self.get(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_not_exposed() {
        let mut user = User::new(
            "Ana".into(),
            DocumentType::CE,
            "9".into(),
            "ana@sena.edu.co".into(),
            "ana@gmail.com".into(),
            "$2b$04$secret".into(),
            Role::Coordinacion,
            vec!["Gestión".into()],
            None,
        );
        user.id = Some(ObjectId::new());

        let json = serde_json::to_value(UserResponse::from(user.clone())).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["_id"], user.id.unwrap().to_hex());
        assert_eq!(json["rol"], "Coordinacion");
        assert!(json.get("estadoInstructor").is_none());
    }

    #[test]
    fn test_populated_users_drop_dangling_refs() {
        let mut user = User::new(
            "Ana".into(),
            DocumentType::CC,
            "1".into(),
            "ana@sena.edu.co".into(),
            "ana@gmail.com".into(),
            "h".into(),
            Role::Admin,
            vec![],
            None,
        );
        let id = ObjectId::new();
        user.id = Some(id);

        let populated = PopulatedUsers::new(vec![user]);
        let missing = ObjectId::new();
        assert!(populated.get(&missing).is_none());
        assert_eq!(populated.many(&[missing, id]).len(), 1);
    }
}
