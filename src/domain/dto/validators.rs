//! 요청 DTO에서 공유하는 검증 규칙

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::errors::{parse_object_id, AppResult};
use mongodb::bson::oid::ObjectId;

/// 기관 이메일 (`@sena.edu.co`)
pub static INSTITUTIONAL_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w\-.]+@sena\.edu\.co$").expect("institutional email pattern")
});

/// 개인 이메일
pub static PERSONAL_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w\-.]+@([\w-]+\.)+[\w-]{2,4}$").expect("personal email pattern")
});

pub const INSTITUTIONAL_EMAIL_MESSAGE: &str = "El correo debe ser institucional (@sena.edu.co)";
pub const PASSWORD_MESSAGE: &str = "La contraseña debe tener al menos 6 caracteres";

/// 사용자 참조 목록 변환
pub fn parse_object_ids(ids: &[String]) -> AppResult<Vec<ObjectId>> {
    ids.iter().map(|id| parse_object_id(id)).collect()
}
