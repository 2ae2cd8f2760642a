//! 문자열 정리 유틸리티
//!
//! DTO에서 엔티티로 값을 옮기기 전에 공백을 정리하고 필수 여부를 확인합니다.

use serde::Deserialize;

use crate::core::errors::AppError;

/// 앞뒤 공백을 제거하고 비어 있으면 400 에러를 반환합니다.
///
/// ```rust,ignore
/// let titulo = validate_required_string("  Guía  ", "titulo")?; // "Guía"
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("El campo {} es requerido", field_name)
        ));
    }

    Ok(trimmed.to_string())
}

/// 공백만 있는 문자열은 `None`으로 취급합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 태그 목록 정리: 공백 제거, 빈 값 제외, 순서를 유지한 채 중복 제거
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(tags.len());

    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !seen.iter().any(|t: &String| t == tag) {
            seen.push(tag.to_string());
        }
    }

    seen
}

/// serde 필드용: 공백 문자열을 `None`으로 역직렬화
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
