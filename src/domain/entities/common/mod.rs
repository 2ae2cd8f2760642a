//! 여러 엔티티가 공유하는 하위 문서

use serde::{Deserialize, Serialize};

/// 첨부 파일 메타데이터 (`{nombre, url, tipo}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
}
