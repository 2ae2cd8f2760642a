//! # Data Transfer Objects (DTO) Module
//!
//! API 경계(REST 본문, 소켓 페이로드)에서 사용하는 데이터 구조입니다.
//!
//! - **요청 DTO**: `Create…Request`는 생성에 필요한 필드를, `Update…Request`는
//!   변경 가능한 필드만 `Option`으로 선언합니다. 역할, 비밀번호, 가이드 버전처럼
//!   일반 수정으로 바뀌면 안 되는 필드는 수정 DTO에 존재하지 않습니다.
//! - **응답 DTO**: ObjectId는 16진수 문자열(`_id`), 시각은 RFC 3339로 직렬화하고,
//!   사용자 참조는 공개 사용자 정보([`UserResponse`])로 채웁니다.
//!
//! ```text
//! dto/
//! ├── users/          # 사용자, 인증, 강사 소켓 페이로드
//! ├── activities/
//! ├── events/
//! ├── guides/
//! ├── notifications/
//! └── validators.rs   # 이메일 패턴, 비밀번호 규칙
//! ```

pub mod validators;
pub mod users;
pub mod activities;
pub mod events;
pub mod guides;
pub mod notifications;

pub use users::*;
pub use activities::*;
pub use events::*;
pub use guides::*;
pub use notifications::*;

use serde::{Deserialize, Serialize};

/// `{ "message": ... }` 형식의 단순 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
