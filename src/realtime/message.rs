//! 소켓 메시지 봉투
//!
//! 모든 WebSocket 텍스트 프레임은 `{"event": ..., "data": ..., "seq"?: ...}` 형식입니다.
//! `seq`는 허브가 네임스페이스별로 부여하는 번호이며, 요청에 대한 직접 응답에는 없습니다.
//!
//! 요청 `data`에 `requestId`가 있으면 직접 응답(`error` 포함)의 `data`에 같은 값이 실립니다.
//! 같은 연결에서 동시에 보낸 요청의 응답을 구분할 때 사용합니다.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::errors::{AppError, AppResult, ErrorContext};

pub const REQUEST_ID: &str = "requestId";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocketMessage {
    pub event: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
}

impl SocketMessage {
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
            seq: None,
        }
    }

    pub fn with_seq(mut self, seq: u64) -> Self {
        self.seq = Some(seq);
        self
    }

    pub fn request_id(&self) -> Option<&Value> {
        self.data.get(REQUEST_ID).filter(|id| !id.is_null())
    }

    /// 요청의 `requestId`를 응답에 옮겨 싣습니다. 객체가 아닌 `data`는 그대로 둡니다.
    pub fn with_request_id(mut self, request_id: Option<Value>) -> Self {
        if let (Some(id), Value::Object(map)) = (request_id, &mut self.data) {
            map.insert(REQUEST_ID.to_string(), id);
        }
        self
    }

    /// 직렬화 가능한 페이로드로 메시지를 만듭니다.
    pub fn from_payload<T: Serialize>(event: impl Into<String>, payload: &T) -> AppResult<Self> {
        let data = serde_json::to_value(payload)
            .context("페이로드 직렬화 실패")?;
        Ok(Self::new(event, data))
    }

    /// `error {message, event}`
    pub fn error(message: impl Into<String>, event: &str) -> Self {
        Self::new(
            events::ERROR,
            serde_json::json!({ "message": message.into(), "event": event }),
        )
    }

    pub fn parse(text: &str) -> AppResult<Self> {
        serde_json::from_str(text)
            .map_err(|_| AppError::ValidationError("Mensaje con formato inválido".to_string()))
    }

    pub fn to_text(&self) -> String {
        // Value 기반 구조체라 직렬화가 실패하지 않습니다.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// 리소스 변경 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Created,
    Updated,
    Deleted,
}

impl Change {
    pub fn suffix(&self) -> &'static str {
        match self {
            Change::Created => "created",
            Change::Updated => "updated",
            Change::Deleted => "deleted",
        }
    }

    /// `activity` + `Created` → `activity-created`
    pub fn event_name(&self, resource: &str) -> String {
        format!("{}-{}", resource, self.suffix())
    }

    /// 델타 이벤트 이름을 (리소스, 변경 종류)로 분해합니다.
    pub fn parse_event(event: &str) -> Option<(&str, Change)> {
        let (resource, suffix) = event.rsplit_once('-')?;
        let change = match suffix {
            "created" => Change::Created,
            "updated" => Change::Updated,
            "deleted" => Change::Deleted,
            "read" => Change::Updated,
            _ => return None,
        };
        Some((resource, change))
    }
}

/// 이벤트 이름 상수
pub mod events {
    pub const ERROR: &str = "error";
    pub const SYNC: &str = "sync";
    pub const CONNECTED: &str = "connected";

    pub const REQUEST_STATUS: &str = "request-status";
    pub const API_STATUS: &str = "api-status";
    pub const REQUEST_DOCUMENTATION: &str = "request-documentation";
    pub const API_DOCUMENTATION: &str = "api-documentation";

    pub const NOTIFICATION_READ: &str = "notification-read";
    pub const PARTICIPANT_STATUS_UPDATED: &str = "participant-status-updated";
    pub const SYSTEM_NOTIFICATION: &str = "system-notification";

    pub const GET_INSTRUCTORS: &str = "get-instructors";
    pub const INSTRUCTORS_LIST: &str = "instructors-list";
    pub const GET_INSTRUCTOR: &str = "get-instructor";
    pub const INSTRUCTOR_DATA: &str = "instructor-data";
    pub const CREATE_INSTRUCTOR: &str = "create-instructor";
    pub const INSTRUCTOR_CREATED: &str = "instructor-created";
    pub const UPDATE_INSTRUCTOR: &str = "update-instructor";
    pub const INSTRUCTOR_UPDATED: &str = "instructor-updated";
    pub const DELETE_INSTRUCTOR: &str = "delete-instructor";
    pub const INSTRUCTOR_DELETED: &str = "instructor-deleted";
    pub const UPDATE_INSTRUCTOR_STATUS: &str = "update-instructor-status";
    pub const STATUS_UPDATE_SUCCESS: &str = "status-update-success";
    pub const INSTRUCTOR_STATUS_UPDATED: &str = "instructor-status-updated";
}
