//! `/instructors` 네임스페이스 소켓 페이로드

use serde::Deserialize;

use super::update_user::UpdateUserRequest;

/// `update-instructor-status {instructorId, status}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorStatusPayload {
    pub instructor_id: Option<String>,
    pub status: Option<String>,
}

/// `get-instructor {id}`, `delete-instructor {id}`
#[derive(Debug, Clone, Deserialize)]
pub struct IdPayload {
    pub id: String,
}

/// `update-instructor {id, ...campos}`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInstructorPayload {
    pub id: String,
    #[serde(flatten)]
    pub changes: UpdateUserRequest,
}
