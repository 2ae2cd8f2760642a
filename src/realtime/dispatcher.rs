//! 클라이언트 → 서버 소켓 이벤트 처리
//!
//! 세션은 받은 메시지를 [`dispatch`]에 넘기고, 반환된 메시지를 요청한 소켓에만 보냅니다.
//! 네임스페이스 전체로 가는 메시지는 서비스 또는 이 모듈이 허브로 직접 발행합니다.
//!
//! | 네임스페이스 | 이벤트 | 응답 |
//! |--------------|--------|------|
//! | 모든 리소스 | `sync` | 요청자에게 `<resources>-updated` |
//! | 모든 리소스 | `<resource>-created/updated/deleted` 등 변경 알림 | 네임스페이스 전체에 `<resources>-updated` |
//! | `/` | `request-status`, `request-documentation` | `api-status`, `api-documentation` |
//! | `/instructors` | `get-instructors` 등 | 모듈 하단 참조 |
//!
//! 실패는 `error {message, event}`로 요청자에게만 전달됩니다.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::core::state::AppState;
use crate::domain::dto::{CreateUserRequest, IdPayload, InstructorStatusPayload, UpdateInstructorPayload};
use crate::realtime::message::{events, Change, SocketMessage};
use crate::realtime::namespace::Namespace;
use crate::services::system;

pub const INCOMPLETE_DATA: &str = "Datos incompletos";
pub const INTERNAL_SOCKET_ERROR: &str = "Error interno del servidor";
pub const UNSUPPORTED_EVENT: &str = "Evento no soportado";
pub const STATUS_UPDATED: &str = "Estado actualizado correctamente";

/// 요청자에게 보낼 응답을 반환합니다. 응답이 없는 이벤트는 `None`입니다.
pub async fn dispatch(state: &AppState, ns: Namespace, message: SocketMessage) -> Option<SocketMessage> {
    let event = message.event.clone();
    let request_id = message.request_id().cloned();

    let reply = match route(state, ns, message).await {
        Ok(reply) => reply,
        Err(e) => {
            let text = if e.is_server_error() {
                log::error!("소켓 이벤트 처리 실패 ({} {}): {}", ns, event, e);
                INTERNAL_SOCKET_ERROR.to_string()
            } else {
                e.to_string()
            };
            Some(SocketMessage::error(text, &event))
        }
    };

    reply.map(|reply| reply.with_request_id(request_id))
}

/// 현재 컬렉션 전체와, 읽기 직전에 관측한 `seq`
///
/// 번호를 먼저 읽으므로 스냅샷은 그 번호까지의 모든 쓰기를 포함합니다.
pub async fn snapshot(state: &AppState, ns: Namespace) -> AppResult<Option<(Value, u64)>> {
    let seq = state.hub.current_seq(ns);

    let items = match ns {
        Namespace::Root => return Ok(None),
        Namespace::Users => to_value(&state.users.list(None).await?)?,
        Namespace::Instructors => to_value(&state.users.list_instructors().await?)?,
        Namespace::Activities => to_value(&state.activities.list().await?)?,
        Namespace::Events => to_value(&state.events.list().await?)?,
        Namespace::Guides => to_value(&state.guides.list().await?)?,
        Namespace::Notifications => to_value(&state.notifications.list().await?)?,
    };

    Ok(Some((items, seq)))
}

async fn route(state: &AppState, ns: Namespace, message: SocketMessage) -> AppResult<Option<SocketMessage>> {
    let SocketMessage { event, data, .. } = message;

    if event == events::SYNC {
        return Ok(snapshot(state, ns).await?.and_then(|(items, seq)| {
            ns.snapshot_event()
                .map(|name| SocketMessage::new(name, items).with_seq(seq))
        }));
    }

    if is_change_notice(ns, &event) {
        if let Some((items, seq)) = snapshot(state, ns).await? {
            state.hub.broadcast_snapshot(ns, items, seq);
        }
        return Ok(None);
    }

    match ns {
        Namespace::Root => root_event(state, &event),
        Namespace::Instructors => instructor_event(state, &event, data).await,
        _ => Err(AppError::ValidationError(UNSUPPORTED_EVENT.to_string())),
    }
}

/// 이전 클라이언트가 쓰기 후 보내는 변경 알림인지 확인
fn is_change_notice(ns: Namespace, event: &str) -> bool {
    let Some(resource) = ns.resource() else {
        return false;
    };

    if event == events::PARTICIPANT_STATUS_UPDATED {
        return ns == Namespace::Events;
    }

    match Change::parse_event(event) {
        Some((name, _)) => name == resource,
        None => false,
    }
}

fn root_event(state: &AppState, event: &str) -> AppResult<Option<SocketMessage>> {
    match event {
        events::REQUEST_STATUS => Ok(Some(SocketMessage::new(events::API_STATUS, system::heartbeat()))),
        events::REQUEST_DOCUMENTATION => Ok(Some(SocketMessage::new(
            events::API_DOCUMENTATION,
            system::documentation(),
        ))),
        _ => {
            log::debug!("루트 네임스페이스 미지원 이벤트: {} ({}명 연결)", event, state.hub.connections());
            Err(AppError::ValidationError(UNSUPPORTED_EVENT.to_string()))
        }
    }
}

async fn instructor_event(state: &AppState, event: &str, data: Value) -> AppResult<Option<SocketMessage>> {
    let users = &state.users;

    let reply = match event {
        events::GET_INSTRUCTORS => {
            SocketMessage::from_payload(events::INSTRUCTORS_LIST, &users.list_instructors().await?)?
        }
        events::GET_INSTRUCTOR => {
            let IdPayload { id } = payload(data)?;
            SocketMessage::from_payload(events::INSTRUCTOR_DATA, &users.get_instructor(&id).await?)?
        }
        events::CREATE_INSTRUCTOR => {
            let request: CreateUserRequest = payload(with_instructor_role(data)?)?;
            if request.nombre.trim().is_empty() || request.correo_institucional.trim().is_empty() {
                return Err(AppError::ValidationError(INCOMPLETE_DATA.to_string()));
            }
            SocketMessage::from_payload(events::INSTRUCTOR_CREATED, &users.create_instructor(request).await?)?
        }
        events::UPDATE_INSTRUCTOR => {
            let UpdateInstructorPayload { id, changes } = payload(data)?;
            SocketMessage::from_payload(
                events::INSTRUCTOR_UPDATED,
                &users.update_instructor(&id, changes).await?,
            )?
        }
        events::DELETE_INSTRUCTOR => {
            let IdPayload { id } = payload(data)?;
            users.delete_instructor(&id).await?;
            SocketMessage::new(
                events::INSTRUCTOR_DELETED,
                json!({ "id": id, "message": "Instructor eliminado" }),
            )
        }
        events::UPDATE_INSTRUCTOR_STATUS => {
            let InstructorStatusPayload { instructor_id, status } = payload(data)?;
            let (Some(id), Some(status)) = (instructor_id, status) else {
                return Err(AppError::ValidationError(INCOMPLETE_DATA.to_string()));
            };

            let instructor = users.set_instructor_status(&id, &status).await?;
            SocketMessage::new(
                events::STATUS_UPDATE_SUCCESS,
                json!({ "message": STATUS_UPDATED, "instructor": to_value(&instructor)? }),
            )
        }
        _ => return Err(AppError::ValidationError(UNSUPPORTED_EVENT.to_string())),
    };

    Ok(Some(reply))
}

fn payload<T: DeserializeOwned>(data: Value) -> AppResult<T> {
    serde_json::from_value(data).map_err(|e| {
        log::debug!("소켓 페이로드 해석 실패: {}", e);
        AppError::ValidationError(INCOMPLETE_DATA.to_string())
    })
}

/// `create-instructor`는 역할을 보내지 않아도 되므로 강사 역할을 채워 넣습니다.
fn with_instructor_role(data: Value) -> AppResult<Value> {
    match data {
        Value::Object(mut map) => {
            map.insert("rol".to_string(), Value::String("Instructor".to_string()));
            Ok(Value::Object(map))
        }
        _ => Err(AppError::ValidationError(INCOMPLETE_DATA.to_string())),
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value).with_context(|| format!("응답 직렬화 실패 ({})", std::any::type_name::<T>()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::UserResponse;
    use crate::domain::entities::{DocumentType, Role};

    fn instructor_body(documento: &str) -> Value {
        json!({
            "nombre": "Pedro Instructor",
            "tipoDocumento": "CC",
            "documento": documento,
            "correoInstitucional": format!("p{}@sena.edu.co", documento),
            "correoPersonal": format!("p{}@gmail.com", documento),
            "password": "secreto"
        })
    }

    async fn send(state: &AppState, ns: Namespace, event: &str, data: Value) -> SocketMessage {
        dispatch(state, ns, SocketMessage::new(event, data)).await.unwrap()
    }

    #[actix_web::test]
    async fn test_root_status_request() {
        let state = AppState::for_tests();
        let reply = send(&state, Namespace::Root, events::REQUEST_STATUS, Value::Null).await;
        assert_eq!(reply.event, events::API_STATUS);
        assert_eq!(reply.data["status"], "online");
    }

    #[actix_web::test]
    async fn test_create_instructor_forces_role_and_status() {
        let state = AppState::for_tests();
        let mut body = instructor_body("1");
        body["rol"] = json!("Admin");
        body["estadoInstructor"] = json!("aprobado");

        let reply = send(&state, Namespace::Instructors, events::CREATE_INSTRUCTOR, body).await;
        assert_eq!(reply.event, events::INSTRUCTOR_CREATED);
        assert_eq!(reply.data["rol"], "Instructor");
        assert_eq!(reply.data["estadoInstructor"], "pendiente");
    }

    #[actix_web::test]
    async fn test_create_instructor_with_missing_fields() {
        let state = AppState::for_tests();
        let reply = send(&state, Namespace::Instructors, events::CREATE_INSTRUCTOR, json!({ "nombre": "X" })).await;
        assert_eq!(reply.event, events::ERROR);
        assert_eq!(reply.data["message"], INCOMPLETE_DATA);
        assert_eq!(reply.data["event"], events::CREATE_INSTRUCTOR);
    }

    #[actix_web::test]
    async fn test_status_update_round_trip() {
        let state = AppState::for_tests();
        let created = send(&state, Namespace::Instructors, events::CREATE_INSTRUCTOR, instructor_body("1")).await;
        let id = created.data["_id"].as_str().unwrap().to_string();

        let mut rx = state.hub.subscribe(Namespace::Instructors);
        let reply = send(
            &state,
            Namespace::Instructors,
            events::UPDATE_INSTRUCTOR_STATUS,
            json!({ "instructorId": id, "status": "aprobado" }),
        )
        .await;

        assert_eq!(reply.event, events::STATUS_UPDATE_SUCCESS);
        assert_eq!(reply.data["message"], STATUS_UPDATED);
        assert_eq!(reply.data["instructor"]["estadoInstructor"], "aprobado");

        assert_eq!(rx.recv().await.unwrap().event, "user-updated");
        assert_eq!(rx.recv().await.unwrap().event, events::INSTRUCTOR_STATUS_UPDATED);
    }

    #[actix_web::test]
    async fn test_invalid_status_leaves_instructor_unchanged() {
        let state = AppState::for_tests();
        let created = send(&state, Namespace::Instructors, events::CREATE_INSTRUCTOR, instructor_body("1")).await;
        let id = created.data["_id"].as_str().unwrap().to_string();

        let reply = send(
            &state,
            Namespace::Instructors,
            events::UPDATE_INSTRUCTOR_STATUS,
            json!({ "instructorId": id, "status": "suspendido" }),
        )
        .await;
        assert_eq!(reply.event, events::ERROR);
        assert_eq!(reply.data["message"], "Estado no válido");

        let stored = state.users.get(&id).await.unwrap();
        assert_eq!(stored.estado_instructor.map(|s| s.as_str()), Some("pendiente"));
    }

    #[actix_web::test]
    async fn test_status_update_without_ids() {
        let state = AppState::for_tests();
        let reply = send(&state, Namespace::Instructors, events::UPDATE_INSTRUCTOR_STATUS, json!({ "status": "aprobado" })).await;
        assert_eq!(reply.data["message"], INCOMPLETE_DATA);
    }

    #[actix_web::test]
    async fn test_update_instructor_rejects_other_roles() {
        let state = AppState::for_tests();
        let admin: UserResponse = state
            .users
            .create(CreateUserRequest {
                nombre: "Admin".into(),
                tipo_documento: DocumentType::CC,
                documento: "9".into(),
                correo_institucional: "admin@sena.edu.co".into(),
                correo_personal: "admin@gmail.com".into(),
                password: "secreto".into(),
                rol: Role::Admin,
                etiquetas: vec![],
                estado_instructor: None,
            })
            .await
            .unwrap();

        let reply = send(
            &state,
            Namespace::Instructors,
            events::UPDATE_INSTRUCTOR,
            json!({ "id": admin.id, "nombre": "Otro" }),
        )
        .await;
        assert_eq!(reply.data["message"], "El usuario no es un instructor");
    }

    #[actix_web::test]
    async fn test_sync_replies_with_snapshot_and_seq() {
        let state = AppState::for_tests();
        send(&state, Namespace::Instructors, events::CREATE_INSTRUCTOR, instructor_body("1")).await;

        let reply = send(&state, Namespace::Users, events::SYNC, Value::Null).await;
        assert_eq!(reply.event, "users-updated");
        assert_eq!(reply.seq, Some(state.hub.current_seq(Namespace::Users)));
        assert_eq!(reply.data.as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_change_notice_resyncs_whole_namespace() {
        let state = AppState::for_tests();
        let mut rx = state.hub.subscribe(Namespace::Guides);

        let reply = dispatch(&state, Namespace::Guides, SocketMessage::new("guide-updated", Value::Null)).await;
        assert!(reply.is_none());

        let snapshot = rx.recv().await.unwrap();
        assert_eq!(snapshot.event, "guides-updated");
        assert_eq!(snapshot.data, json!([]));
    }

    #[actix_web::test]
    async fn test_replies_carry_request_id() {
        let state = AppState::for_tests();
        let created = send(&state, Namespace::Instructors, events::CREATE_INSTRUCTOR, instructor_body("1")).await;
        let id = created.data["_id"].as_str().unwrap().to_string();

        let ok = send(
            &state,
            Namespace::Instructors,
            events::UPDATE_INSTRUCTOR_STATUS,
            json!({ "instructorId": id, "status": "aprobado", "requestId": 7 }),
        )
        .await;
        assert_eq!(ok.event, events::STATUS_UPDATE_SUCCESS);
        assert_eq!(ok.data["requestId"], 7);

        let failed = send(
            &state,
            Namespace::Instructors,
            events::GET_INSTRUCTOR,
            json!({ "id": "no-es-un-id", "requestId": 8 }),
        )
        .await;
        assert_eq!(failed.event, events::ERROR);
        assert_eq!(failed.data["requestId"], 8);
        assert_eq!(failed.data["event"], events::GET_INSTRUCTOR);

        let plain = send(&state, Namespace::Root, events::REQUEST_STATUS, Value::Null).await;
        assert!(plain.data.get("requestId").is_none());
    }

    #[actix_web::test]
    async fn test_unknown_event() {
        let state = AppState::for_tests();
        let reply = send(&state, Namespace::Activities, "chat-message", Value::Null).await;
        assert_eq!(reply.data["message"], UNSUPPORTED_EVENT);
    }
}
