//! 강사 승인 상태 변경 클라이언트
//!
//! 상태 변경은 [`StatusTransport`] 하나로 추상화됩니다. [`InstructorStatusUpdater`]는
//! 주 경로(보통 `/instructors` 소켓)를 제한 시간 안에 시도하고, 시간 초과나 연결
//! 문제일 때만 보조 경로(HTTP `PUT /api/users/{id}/instructor-status`)로 넘어갑니다.
//! 서버가 요청을 거절한 경우(`error` 이벤트, 4xx)는 그대로 반환합니다.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::client::{ApiClient, ClientError, NamespaceSocket};
use crate::domain::dto::UserResponse;
use crate::domain::entities::InstructorStatus;
use crate::realtime::{events, SocketMessage};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

#[async_trait]
pub trait StatusTransport: Send + Sync {
    fn name(&self) -> &'static str;

    async fn update_status(
        &self,
        instructor_id: &str,
        status: InstructorStatus,
    ) -> Result<UserResponse, ClientError>;
}

/// `update-instructor-status` 소켓 이벤트
///
/// 요청마다 `requestId`를 붙이고, 같은 번호가 실린 응답만 받아들입니다.
/// 한 연결에서 여러 변경을 동시에 보내거나 다른 요청의 `error`가 섞여도 응답이 뒤바뀌지 않습니다.
pub struct SocketStatusTransport {
    socket: Arc<NamespaceSocket>,
    next_request: AtomicU64,
}

impl SocketStatusTransport {
    pub fn new(socket: Arc<NamespaceSocket>) -> Self {
        Self {
            socket,
            next_request: AtomicU64::new(1),
        }
    }
}

fn is_status_reply(message: &SocketMessage, request_id: u64) -> bool {
    if message.data["requestId"].as_u64() != Some(request_id) {
        return false;
    }

    message.event == events::STATUS_UPDATE_SUCCESS
        || (message.event == events::ERROR && message.data["event"] == events::UPDATE_INSTRUCTOR_STATUS)
}

#[async_trait]
impl StatusTransport for SocketStatusTransport {
    fn name(&self) -> &'static str {
        "socket"
    }

    async fn update_status(
        &self,
        instructor_id: &str,
        status: InstructorStatus,
    ) -> Result<UserResponse, ClientError> {
        if !self.socket.is_connected() {
            return Err(ClientError::Unavailable("/instructors desconectado".to_string()));
        }

        let request_id = self.next_request.fetch_add(1, Ordering::Relaxed);
        let reply = self.socket.wait_for_match(
            &[events::STATUS_UPDATE_SUCCESS, events::ERROR],
            move |message| is_status_reply(message, request_id),
        );
        self.socket.emit(
            events::UPDATE_INSTRUCTOR_STATUS,
            json!({
                "instructorId": instructor_id,
                "status": status.as_str(),
                "requestId": request_id
            }),
        )?;
        let reply = reply.await?;

        if reply.event == events::ERROR {
            let message = reply.data["message"].as_str().unwrap_or("Error").to_string();
            return Err(ClientError::Rejected(message));
        }

        serde_json::from_value(reply.data["instructor"].clone())
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// `PUT /api/users/{id}/instructor-status`
pub struct HttpStatusTransport {
    api: Arc<ApiClient>,
}

impl HttpStatusTransport {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl StatusTransport for HttpStatusTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn update_status(
        &self,
        instructor_id: &str,
        status: InstructorStatus,
    ) -> Result<UserResponse, ClientError> {
        self.api
            .put(
                &format!("/api/users/{}/instructor-status", instructor_id),
                &json!({ "estadoInstructor": status.as_str() }),
            )
            .await
    }
}

/// 상태 변경 결과와 실제로 사용된 경로
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub instructor: UserResponse,
    pub transport: &'static str,
}

pub struct InstructorStatusUpdater {
    primary: Arc<dyn StatusTransport>,
    fallback: Option<Arc<dyn StatusTransport>>,
    timeout: Duration,
}

impl InstructorStatusUpdater {
    pub fn new(primary: Arc<dyn StatusTransport>, fallback: Option<Arc<dyn StatusTransport>>) -> Self {
        Self {
            primary,
            fallback,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// 소켓 우선, HTTP 대체
    pub fn socket_first(socket: Arc<NamespaceSocket>, api: Arc<ApiClient>) -> Self {
        Self::new(
            Arc::new(SocketStatusTransport::new(socket)),
            Some(Arc::new(HttpStatusTransport::new(api))),
        )
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn update(
        &self,
        instructor_id: &str,
        status: InstructorStatus,
    ) -> Result<StatusUpdate, ClientError> {
        let attempt = tokio::time::timeout(
            self.timeout,
            self.primary.update_status(instructor_id, status),
        )
        .await
        .unwrap_or(Err(ClientError::Timeout(self.timeout)));

        let error = match attempt {
            Ok(instructor) => {
                return Ok(StatusUpdate {
                    instructor,
                    transport: self.primary.name(),
                })
            }
            Err(error) => error,
        };

        let fallback = match &self.fallback {
            Some(fallback) if error.allows_fallback() => fallback,
            _ => return Err(error),
        };

        log::warn!(
            "{} 경로 실패 ({}), {} 경로로 재시도",
            self.primary.name(),
            error,
            fallback.name()
        );

        let instructor = fallback.update_status(instructor_id, status).await?;
        Ok(StatusUpdate {
            instructor,
            transport: fallback.name(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::client::{test_server, SocketClient};
    use crate::core::state::AppState;
    use crate::domain::dto::CreateUserRequest;
    use crate::domain::entities::{DocumentType, Role};
    use crate::realtime::Namespace;

    enum Behavior {
        Succeed,
        Fail(fn() -> ClientError),
        Hang,
    }

    struct FakeTransport {
        name: &'static str,
        behavior: Behavior,
        calls: AtomicUsize,
    }

    impl FakeTransport {
        fn new(name: &'static str, behavior: Behavior) -> Arc<Self> {
            Arc::new(Self { name, behavior, calls: AtomicUsize::new(0) })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn instructor(status: InstructorStatus) -> UserResponse {
        serde_json::from_value(json!({
            "_id": "64b7f0c2a1b2c3d4e5f60718",
            "nombre": "Instructor",
            "tipoDocumento": "CC",
            "documento": "1",
            "correoInstitucional": "i@sena.edu.co",
            "correoPersonal": "i@gmail.com",
            "rol": "Instructor",
            "etiquetas": [],
            "estadoInstructor": status.as_str(),
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[async_trait]
    impl StatusTransport for FakeTransport {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn update_status(
            &self,
            _instructor_id: &str,
            status: InstructorStatus,
        ) -> Result<UserResponse, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                Behavior::Succeed => Ok(instructor(status)),
                Behavior::Fail(make) => Err(make()),
                Behavior::Hang => std::future::pending::<Result<UserResponse, ClientError>>().await,
            }
        }
    }

    fn updater(primary: &Arc<FakeTransport>, fallback: &Arc<FakeTransport>) -> InstructorStatusUpdater {
        InstructorStatusUpdater::new(primary.clone(), Some(fallback.clone()))
            .with_timeout(Duration::from_millis(50))
    }

    #[actix_web::test]
    async fn test_primary_success_skips_fallback() {
        let primary = FakeTransport::new("socket", Behavior::Succeed);
        let fallback = FakeTransport::new("http", Behavior::Succeed);

        let result = updater(&primary, &fallback).update("x", InstructorStatus::Aprobado).await.unwrap();
        assert_eq!(result.transport, "socket");
        assert_eq!(fallback.calls(), 0);
    }

    #[actix_web::test]
    async fn test_timeout_falls_back() {
        let primary = FakeTransport::new("socket", Behavior::Hang);
        let fallback = FakeTransport::new("http", Behavior::Succeed);

        let result = updater(&primary, &fallback).update("x", InstructorStatus::Aprobado).await.unwrap();
        assert_eq!(result.transport, "http");
        assert_eq!(primary.calls(), 1);
        assert_eq!(fallback.calls(), 1);
    }

    #[actix_web::test]
    async fn test_unavailable_falls_back() {
        let primary = FakeTransport::new("socket", Behavior::Fail(|| ClientError::Unavailable("cerrado".into())));
        let fallback = FakeTransport::new("http", Behavior::Succeed);

        let result = updater(&primary, &fallback).update("x", InstructorStatus::Pendiente).await.unwrap();
        assert_eq!(result.transport, "http");
        assert_eq!(result.instructor.estado_instructor, Some(InstructorStatus::Pendiente));
    }

    #[actix_web::test]
    async fn test_rejection_is_final() {
        let primary = FakeTransport::new("socket", Behavior::Fail(|| ClientError::Rejected("Estado no válido".into())));
        let fallback = FakeTransport::new("http", Behavior::Succeed);

        let err = updater(&primary, &fallback).update("x", InstructorStatus::Aprobado).await.unwrap_err();
        assert!(matches!(err, ClientError::Rejected(ref m) if m == "Estado no válido"));
        assert_eq!(fallback.calls(), 0);
    }

    #[actix_web::test]
    async fn test_no_fallback_configured_returns_timeout() {
        let primary = FakeTransport::new("socket", Behavior::Hang);
        let updater = InstructorStatusUpdater::new(primary, None).with_timeout(Duration::from_millis(20));

        let err = updater.update("x", InstructorStatus::Aprobado).await.unwrap_err();
        assert!(matches!(err, ClientError::Timeout(_)));
    }

    async fn create_user(state: &AppState, documento: &str, rol: Role) -> UserResponse {
        state
            .users
            .create(CreateUserRequest {
                nombre: "Carlos Pérez".to_string(),
                tipo_documento: DocumentType::CC,
                documento: documento.to_string(),
                correo_institucional: format!("c{}@sena.edu.co", documento),
                correo_personal: format!("c{}@gmail.com", documento),
                password: "secreto".to_string(),
                rol,
                etiquetas: vec![],
                estado_instructor: None,
            })
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn test_concurrent_updates_on_one_socket_get_their_own_replies() {
        let state = AppState::for_tests();
        let host = test_server::spawn(state.clone()).await;
        let instructor = create_user(&state, "81", Role::Instructor).await;
        let coordinator = create_user(&state, "82", Role::Coordinacion).await;

        let socket = Arc::new(
            SocketClient::new(host)
                .connect_to_namespace(Namespace::Instructors)
                .await
                .unwrap(),
        );
        let transport = SocketStatusTransport::new(socket.clone());

        // 다른 요청의 error가 먼저 도착해도 상태 변경 응답으로 취급하지 않습니다.
        socket.emit(events::GET_INSTRUCTOR, json!({ "id": "no-es-un-id" })).unwrap();

        let (approved, rejected) = tokio::join!(
            transport.update_status(&instructor.id, InstructorStatus::Aprobado),
            transport.update_status(&coordinator.id, InstructorStatus::Aprobado),
        );

        let approved = approved.unwrap();
        assert_eq!(approved.id, instructor.id);
        assert_eq!(approved.estado_instructor, Some(InstructorStatus::Aprobado));
        assert!(matches!(rejected, Err(ClientError::Rejected(ref m)) if m == "El usuario no es un instructor"));

        let stored = state.users.get(&coordinator.id).await.unwrap();
        assert_eq!(stored.estado_instructor, None);
    }

    #[test]
    fn test_status_reply_matching() {
        let success = SocketMessage::new(events::STATUS_UPDATE_SUCCESS, json!({ "requestId": 3 }));
        assert!(is_status_reply(&success, 3));
        assert!(!is_status_reply(&success, 4));

        let own_error = SocketMessage::error("Estado no válido", events::UPDATE_INSTRUCTOR_STATUS)
            .with_request_id(Some(json!(3)));
        assert!(is_status_reply(&own_error, 3));

        let other_error = SocketMessage::error("ID inválido", events::GET_INSTRUCTOR)
            .with_request_id(Some(json!(3)));
        assert!(!is_status_reply(&other_error, 3));
    }

    #[actix_web::test]
    async fn test_socket_then_http_against_running_server() {
        let state = AppState::for_tests();
        let host = test_server::spawn(state.clone()).await;
        let instructor = create_user(&state, "71", Role::Instructor).await;
        let coordinator = create_user(&state, "72", Role::Coordinacion).await;

        let api = Arc::new(ApiClient::new(format!("http://{}", host)));
        let socket = Arc::new(
            SocketClient::new(host)
                .connect_to_namespace(Namespace::Instructors)
                .await
                .unwrap(),
        );
        let updater = InstructorStatusUpdater::socket_first(socket.clone(), api);

        let approved = updater.update(&instructor.id, InstructorStatus::Aprobado).await.unwrap();
        assert_eq!(approved.transport, "socket");
        assert_eq!(approved.instructor.estado_instructor, Some(InstructorStatus::Aprobado));

        let rejected = updater.update(&coordinator.id, InstructorStatus::Aprobado).await.unwrap_err();
        assert!(matches!(rejected, ClientError::Rejected(ref m) if m == "El usuario no es un instructor"));

        socket.disconnect();
        let reverted = updater.update(&instructor.id, InstructorStatus::Pendiente).await.unwrap();
        assert_eq!(reverted.transport, "http");
        assert_eq!(
            state.users.get(&instructor.id).await.unwrap().estado_instructor,
            Some(InstructorStatus::Pendiente)
        );
    }
}
