//! # SenaCloud Client
//!
//! 프론트엔드나 다른 서비스가 API를 사용할 때 쓰는 클라이언트 계층입니다.
//!
//! - [`ApiClient`]: REST 호출 (`reqwest`)
//! - [`SocketClient`] / [`NamespaceSocket`]: 네임스페이스별 WebSocket 연결 (`tokio-tungstenite`)
//! - [`NamespaceReplica`]: 스냅샷과 델타로 유지되는 컬렉션 복제본
//! - [`InstructorStatusUpdater`]: 소켓 우선, HTTP 대체 경로의 강사 상태 변경
//!
//! ```rust,ignore
//! let api = Arc::new(ApiClient::new("http://localhost:3000"));
//! let sockets = SocketClient::new("localhost:3000");
//! let instructors = Arc::new(sockets.connect_to_namespace(Namespace::Instructors).await?);
//!
//! let updater = InstructorStatusUpdater::socket_first(instructors, api);
//! let result = updater.update(&id, InstructorStatus::Aprobado).await?;
//! ```

pub mod error;
pub mod http;
pub mod socket;
pub mod replica;
pub mod status_updater;

pub use error::ClientError;
pub use http::ApiClient;
pub use socket::{ListenerId, NamespaceSocket, SocketClient};
pub use replica::{Applied, NamespaceReplica};
pub use status_updater::{
    HttpStatusTransport, InstructorStatusUpdater, SocketStatusTransport, StatusTransport,
    StatusUpdate,
};

/// 클라이언트 테스트용으로 임의 포트에 실제 서버를 띄웁니다.
#[cfg(test)]
pub(crate) mod test_server {
    use actix_web::{rt, App, HttpServer};

    use crate::core::state::AppState;
    use crate::middlewares::AuthMiddleware;
    use crate::routes::configure_app;

    /// `host:port`를 반환합니다.
    pub async fn spawn(state: AppState) -> String {
        let server = HttpServer::new(move || {
            App::new()
                .wrap(AuthMiddleware::optional())
                .configure(configure_app(state.clone()))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        rt::spawn(server.run());
        format!("127.0.0.1:{}", addr.port())
    }
}
