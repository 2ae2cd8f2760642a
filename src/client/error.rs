//! 클라이언트 오류

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// 연결 실패, 소켓 쓰기 실패 등 네트워크 계층 오류
    #[error("Error de conexión: {0}")]
    Transport(String),

    /// 서버가 2xx가 아닌 상태로 응답
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Respuesta inválida: {0}")]
    Decode(String),

    #[error("Tiempo de espera agotado ({}ms)", .0.as_millis())]
    Timeout(Duration),

    /// 소켓 `error` 이벤트
    #[error("{0}")]
    Rejected(String),

    /// 소켓이 연결되어 있지 않음
    #[error("Socket no disponible: {0}")]
    Unavailable(String),
}

impl ClientError {
    /// 다른 전송 경로로 다시 시도해도 되는 오류인지 여부
    ///
    /// 서버가 요청을 판정한 경우(`error` 이벤트, 4xx)는 다시 보내도 결과가 같습니다.
    pub fn allows_fallback(&self) -> bool {
        match self {
            ClientError::Transport(_) | ClientError::Timeout(_) | ClientError::Unavailable(_) => true,
            ClientError::Status { status, .. } => *status >= 500,
            ClientError::Decode(_) | ClientError::Rejected(_) => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_classification() {
        assert!(ClientError::Timeout(Duration::from_millis(5000)).allows_fallback());
        assert!(ClientError::Unavailable("cerrado".into()).allows_fallback());
        assert!(ClientError::Transport("reset".into()).allows_fallback());
        assert!(ClientError::Status { status: 503, message: "x".into() }.allows_fallback());

        assert!(!ClientError::Rejected("Estado no válido".into()).allows_fallback());
        assert!(!ClientError::Status { status: 400, message: "x".into() }.allows_fallback());
        assert!(!ClientError::Status { status: 404, message: "x".into() }.allows_fallback());
    }

    #[test]
    fn test_messages() {
        let err = ClientError::Status { status: 404, message: "Usuario no encontrado".into() };
        assert_eq!(err.to_string(), "Usuario no encontrado");
        assert_eq!(
            ClientError::Timeout(Duration::from_millis(5000)).to_string(),
            "Tiempo de espera agotado (5000ms)"
        );
    }
}
