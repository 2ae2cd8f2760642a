//! REST API 클라이언트
//!
//! 토큰이 설정되어 있으면 모든 요청에 `Authorization: Bearer ...`를 붙이고,
//! 2xx 응답은 JSON으로 역직렬화합니다. 그 외 상태는 서버의 `message`를 담은
//! [`ClientError::Status`]가 됩니다.

use std::sync::RwLock;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::client::ClientError;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            token: RwLock::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(|p| p.into_inner()) = Some(token.into());
    }

    pub fn clear_token(&self) {
        *self.token.write().unwrap_or_else(|p| p.into_inner()) = None;
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(self.request(Method::DELETE, path)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        response.json::<T>().await.map_err(|e| ClientError::Decode(e.to_string()))
    }
}

async fn status_error(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    ClientError::Status {
        status: status.as_u16(),
        message: error_message(&body, status.canonical_reason().unwrap_or("Error")),
    }
}

/// 오류 본문의 `message`, 없으면 본문 전체나 상태 설명
fn error_message(body: &str, fallback: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => json
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string()),
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::client::test_server;
    use crate::core::state::AppState;

    #[test]
    fn test_url_join() {
        let api = ApiClient::new("http://localhost:3000/");
        assert_eq!(api.url("/api/users"), "http://localhost:3000/api/users");
        assert_eq!(api.url("doc"), "http://localhost:3000/doc");
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"message":"Guía no encontrada"}"#, "Not Found"), "Guía no encontrada");
        assert_eq!(error_message(r#"{"error":"x"}"#, "Not Found"), "Not Found");
        assert_eq!(error_message("upstream down", "Bad Gateway"), "upstream down");
        assert_eq!(error_message("", "Bad Gateway"), "Bad Gateway");
    }

    #[actix_web::test]
    async fn test_round_trip_against_running_server() {
        let host = test_server::spawn(AppState::for_tests()).await;
        let api = ApiClient::new(format!("http://{}", host));

        let auth: Value = api
            .post(
                "/api/auth/register",
                &json!({
                    "nombre": "Luis Gómez",
                    "tipoDocumento": "CC",
                    "documento": "808",
                    "correoInstitucional": "luis@sena.edu.co",
                    "correoPersonal": "luis@gmail.com",
                    "password": "secreto",
                    "rol": "EquipoPedagogico"
                }),
            )
            .await
            .unwrap();
        api.set_token(auth["token"].as_str().unwrap());

        let profile: Value = api.get("/api/auth/profile").await.unwrap();
        assert_eq!(profile["correoInstitucional"], "luis@sena.edu.co");

        let missing = api.get::<Value>("/api/guides/000000000000000000000000").await;
        match missing {
            Err(ClientError::Status { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Guía no encontrada");
            }
            other => panic!("unexpected: {:?}", other),
        }

        api.clear_token();
        let denied = api.get::<Value>("/api/auth/profile").await;
        assert!(matches!(denied, Err(ClientError::Status { status: 401, .. })));
    }
}
