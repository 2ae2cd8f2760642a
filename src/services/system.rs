//! API 상태 및 문서 페이로드
//!
//! `GET /`, `GET /doc` 응답과 루트 네임스페이스의 `api-status`,
//! `api-documentation` 이벤트가 같은 내용을 사용합니다.

use chrono::Utc;
use serde_json::{json, Value};

use crate::core::state::AppState;
use crate::realtime::Namespace;

pub const SERVICE_NAME: &str = "SenaCloud API";

const CONTACT_EMAIL: &str = "soporte@senacloud.com";
const CONTACT_WEBSITE: &str = "https://senacloud.com";

/// `GET /` 및 주기적 `api-status`
pub fn status_report(state: &AppState) -> Value {
    let uptime = state.started_at.elapsed().as_secs();

    json!({
        "status": "online",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.environment.as_str(),
        "timestamp": Utc::now().to_rfc3339(),
        "uptime": {
            "seconds": uptime,
            "minutes": uptime / 60,
            "hours": uptime / 3600,
            "days": uptime / 86400
        },
        "endpoints": {
            "available": [
                { "path": "/", "method": "GET", "description": "Estado de la API" },
                { "path": "/doc", "method": "GET", "description": "Documentación de la API" }
            ]
        },
        "realtime": {
            "enabled": true,
            "technology": "WebSocket",
            "namespaces": state.hub.namespaces(),
            "connections": state.hub.connections()
        },
        "contact": contact()
    })
}

/// 소켓 `request-status`에 대한 짧은 응답
pub fn heartbeat() -> Value {
    json!({ "status": "online", "timestamp": Utc::now().to_rfc3339() })
}

/// `GET /doc` 및 `api-documentation`
pub fn documentation() -> Value {
    let endpoints: Vec<Value> = ENDPOINTS
        .iter()
        .map(|(method, path, description)| {
            json!({ "method": method, "path": path, "description": description })
        })
        .collect();

    let namespaces: Vec<Value> = Namespace::ALL
        .iter()
        .map(|ns| json!({ "path": ns.path(), "events": namespace_events(*ns) }))
        .collect();

    json!({
        "title": "Documentación de la API de SenaCloud",
        "description": "API RESTful para servicios de SenaCloud con notificaciones en tiempo real por WebSocket",
        "version": env!("CARGO_PKG_VERSION"),
        "lastUpdated": Utc::now().to_rfc3339(),
        "authentication": {
            "type": "Bearer JWT",
            "note": "Requerida para crear, modificar o eliminar guías y para /api/auth/profile"
        },
        "endpoints": endpoints,
        "socketNamespaces": namespaces,
        "errorCodes": {
            "200": "OK - Solicitud exitosa",
            "201": "Created - Recurso creado",
            "400": "Bad Request - Datos de entrada inválidos",
            "401": "Unauthorized - Token ausente o inválido",
            "404": "Not Found - Recurso no encontrado",
            "429": "Too Many Requests - Límite de solicitudes excedido",
            "500": "Internal Server Error - Error interno del servidor"
        },
        "contact": contact()
    })
}

fn contact() -> Value {
    json!({
        "email": CONTACT_EMAIL,
        "website": CONTACT_WEBSITE,
        "documentation": "/doc"
    })
}

fn namespace_events(ns: Namespace) -> Vec<String> {
    match ns {
        Namespace::Root => vec![
            "request-status".into(),
            "api-status".into(),
            "request-documentation".into(),
            "api-documentation".into(),
        ],
        Namespace::Instructors => [
            "get-instructors",
            "instructors-list",
            "get-instructor",
            "instructor-data",
            "create-instructor",
            "instructor-created",
            "update-instructor",
            "instructor-updated",
            "delete-instructor",
            "instructor-deleted",
            "update-instructor-status",
            "status-update-success",
            "instructor-status-updated",
            "instructors-updated",
            "sync",
        ]
        .iter()
        .map(|e| e.to_string())
        .collect(),
        other => {
            let resource = other.resource().unwrap_or_default();
            let mut events: Vec<String> = ["created", "updated", "deleted"]
                .iter()
                .map(|suffix| format!("{}-{}", resource, suffix))
                .collect();
            match other {
                Namespace::Events => events.push("participant-status-updated".to_string()),
                Namespace::Notifications => events.push("notification-read".to_string()),
                _ => {}
            }
            if let Some(snapshot) = other.snapshot_event() {
                events.push(snapshot.to_string());
            }
            events.push("sync".to_string());
            events
        }
    }
}

const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("GET", "/", "Estado de la API"),
    ("GET", "/doc", "Documentación de la API"),
    ("POST", "/api/auth/login", "Inicio de sesión con correo institucional o personal"),
    ("POST", "/api/auth/register", "Registro de usuario"),
    ("GET", "/api/auth/profile", "Usuario autenticado"),
    ("GET", "/api/users", "Lista de usuarios (filtro opcional ?rol=)"),
    ("POST", "/api/users", "Crear usuario"),
    ("GET", "/api/users/:id", "Obtener usuario"),
    ("PUT", "/api/users/:id", "Actualizar usuario"),
    ("DELETE", "/api/users/:id", "Eliminar usuario"),
    ("PUT", "/api/users/:id/instructor-status", "Cambiar estado de instructor"),
    ("PUT", "/api/users/:id/etiquetas", "Reemplazar etiquetas"),
    ("GET", "/api/activities", "Lista de actividades"),
    ("POST", "/api/activities", "Crear actividad"),
    ("GET", "/api/activities/:id", "Obtener actividad"),
    ("PUT", "/api/activities/:id", "Actualizar actividad"),
    ("DELETE", "/api/activities/:id", "Eliminar actividad"),
    ("GET", "/api/events", "Lista de eventos"),
    ("POST", "/api/events", "Crear evento"),
    ("GET", "/api/events/:id", "Obtener evento"),
    ("PUT", "/api/events/:id", "Actualizar evento"),
    ("DELETE", "/api/events/:id", "Eliminar evento"),
    ("PUT", "/api/events/:id/participant/:userId", "Confirmación de participante"),
    ("GET", "/api/guides", "Lista de guías"),
    ("POST", "/api/guides", "Crear guía"),
    ("GET", "/api/guides/:id", "Obtener guía"),
    ("PUT", "/api/guides/:id", "Actualizar guía"),
    ("DELETE", "/api/guides/:id", "Eliminar guía"),
    ("PUT", "/api/guides/:id/status", "Cambiar estado de guía"),
    ("GET", "/api/notifications", "Lista de notificaciones"),
    ("POST", "/api/notifications", "Crear notificación"),
    ("GET", "/api/notifications/user/:userId", "Notificaciones de un usuario"),
    ("GET", "/api/notifications/:id", "Obtener notificación"),
    ("PUT", "/api/notifications/:id", "Marcar como leída"),
    ("DELETE", "/api/notifications/:id", "Eliminar notificación"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documentation_lists_every_namespace() {
        let doc = documentation();
        assert_eq!(doc["title"], "Documentación de la API de SenaCloud");
        assert_eq!(doc["socketNamespaces"].as_array().unwrap().len(), Namespace::ALL.len());
        assert_eq!(doc["socketNamespaces"][2]["events"][0], "activity-created");

        let events_ns = doc["socketNamespaces"]
            .as_array()
            .unwrap()
            .iter()
            .find(|ns| ns["path"] == "/events")
            .unwrap();
        assert!(events_ns["events"].as_array().unwrap().contains(&serde_json::json!("participant-status-updated")));
    }

    #[test]
    fn test_status_report_shape() {
        let state = AppState::for_tests();
        let status = status_report(&state);
        assert_eq!(status["status"], "online");
        assert_eq!(status["service"], SERVICE_NAME);
        assert_eq!(status["environment"], "test");
        assert_eq!(status["contact"]["documentation"], "/doc");
        assert_eq!(status["realtime"]["connections"], 0);
    }
}
