//! 알림 응답 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::dto::users::{PopulatedUsers, UserResponse};
use crate::domain::entities::{Notification, NotificationType};
use crate::utils::time::to_chrono;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub titulo: String,
    pub mensaje: String,
    pub tipo: NotificationType,
    pub destinatario: Option<UserResponse>,
    pub leida: bool,
    pub fecha_envio: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_lectura: Option<DateTime<Utc>>,
}

impl NotificationResponse {
    pub fn populate(notification: Notification, users: &PopulatedUsers) -> Self {
        Self {
            id: notification.id.map(|id| id.to_hex()).unwrap_or_default(),
            titulo: notification.titulo,
            mensaje: notification.mensaje,
            tipo: notification.tipo,
            destinatario: users.get(&notification.destinatario),
            leida: notification.leida,
            fecha_envio: to_chrono(notification.fecha_envio),
            fecha_lectura: notification.fecha_lectura.map(to_chrono),
        }
    }
}

/// 강사 상태 변경 시 `/notifications`로 보내는 일회성 시스템 알림
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemNotice {
    pub tipo: String,
    pub mensaje: String,
    pub fecha: DateTime<Utc>,
    pub leida: bool,
}

impl SystemNotice {
    pub fn info(mensaje: impl Into<String>) -> Self {
        Self {
            tipo: "info".to_string(),
            mensaje: mensaje.into(),
            fecha: Utc::now(),
            leida: false,
        }
    }
}
