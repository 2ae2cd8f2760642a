//! 알림 요청 DTO

use mongodb::bson::DateTime;
use serde::Deserialize;
use validator::Validate;

use crate::core::errors::{parse_object_id, AppResult};
use crate::domain::entities::{Notification, NotificationType};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "El título es requerido"))]
    pub titulo: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "El mensaje es requerido"))]
    pub mensaje: String,

    pub tipo: NotificationType,

    #[serde(default)]
    #[validate(length(min = 1, message = "El destinatario es requerido"))]
    pub destinatario: String,
}

impl CreateNotificationRequest {
    pub fn into_entity(self) -> AppResult<Notification> {
        Ok(Notification {
            id: None,
            titulo: self.titulo,
            mensaje: self.mensaje,
            tipo: self.tipo,
            destinatario: parse_object_id(&self.destinatario)?,
            leida: false,
            fecha_envio: DateTime::now(),
            fecha_lectura: None,
        })
    }
}
