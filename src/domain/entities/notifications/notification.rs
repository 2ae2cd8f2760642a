//! Notification Entity

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::repositories::{Entity, UserReferences};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationType {
    Info,
    Advertencia,
    Error,
    #[serde(rename = "Éxito")]
    Exito,
}

/// 사용자에게 전달되는 알림
///
/// 생성 시 `leida = false`, `fechaEnvio = now`이며 읽음 처리 시 `fechaLectura`가 기록됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub titulo: String,
    pub mensaje: String,
    pub tipo: NotificationType,
    pub destinatario: ObjectId,
    #[serde(default)]
    pub leida: bool,
    pub fecha_envio: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_lectura: Option<DateTime>,
}

impl Entity for Notification {
    const COLLECTION: &'static str = "notifications";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }
}

impl UserReferences for Notification {
    fn user_refs(&self) -> Vec<ObjectId> {
        vec![self.destinatario]
    }
}
