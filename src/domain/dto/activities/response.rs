//! 활동 응답 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::dto::users::{PopulatedUsers, UserResponse};
use crate::domain::entities::{Activity, ActivityStatus, ActivityType, Attachment};
use crate::utils::time::to_chrono;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub titulo: String,
    pub descripcion: String,
    pub tipo: ActivityType,
    pub estado: ActivityStatus,
    pub fecha_inicio: DateTime<Utc>,
    pub fecha_fin: DateTime<Utc>,
    pub responsable: Option<UserResponse>,
    pub participantes: Vec<UserResponse>,
    pub etiquetas: Vec<String>,
    pub archivos_adjuntos: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ActivityResponse {
    pub fn populate(activity: Activity, users: &PopulatedUsers) -> Self {
        Self {
            id: activity.id.map(|id| id.to_hex()).unwrap_or_default(),
            titulo: activity.titulo,
            descripcion: activity.descripcion,
            tipo: activity.tipo,
            estado: activity.estado,
            fecha_inicio: to_chrono(activity.fecha_inicio),
            fecha_fin: to_chrono(activity.fecha_fin),
            responsable: users.get(&activity.responsable),
            participantes: users.many(&activity.participantes),
            etiquetas: activity.etiquetas,
            archivos_adjuntos: activity.archivos_adjuntos,
            created_at: to_chrono(activity.created_at),
            updated_at: to_chrono(activity.updated_at),
        }
    }
}
