//! 가이드 응답 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::dto::users::{PopulatedUsers, UserResponse};
use crate::domain::entities::{Attachment, Guide, GuideCategory, GuideStatus, VersionEntry};
use crate::utils::time::to_chrono;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionEntryResponse {
    pub version: String,
    pub fecha: DateTime<Utc>,
    pub cambios: String,
    pub autor: Option<UserResponse>,
}

impl VersionEntryResponse {
    fn populate(entry: VersionEntry, users: &PopulatedUsers) -> Self {
        Self {
            version: entry.version,
            fecha: to_chrono(entry.fecha),
            cambios: entry.cambios,
            autor: entry.autor.and_then(|id| users.get(&id)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub titulo: String,
    pub descripcion: String,
    pub contenido: String,
    pub autor: Option<UserResponse>,
    pub categoria: GuideCategory,
    pub etiquetas: Vec<String>,
    pub archivos_adjuntos: Vec<Attachment>,
    pub estado: GuideStatus,
    pub version_actual: String,
    pub historial_versiones: Vec<VersionEntryResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GuideResponse {
    pub fn populate(guide: Guide, users: &PopulatedUsers) -> Self {
        Self {
            id: guide.id.map(|id| id.to_hex()).unwrap_or_default(),
            titulo: guide.titulo,
            descripcion: guide.descripcion,
            contenido: guide.contenido,
            autor: users.get(&guide.autor),
            categoria: guide.categoria,
            etiquetas: guide.etiquetas,
            archivos_adjuntos: guide.archivos_adjuntos,
            estado: guide.estado,
            version_actual: guide.version_actual,
            historial_versiones: guide
                .historial_versiones
                .into_iter()
                .map(|v| VersionEntryResponse::populate(v, users))
                .collect(),
            created_at: to_chrono(guide.created_at),
            updated_at: to_chrono(guide.updated_at),
        }
    }
}
