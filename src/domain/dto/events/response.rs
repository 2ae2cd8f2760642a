//! 이벤트 응답 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::dto::users::{PopulatedUsers, UserResponse};
use crate::domain::entities::{
    Attachment, Confirmation, Event, EventStatus, EventType, Location, Modality, Participant,
    Reminder,
};
use crate::utils::time::to_chrono;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub usuario: Option<UserResponse>,
    pub confirmacion: Confirmation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_confirmacion: Option<DateTime<Utc>>,
}

impl ParticipantResponse {
    fn populate(participant: Participant, users: &PopulatedUsers) -> Self {
        Self {
            usuario: users.get(&participant.usuario),
            confirmacion: participant.confirmacion,
            fecha_confirmacion: participant.fecha_confirmacion.map(to_chrono),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub titulo: String,
    pub descripcion: String,
    pub tipo: EventType,
    pub modalidad: Modality,
    pub ubicacion: Location,
    pub fecha: DateTime<Utc>,
    pub hora_inicio: String,
    pub hora_fin: String,
    pub organizador: Option<UserResponse>,
    pub participantes: Vec<ParticipantResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cupo_maximo: Option<u32>,
    pub etiquetas: Vec<String>,
    pub documentos: Vec<Attachment>,
    pub recordatorios: Vec<Reminder>,
    pub estado: EventStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventResponse {
    pub fn populate(event: Event, users: &PopulatedUsers) -> Self {
        Self {
            id: event.id.map(|id| id.to_hex()).unwrap_or_default(),
            titulo: event.titulo,
            descripcion: event.descripcion,
            tipo: event.tipo,
            modalidad: event.modalidad,
            ubicacion: event.ubicacion,
            fecha: to_chrono(event.fecha),
            hora_inicio: event.hora_inicio,
            hora_fin: event.hora_fin,
            organizador: users.get(&event.organizador),
            participantes: event
                .participantes
                .into_iter()
                .map(|p| ParticipantResponse::populate(p, users))
                .collect(),
            cupo_maximo: event.cupo_maximo,
            etiquetas: event.etiquetas,
            documentos: event.documentos,
            recordatorios: event.recordatorios,
            estado: event.estado,
            created_at: to_chrono(event.created_at),
            updated_at: to_chrono(event.updated_at),
        }
    }
}

/// `participant-status-updated` 브로드캐스트 페이로드
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStatusChanged {
    pub event_id: String,
    pub user_id: String,
    pub status: Confirmation,
}
