//! 이벤트 요청 DTO

use chrono::{DateTime, Utc};
use mongodb::bson::DateTime as BsonDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::core::errors::{parse_object_id, AppResult};
use crate::domain::entities::{
    Attachment, Confirmation, Event, EventStatus, EventType, Location, Modality, Participant,
    Reminder,
};
use crate::utils::string_utils::normalize_tags;
use crate::utils::time::to_bson;

/// 참여자 입력 (`usuario`는 사용자 ID 문자열)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInput {
    pub usuario: String,
    #[serde(default)]
    pub confirmacion: Option<Confirmation>,
    #[serde(default)]
    pub fecha_confirmacion: Option<DateTime<Utc>>,
}

impl ParticipantInput {
    fn into_participant(self) -> AppResult<Participant> {
        Ok(Participant {
            usuario: parse_object_id(&self.usuario)?,
            confirmacion: self.confirmacion.unwrap_or_default(),
            fecha_confirmacion: self.fecha_confirmacion.map(to_bson),
        })
    }
}

fn into_participants(inputs: Vec<ParticipantInput>) -> AppResult<Vec<Participant>> {
    inputs.into_iter().map(ParticipantInput::into_participant).collect()
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "El título es requerido"))]
    pub titulo: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "La descripción es requerida"))]
    pub descripcion: String,

    pub tipo: EventType,

    pub modalidad: Modality,

    #[serde(default)]
    pub ubicacion: Location,

    pub fecha: DateTime<Utc>,

    #[serde(default)]
    #[validate(length(min = 1, message = "La hora de inicio es requerida"))]
    pub hora_inicio: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "La hora de fin es requerida"))]
    pub hora_fin: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "El organizador es requerido"))]
    pub organizador: String,

    #[serde(default)]
    pub participantes: Vec<ParticipantInput>,

    #[serde(default)]
    #[validate(range(min = 1, message = "El cupo máximo debe ser mayor que cero"))]
    pub cupo_maximo: Option<u32>,

    #[serde(default)]
    pub etiquetas: Vec<String>,

    #[serde(default)]
    pub documentos: Vec<Attachment>,

    #[serde(default)]
    pub recordatorios: Vec<Reminder>,

    #[serde(default)]
    pub estado: Option<EventStatus>,
}

impl CreateEventRequest {
    pub fn into_entity(self) -> AppResult<Event> {
        let now = BsonDateTime::now();

        Ok(Event {
            id: None,
            titulo: self.titulo,
            descripcion: self.descripcion,
            tipo: self.tipo,
            modalidad: self.modalidad,
            ubicacion: self.ubicacion,
            fecha: to_bson(self.fecha),
            hora_inicio: self.hora_inicio,
            hora_fin: self.hora_fin,
            organizador: parse_object_id(&self.organizador)?,
            participantes: into_participants(self.participantes)?,
            cupo_maximo: self.cupo_maximo,
            etiquetas: normalize_tags(self.etiquetas),
            documentos: self.documentos,
            recordatorios: self.recordatorios,
            estado: self.estado.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, message = "El título es requerido"))]
    pub titulo: Option<String>,
    #[validate(length(min = 1, message = "La descripción es requerida"))]
    pub descripcion: Option<String>,
    pub tipo: Option<EventType>,
    pub modalidad: Option<Modality>,
    pub ubicacion: Option<Location>,
    pub fecha: Option<DateTime<Utc>>,
    pub hora_inicio: Option<String>,
    pub hora_fin: Option<String>,
    pub organizador: Option<String>,
    pub participantes: Option<Vec<ParticipantInput>>,
    #[validate(range(min = 1, message = "El cupo máximo debe ser mayor que cero"))]
    pub cupo_maximo: Option<u32>,
    pub etiquetas: Option<Vec<String>>,
    pub documentos: Option<Vec<Attachment>>,
    pub recordatorios: Option<Vec<Reminder>>,
    pub estado: Option<EventStatus>,
}

impl UpdateEventRequest {
    pub fn apply(self, event: &mut Event) -> AppResult<()> {
        let organizador = self.organizador.as_deref().map(parse_object_id).transpose()?;
        let participantes = self.participantes.map(into_participants).transpose()?;

        if let Some(titulo) = self.titulo {
            event.titulo = titulo;
        }
        if let Some(descripcion) = self.descripcion {
            event.descripcion = descripcion;
        }
        if let Some(tipo) = self.tipo {
            event.tipo = tipo;
        }
        if let Some(modalidad) = self.modalidad {
            event.modalidad = modalidad;
        }
        if let Some(ubicacion) = self.ubicacion {
            event.ubicacion = ubicacion;
        }
        if let Some(fecha) = self.fecha {
            event.fecha = to_bson(fecha);
        }
        if let Some(hora) = self.hora_inicio {
            event.hora_inicio = hora;
        }
        if let Some(hora) = self.hora_fin {
            event.hora_fin = hora;
        }
        if let Some(organizador) = organizador {
            event.organizador = organizador;
        }
        if let Some(participantes) = participantes {
            event.participantes = participantes;
        }
        if let Some(cupo) = self.cupo_maximo {
            event.cupo_maximo = Some(cupo);
        }
        if let Some(etiquetas) = self.etiquetas {
            event.etiquetas = normalize_tags(etiquetas);
        }
        if let Some(documentos) = self.documentos {
            event.documentos = documentos;
        }
        if let Some(recordatorios) = self.recordatorios {
            event.recordatorios = recordatorios;
        }
        if let Some(estado) = self.estado {
            event.estado = estado;
        }
        Ok(())
    }
}

/// `PUT /api/events/{id}/participant/{userId}`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateParticipantRequest {
    pub confirmacion: Confirmation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_create_event_defaults() {
        let body = serde_json::json!({
            "titulo": "Capacitación Rust",
            "descripcion": "Taller de ownership",
            "tipo": "Capacitación",
            "modalidad": "Híbrido",
            "ubicacion": {
                "presencial": { "lugar": "Sala 2", "ciudad": "Bogotá" },
                "virtual": { "plataforma": "Meet", "link": "https://meet.example/abc" }
            },
            "fecha": "2025-05-10T00:00:00Z",
            "horaInicio": "08:00",
            "horaFin": "12:00",
            "organizador": ObjectId::new().to_hex(),
            "participantes": [{ "usuario": ObjectId::new().to_hex() }],
            "recordatorios": [{ "tipo": "email", "tiempo": 30 }]
        });

        let req: CreateEventRequest = serde_json::from_value(body).unwrap();
        assert!(req.validate().is_ok());

        let event = req.into_entity().unwrap();
        assert_eq!(event.estado, EventStatus::Programado);
        assert_eq!(event.participantes[0].confirmacion, Confirmation::Pendiente);
        assert!(event.participantes[0].fecha_confirmacion.is_none());
        assert!(!event.recordatorios[0].enviado);
        assert_eq!(
            event.ubicacion.virtual_location.unwrap().plataforma.as_deref(),
            Some("Meet")
        );
    }

    #[test]
    fn test_invalid_confirmation_fails_to_parse() {
        let raw = serde_json::json!({ "confirmacion": "Quizás" });
        assert!(serde_json::from_value::<UpdateParticipantRequest>(raw).is_err());
    }
}
