//! Event Entity
//!
//! 회의, 교육, 컨퍼런스, 워크숍 등 일정 이벤트입니다.
//! 참여자 목록은 사용자 참조와 참석 확인 상태를 함께 보관합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::entities::common::Attachment;
use crate::repositories::{Entity, UserReferences};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "Reunión")]
    Reunion,
    #[serde(rename = "Capacitación")]
    Capacitacion,
    Conferencia,
    Taller,
    Otro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modality {
    Presencial,
    Virtual,
    #[serde(rename = "Híbrido")]
    Hibrido,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Confirmation {
    #[default]
    Pendiente,
    Confirmado,
    Rechazado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EventStatus {
    #[default]
    Programado,
    #[serde(rename = "En Curso")]
    EnCurso,
    Finalizado,
    Cancelado,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InPersonLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lugar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ciudad: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plataforma: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrucciones: Option<String>,
}

/// 대면/온라인 장소. 하이브리드 이벤트는 둘 다 가질 수 있습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presencial: Option<InPersonLocation>,
    #[serde(rename = "virtual", default, skip_serializing_if = "Option::is_none")]
    pub virtual_location: Option<VirtualLocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub usuario: ObjectId,
    #[serde(default)]
    pub confirmacion: Confirmation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_confirmacion: Option<DateTime>,
}

/// 알림 예약 (`tiempo`는 이벤트 전 분 단위)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiempo: Option<u32>,
    #[serde(default)]
    pub enviado: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub titulo: String,
    pub descripcion: String,
    pub tipo: EventType,
    pub modalidad: Modality,
    #[serde(default)]
    pub ubicacion: Location,
    pub fecha: DateTime,
    pub hora_inicio: String,
    pub hora_fin: String,
    pub organizador: ObjectId,
    #[serde(default)]
    pub participantes: Vec<Participant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cupo_maximo: Option<u32>,
    #[serde(default)]
    pub etiquetas: Vec<String>,
    #[serde(default)]
    pub documentos: Vec<Attachment>,
    #[serde(default)]
    pub recordatorios: Vec<Reminder>,
    #[serde(default)]
    pub estado: EventStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Event {
    pub fn participant_mut(&mut self, user_id: &ObjectId) -> Option<&mut Participant> {
        self.participantes.iter_mut().find(|p| &p.usuario == user_id)
    }
}

impl Entity for Event {
    const COLLECTION: &'static str = "events";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }
}

impl UserReferences for Event {
    fn user_refs(&self) -> Vec<ObjectId> {
        std::iter::once(self.organizador)
            .chain(self.participantes.iter().map(|p| p.usuario))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_uses_virtual_key() {
        let location = Location {
            presencial: None,
            virtual_location: Some(VirtualLocation {
                plataforma: Some("Teams".to_string()),
                ..Default::default()
            }),
        };
        let json = serde_json::to_value(&location).unwrap();
        assert_eq!(json["virtual"]["plataforma"], "Teams");
    }

    #[test]
    fn test_accented_enum_values() {
        assert_eq!(serde_json::to_value(EventType::Reunion).unwrap(), "Reunión");
        assert_eq!(serde_json::to_value(Modality::Hibrido).unwrap(), "Híbrido");
        assert_eq!(serde_json::to_value(EventStatus::EnCurso).unwrap(), "En Curso");
    }
}
