//! Activity Entity
//!
//! 과제, 프로젝트, 평가, 실습 등 교육 활동입니다.
//! 책임자와 참여자는 `users` 컬렉션의 ObjectId 참조이며 조회 시 채워집니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::entities::common::Attachment;
use crate::repositories::{Entity, UserReferences};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityType {
    Tarea,
    Proyecto,
    #[serde(rename = "Evaluación")]
    Evaluacion,
    #[serde(rename = "Práctica")]
    Practica,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActivityStatus {
    #[default]
    Pendiente,
    #[serde(rename = "En Progreso")]
    EnProgreso,
    Completada,
    Cancelada,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub titulo: String,
    pub descripcion: String,
    pub tipo: ActivityType,
    #[serde(default)]
    pub estado: ActivityStatus,
    pub fecha_inicio: DateTime,
    pub fecha_fin: DateTime,
    pub responsable: ObjectId,
    #[serde(default)]
    pub participantes: Vec<ObjectId>,
    #[serde(default)]
    pub etiquetas: Vec<String>,
    #[serde(default)]
    pub archivos_adjuntos: Vec<Attachment>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Entity for Activity {
    const COLLECTION: &'static str = "activities";

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

impl UserReferences for Activity {
    fn user_refs(&self) -> Vec<ObjectId> {
        let mut refs = Vec::with_capacity(self.participantes.len() + 1);
        refs.push(self.responsable);
        refs.extend(self.participantes.iter().copied());
        refs
    }
}
