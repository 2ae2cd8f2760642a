//! 활동 요청 DTO

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::core::errors::{parse_object_id, AppResult};
use crate::domain::dto::validators::parse_object_ids;
use crate::domain::entities::{Activity, ActivityStatus, ActivityType, Attachment};
use crate::utils::string_utils::normalize_tags;
use crate::utils::time::to_bson;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "El título es requerido"))]
    pub titulo: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "La descripción es requerida"))]
    pub descripcion: String,

    pub tipo: ActivityType,

    #[serde(default)]
    pub estado: Option<ActivityStatus>,

    pub fecha_inicio: DateTime<Utc>,

    pub fecha_fin: DateTime<Utc>,

    #[serde(default)]
    #[validate(length(min = 1, message = "El responsable es requerido"))]
    pub responsable: String,

    #[serde(default)]
    pub participantes: Vec<String>,

    #[serde(default)]
    pub etiquetas: Vec<String>,

    #[serde(default)]
    pub archivos_adjuntos: Vec<Attachment>,
}

impl CreateActivityRequest {
    pub fn into_entity(self) -> AppResult<Activity> {
        let now = mongodb::bson::DateTime::now();

        Ok(Activity {
            id: None,
            titulo: self.titulo,
            descripcion: self.descripcion,
            tipo: self.tipo,
            estado: self.estado.unwrap_or_default(),
            fecha_inicio: to_bson(self.fecha_inicio),
            fecha_fin: to_bson(self.fecha_fin),
            responsable: parse_object_id(&self.responsable)?,
            participantes: parse_object_ids(&self.participantes)?,
            etiquetas: normalize_tags(self.etiquetas),
            archivos_adjuntos: self.archivos_adjuntos,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityRequest {
    #[validate(length(min = 1, message = "El título es requerido"))]
    pub titulo: Option<String>,
    #[validate(length(min = 1, message = "La descripción es requerida"))]
    pub descripcion: Option<String>,
    pub tipo: Option<ActivityType>,
    pub estado: Option<ActivityStatus>,
    pub fecha_inicio: Option<DateTime<Utc>>,
    pub fecha_fin: Option<DateTime<Utc>>,
    pub responsable: Option<String>,
    pub participantes: Option<Vec<String>>,
    pub etiquetas: Option<Vec<String>>,
    pub archivos_adjuntos: Option<Vec<Attachment>>,
}

impl UpdateActivityRequest {
    /// 참조 ID를 먼저 모두 검증한 뒤 필드를 반영합니다.
    pub fn apply(self, activity: &mut Activity) -> AppResult<()> {
        let responsable = self.responsable.as_deref().map(parse_object_id).transpose()?;
        let participantes = self.participantes.as_deref().map(parse_object_ids).transpose()?;

        if let Some(titulo) = self.titulo {
            activity.titulo = titulo;
        }
        if let Some(descripcion) = self.descripcion {
            activity.descripcion = descripcion;
        }
        if let Some(tipo) = self.tipo {
            activity.tipo = tipo;
        }
        if let Some(estado) = self.estado {
            activity.estado = estado;
        }
        if let Some(inicio) = self.fecha_inicio {
            activity.fecha_inicio = to_bson(inicio);
        }
        if let Some(fin) = self.fecha_fin {
            activity.fecha_fin = to_bson(fin);
        }
        if let Some(responsable) = responsable {
            activity.responsable = responsable;
        }
        if let Some(participantes) = participantes {
            activity.participantes = participantes;
        }
        if let Some(etiquetas) = self.etiquetas {
            activity.etiquetas = normalize_tags(etiquetas);
        }
        if let Some(adjuntos) = self.archivos_adjuntos {
            activity.archivos_adjuntos = adjuntos;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn create_body() -> serde_json::Value {
        serde_json::json!({
            "titulo": "Proyecto final",
            "descripcion": "Entrega del módulo",
            "tipo": "Evaluación",
            "fechaInicio": "2025-03-01T08:00:00Z",
            "fechaFin": "2025-03-15T18:00:00Z",
            "responsable": ObjectId::new().to_hex(),
            "participantes": [ObjectId::new().to_hex()]
        })
    }

    #[test]
    fn test_create_defaults_to_pendiente() {
        let req: CreateActivityRequest = serde_json::from_value(create_body()).unwrap();
        assert!(req.validate().is_ok());
        let activity = req.into_entity().unwrap();
        assert_eq!(activity.estado, ActivityStatus::Pendiente);
        assert_eq!(activity.tipo, ActivityType::Evaluacion);
        assert_eq!(activity.participantes.len(), 1);
    }

    #[test]
    fn test_bad_reference_is_rejected() {
        let mut body = create_body();
        body["responsable"] = "nope".into();
        let req: CreateActivityRequest = serde_json::from_value(body).unwrap();
        assert!(req.into_entity().is_err());
    }

    #[test]
    fn test_update_with_bad_reference_leaves_entity_untouched() {
        let req: CreateActivityRequest = serde_json::from_value(create_body()).unwrap();
        let mut activity = req.into_entity().unwrap();

        let patch = UpdateActivityRequest {
            titulo: Some("Otro".into()),
            responsable: Some("nope".into()),
            ..Default::default()
        };
        assert!(patch.apply(&mut activity).is_err());
        assert_eq!(activity.titulo, "Proyecto final");
    }
}
