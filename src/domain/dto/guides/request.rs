//! 가이드 요청 DTO
//!
//! `versionActual`과 `historialVersiones`는 요청으로 받지 않습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::Deserialize;
use validator::Validate;

use crate::core::errors::{parse_object_id, AppResult};
use crate::domain::entities::{
    Attachment, Guide, GuideCategory, GuideStatus, INITIAL_VERSION,
};
use crate::utils::string_utils::{
    deserialize_optional_string, normalize_tags, validate_required_string,
};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuideRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "El título es requerido"))]
    pub titulo: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "La descripción es requerida"))]
    pub descripcion: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "El contenido es requerido"))]
    pub contenido: String,

    /// 없으면 인증된 요청자가 작성자가 됩니다.
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub autor: Option<String>,

    pub categoria: GuideCategory,

    #[serde(default)]
    pub etiquetas: Vec<String>,

    #[serde(default)]
    pub archivos_adjuntos: Vec<Attachment>,

    #[serde(default)]
    pub estado: Option<GuideStatus>,
}

impl CreateGuideRequest {
    pub fn into_entity(self, caller: ObjectId) -> AppResult<Guide> {
        let autor = match self.autor.as_deref() {
            Some(id) => parse_object_id(id)?,
            None => caller,
        };
        let now = DateTime::now();

        Ok(Guide {
            id: None,
            titulo: validate_required_string(&self.titulo, "titulo")?,
            descripcion: self.descripcion,
            contenido: self.contenido,
            autor,
            categoria: self.categoria,
            etiquetas: normalize_tags(self.etiquetas),
            archivos_adjuntos: self.archivos_adjuntos,
            estado: self.estado.unwrap_or_default(),
            version_actual: INITIAL_VERSION.to_string(),
            historial_versiones: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }
}

/// 가이드 부분 수정
///
/// `cambios`와 `autor`는 본문이 바뀔 때 추가되는 이력 항목에만 쓰이며
/// 가이드 작성자를 바꾸지 않습니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGuideRequest {
    #[validate(length(min = 1, message = "El título es requerido"))]
    pub titulo: Option<String>,
    #[validate(length(min = 1, message = "La descripción es requerida"))]
    pub descripcion: Option<String>,
    #[validate(length(min = 1, message = "El contenido es requerido"))]
    pub contenido: Option<String>,
    pub categoria: Option<GuideCategory>,
    pub etiquetas: Option<Vec<String>>,
    pub archivos_adjuntos: Option<Vec<Attachment>>,
    pub estado: Option<GuideStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub cambios: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub autor: Option<String>,
}

impl UpdateGuideRequest {
    /// 필드를 반영하고 본문 변경으로 새 버전이 생겼는지 반환합니다.
    pub fn apply(self, guide: &mut Guide, caller: ObjectId) -> AppResult<bool> {
        let change_author = match self.autor.as_deref() {
            Some(id) => parse_object_id(id)?,
            None => caller,
        };
        let titulo = self
            .titulo
            .as_deref()
            .map(|t| validate_required_string(t, "titulo"))
            .transpose()?;

        let revised = match self.contenido {
            Some(contenido) => guide.revise_content(contenido, self.cambios, Some(change_author))?,
            None => false,
        };

        if let Some(titulo) = titulo {
            guide.titulo = titulo;
        }
        if let Some(descripcion) = self.descripcion {
            guide.descripcion = descripcion;
        }
        if let Some(categoria) = self.categoria {
            guide.categoria = categoria;
        }
        if let Some(etiquetas) = self.etiquetas {
            guide.etiquetas = normalize_tags(etiquetas);
        }
        if let Some(adjuntos) = self.archivos_adjuntos {
            guide.archivos_adjuntos = adjuntos;
        }
        if let Some(estado) = self.estado {
            guide.estado = estado;
        }

        Ok(revised)
    }
}

/// `PUT /api/guides/{id}/status`
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeGuideStatusRequest {
    pub estado: GuideStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guide() -> Guide {
        let req: CreateGuideRequest = serde_json::from_value(serde_json::json!({
            "titulo": "  Guía de laboratorio  ",
            "descripcion": "Normas",
            "contenido": "Texto inicial",
            "categoria": "Pedagógica",
            "etiquetas": [" seguridad ", "laboratorio"]
        }))
        .unwrap();
        req.into_entity(ObjectId::new()).unwrap()
    }

    #[test]
    fn test_create_trims_and_starts_at_initial_version() {
        let g = guide();
        assert_eq!(g.titulo, "Guía de laboratorio");
        assert_eq!(g.etiquetas, vec!["seguridad".to_string(), "laboratorio".to_string()]);
        assert_eq!(g.version_actual, "1.0.0");
        assert_eq!(g.estado, GuideStatus::Borrador);
    }

    #[test]
    fn test_non_content_update_keeps_version() {
        let mut g = guide();
        let patch = UpdateGuideRequest {
            descripcion: Some("Normas actualizadas".into()),
            ..Default::default()
        };
        assert!(!patch.apply(&mut g, ObjectId::new()).unwrap());
        assert_eq!(g.version_actual, "1.0.0");
        assert!(g.historial_versiones.is_empty());
    }

    #[test]
    fn test_content_update_records_author_and_note() {
        let mut g = guide();
        let original_author = g.autor;
        let editor = ObjectId::new();
        let patch = UpdateGuideRequest {
            contenido: Some("Texto revisado".into()),
            cambios: Some("Se agregó sección de EPP".into()),
            ..Default::default()
        };

        assert!(patch.apply(&mut g, editor).unwrap());
        assert_eq!(g.version_actual, "1.0.1");
        assert_eq!(g.historial_versiones.len(), 1);
        assert_eq!(g.historial_versiones[0].cambios, "Se agregó sección de EPP");
        assert_eq!(g.historial_versiones[0].autor, Some(editor));
        assert_eq!(g.autor, original_author);
    }
}
