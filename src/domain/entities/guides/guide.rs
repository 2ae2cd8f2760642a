//! Guide Entity
//!
//! 교육 가이드 문서입니다. 본문(`contenido`)이 바뀔 때마다
//! `versionActual`의 patch 번호가 1 증가하고 `historialVersiones`에 기록이 추가됩니다.
//! 버전 정보는 서버가 관리하며 클라이언트가 직접 쓸 수 없습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::common::Attachment;
use crate::repositories::{Entity, UserReferences};

pub const INITIAL_VERSION: &str = "1.0.0";
pub const DEFAULT_CHANGE_NOTE: &str = "Actualización de contenido";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuideCategory {
    #[serde(rename = "Técnica")]
    Tecnica,
    #[serde(rename = "Pedagógica")]
    Pedagogica,
    Administrativa,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GuideStatus {
    #[default]
    Borrador,
    Publicada,
    Archivada,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionEntry {
    pub version: String,
    pub fecha: DateTime,
    pub cambios: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autor: Option<ObjectId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub titulo: String,
    pub descripcion: String,
    pub contenido: String,
    pub autor: ObjectId,
    pub categoria: GuideCategory,
    #[serde(default)]
    pub etiquetas: Vec<String>,
    #[serde(default)]
    pub archivos_adjuntos: Vec<Attachment>,
    #[serde(default)]
    pub estado: GuideStatus,
    pub version_actual: String,
    #[serde(default)]
    pub historial_versiones: Vec<VersionEntry>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Guide {
    /// 본문을 교체합니다.
    ///
    /// 새 본문이 기존과 같으면 아무것도 하지 않고 `false`를 반환합니다.
    /// 다르면 patch 버전을 올리고 이력 항목을 정확히 하나 추가합니다.
    pub fn revise_content(
        &mut self,
        contenido: String,
        cambios: Option<String>,
        autor: Option<ObjectId>,
    ) -> AppResult<bool> {
        if contenido == self.contenido {
            return Ok(false);
        }

        let next = bump_patch(&self.version_actual)?;
        let cambios = cambios
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CHANGE_NOTE.to_string());

        self.historial_versiones.push(VersionEntry {
            version: next.clone(),
            fecha: DateTime::now(),
            cambios,
            autor,
        });
        self.version_actual = next;
        self.contenido = contenido;
        Ok(true)
    }
}

/// `major.minor.patch`의 patch를 1 올립니다.
pub fn bump_patch(version: &str) -> AppResult<String> {
    let parts: Vec<u64> = version
        .split('.')
        .map(|p| p.parse::<u64>())
        .collect::<Result<_, _>>()
        .map_err(|_| AppError::InternalError(format!("잘못된 가이드 버전: {}", version)))?;

    match parts.as_slice() {
        [major, minor, patch] => Ok(format!("{}.{}.{}", major, minor, patch + 1)),
        _ => Err(AppError::InternalError(format!("잘못된 가이드 버전: {}", version))),
    }
}

impl Entity for Guide {
    const COLLECTION: &'static str = "guides";

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

impl UserReferences for Guide {
    fn user_refs(&self) -> Vec<ObjectId> {
        std::iter::once(self.autor)
            .chain(self.historial_versiones.iter().filter_map(|v| v.autor))
            .collect()
    }
}
