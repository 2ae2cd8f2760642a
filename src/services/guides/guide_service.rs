//! 가이드 서비스
//!
//! 본문(`contenido`)이 바뀔 때마다 patch 버전을 올리고 이력을 남깁니다.
//! 버전 필드는 서버만 관리하며 요청으로는 바꿀 수 없습니다.

use std::sync::Arc;

use validator::Validate;

use crate::core::errors::{parse_object_id, AppError, AppResult};
use crate::domain::dto::{ChangeGuideStatusRequest, CreateGuideRequest, GuideResponse, UpdateGuideRequest};
use crate::domain::entities::Guide;
use crate::domain::models::AuthenticatedUser;
use crate::realtime::{BroadcastHub, Change, Namespace};
use crate::repositories::{Entity, Repository};
use crate::services::population::UserDirectory;

pub const GUIDE_NOT_FOUND: &str = "Guía no encontrada";
pub const GUIDE_DELETED: &str = "Guía eliminada";

pub struct GuideService {
    guides: Arc<dyn Repository<Guide>>,
    directory: UserDirectory,
    hub: Arc<BroadcastHub>,
}

impl GuideService {
    pub fn new(guides: Arc<dyn Repository<Guide>>, directory: UserDirectory, hub: Arc<BroadcastHub>) -> Self {
        Self { guides, directory, hub }
    }

    pub async fn list(&self) -> AppResult<Vec<GuideResponse>> {
        let guides = self.guides.find(None).await?;
        let users = self.directory.for_entities(&guides).await?;

        Ok(guides.into_iter().map(|g| GuideResponse::populate(g, &users)).collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<GuideResponse> {
        let guide = self.load(id).await?;
        self.respond(guide).await
    }

    /// 작성자는 항상 인증된 호출자입니다.
    pub async fn create(&self, request: CreateGuideRequest, caller: &AuthenticatedUser) -> AppResult<GuideResponse> {
        request.validate()?;

        let guide = request.into_entity(caller.object_id()?)?;
        let created = self.guides.insert(guide).await?;
        log::info!("📘 가이드 생성: {} v{}", created.titulo, created.version_actual);

        let response = self.respond(created).await?;
        self.hub.publish_change(Namespace::Guides, Change::Created, &response);
        Ok(response)
    }

    pub async fn update(
        &self,
        id: &str,
        changes: UpdateGuideRequest,
        caller: &AuthenticatedUser,
    ) -> AppResult<GuideResponse> {
        changes.validate()?;

        let mut guide = self.load(id).await?;
        if changes.apply(&mut guide, caller.object_id()?)? {
            log::info!("📘 가이드 새 버전: {} v{}", guide.titulo, guide.version_actual);
        }

        self.save(guide).await
    }

    pub async fn change_status(&self, id: &str, request: ChangeGuideStatusRequest) -> AppResult<GuideResponse> {
        let mut guide = self.load(id).await?;
        guide.estado = request.estado;
        self.save(guide).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let object_id = parse_object_id(id)?;
        if !self.guides.delete(&object_id).await? {
            return Err(AppError::NotFound(GUIDE_NOT_FOUND.to_string()));
        }

        self.hub.publish_change(Namespace::Guides, Change::Deleted, &object_id.to_hex());
        Ok(())
    }

    async fn save(&self, mut guide: Guide) -> AppResult<GuideResponse> {
        guide.touch();
        if !self.guides.replace(&guide).await? {
            return Err(AppError::NotFound(GUIDE_NOT_FOUND.to_string()));
        }

        let response = self.respond(guide).await?;
        self.hub.publish_change(Namespace::Guides, Change::Updated, &response);
        Ok(response)
    }

    async fn load(&self, id: &str) -> AppResult<Guide> {
        let object_id = parse_object_id(id)?;
        self.guides
            .find_by_id(&object_id)
            .await?
            .ok_or_else(|| AppError::NotFound(GUIDE_NOT_FOUND.to_string()))
    }

    async fn respond(&self, guide: Guide) -> AppResult<GuideResponse> {
        let users = self.directory.for_entity(&guide).await?;
        Ok(GuideResponse::populate(guide, &users))
    }
}
