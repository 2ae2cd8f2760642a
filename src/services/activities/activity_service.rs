//! 활동(과제, 프로젝트, 평가, 실습) 서비스

use std::sync::Arc;

use validator::Validate;

use crate::core::errors::{parse_object_id, AppError, AppResult};
use crate::domain::dto::{ActivityResponse, CreateActivityRequest, UpdateActivityRequest};
use crate::domain::entities::Activity;
use crate::realtime::{BroadcastHub, Change, Namespace};
use crate::repositories::{Entity, Repository};
use crate::services::population::UserDirectory;

pub const ACTIVITY_NOT_FOUND: &str = "Actividad no encontrada";
pub const ACTIVITY_DELETED: &str = "Actividad eliminada";

pub struct ActivityService {
    activities: Arc<dyn Repository<Activity>>,
    directory: UserDirectory,
    hub: Arc<BroadcastHub>,
}

impl ActivityService {
    pub fn new(
        activities: Arc<dyn Repository<Activity>>,
        directory: UserDirectory,
        hub: Arc<BroadcastHub>,
    ) -> Self {
        Self { activities, directory, hub }
    }

    pub async fn list(&self) -> AppResult<Vec<ActivityResponse>> {
        let activities = self.activities.find(None).await?;
        let users = self.directory.for_entities(&activities).await?;

        Ok(activities
            .into_iter()
            .map(|a| ActivityResponse::populate(a, &users))
            .collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<ActivityResponse> {
        let activity = self.load(id).await?;
        self.respond(activity).await
    }

    pub async fn create(&self, request: CreateActivityRequest) -> AppResult<ActivityResponse> {
        request.validate()?;

        let created = self.activities.insert(request.into_entity()?).await?;
        log::info!("📝 활동 생성: {}", created.titulo);

        let response = self.respond(created).await?;
        self.hub.publish_change(Namespace::Activities, Change::Created, &response);
        Ok(response)
    }

    pub async fn update(&self, id: &str, changes: UpdateActivityRequest) -> AppResult<ActivityResponse> {
        changes.validate()?;

        let mut activity = self.load(id).await?;
        changes.apply(&mut activity)?;
        activity.touch();

        if !self.activities.replace(&activity).await? {
            return Err(AppError::NotFound(ACTIVITY_NOT_FOUND.to_string()));
        }

        let response = self.respond(activity).await?;
        self.hub.publish_change(Namespace::Activities, Change::Updated, &response);
        Ok(response)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let object_id = parse_object_id(id)?;
        if !self.activities.delete(&object_id).await? {
            return Err(AppError::NotFound(ACTIVITY_NOT_FOUND.to_string()));
        }

        self.hub.publish_change(Namespace::Activities, Change::Deleted, &object_id.to_hex());
        Ok(())
    }

    async fn load(&self, id: &str) -> AppResult<Activity> {
        let object_id = parse_object_id(id)?;
        self.activities
            .find_by_id(&object_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ACTIVITY_NOT_FOUND.to_string()))
    }

    async fn respond(&self, activity: Activity) -> AppResult<ActivityResponse> {
        let users = self.directory.for_entity(&activity).await?;
        Ok(ActivityResponse::populate(activity, &users))
    }
}
