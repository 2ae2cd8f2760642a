//! 알림 서비스

use std::sync::Arc;

use mongodb::bson::{doc, DateTime};
use validator::Validate;

use crate::core::errors::{parse_object_id, AppError, AppResult};
use crate::domain::dto::{CreateNotificationRequest, NotificationResponse};
use crate::domain::entities::Notification;
use crate::realtime::{events, BroadcastHub, Change, Namespace};
use crate::repositories::{FieldFilter, Repository};
use crate::services::population::UserDirectory;

pub const NOTIFICATION_NOT_FOUND: &str = "Notificación no encontrada";
pub const NOTIFICATION_DELETED: &str = "Notificación eliminada";

pub struct NotificationService {
    notifications: Arc<dyn Repository<Notification>>,
    directory: UserDirectory,
    hub: Arc<BroadcastHub>,
}

impl NotificationService {
    pub fn new(
        notifications: Arc<dyn Repository<Notification>>,
        directory: UserDirectory,
        hub: Arc<BroadcastHub>,
    ) -> Self {
        Self { notifications, directory, hub }
    }

    pub async fn list(&self) -> AppResult<Vec<NotificationResponse>> {
        let notifications = self.notifications.find(None).await?;
        self.respond_many(notifications).await
    }

    /// 수신자 기준 조회
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<NotificationResponse>> {
        let filter = FieldFilter::eq("destinatario", parse_object_id(user_id)?);
        let notifications = self.notifications.find(Some(&filter)).await?;
        self.respond_many(notifications).await
    }

    pub async fn get(&self, id: &str) -> AppResult<NotificationResponse> {
        let object_id = parse_object_id(id)?;
        let notification = self
            .notifications
            .find_by_id(&object_id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOTIFICATION_NOT_FOUND.to_string()))?;
        self.respond(notification).await
    }

    pub async fn create(&self, request: CreateNotificationRequest) -> AppResult<NotificationResponse> {
        request.validate()?;

        let created = self.notifications.insert(request.into_entity()?).await?;
        log::info!("🔔 알림 생성: {}", created.titulo);

        let response = self.respond(created).await?;
        self.hub.publish_change(Namespace::Notifications, Change::Created, &response);
        Ok(response)
    }

    /// 읽음 처리 (`leida = true`, `fechaLectura = now`)
    pub async fn mark_read(&self, id: &str) -> AppResult<NotificationResponse> {
        let object_id = parse_object_id(id)?;
        let updated = self
            .notifications
            .set_fields(&object_id, doc! { "leida": true, "fechaLectura": DateTime::now() })
            .await?
            .ok_or_else(|| AppError::NotFound(NOTIFICATION_NOT_FOUND.to_string()))?;

        let response = self.respond(updated).await?;
        self.hub.publish(Namespace::Notifications, events::NOTIFICATION_READ, &response);
        Ok(response)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let object_id = parse_object_id(id)?;
        if !self.notifications.delete(&object_id).await? {
            return Err(AppError::NotFound(NOTIFICATION_NOT_FOUND.to_string()));
        }

        self.hub.publish_change(Namespace::Notifications, Change::Deleted, &object_id.to_hex());
        Ok(())
    }

    async fn respond(&self, notification: Notification) -> AppResult<NotificationResponse> {
        let users = self.directory.for_entity(&notification).await?;
        Ok(NotificationResponse::populate(notification, &users))
    }

    async fn respond_many(&self, notifications: Vec<Notification>) -> AppResult<Vec<NotificationResponse>> {
        let users = self.directory.for_entities(&notifications).await?;
        Ok(notifications
            .into_iter()
            .map(|n| NotificationResponse::populate(n, &users))
            .collect())
    }
}
