//! 이벤트(회의, 교육, 컨퍼런스, 워크숍) 서비스

use std::sync::Arc;

use validator::Validate;

use crate::core::errors::{parse_object_id, AppError, AppResult};
use crate::domain::dto::{
    CreateEventRequest, EventResponse, ParticipantStatusChanged, UpdateEventRequest,
    UpdateParticipantRequest,
};
use crate::domain::entities::Event;
use crate::realtime::{events, BroadcastHub, Change, Namespace};
use crate::repositories::{Entity, Repository};
use crate::services::population::UserDirectory;

pub const EVENT_NOT_FOUND: &str = "Evento no encontrado";
pub const EVENT_DELETED: &str = "Evento eliminado";
pub const PARTICIPANT_NOT_FOUND: &str = "Participante no encontrado en el evento";

pub struct EventService {
    events: Arc<dyn Repository<Event>>,
    directory: UserDirectory,
    hub: Arc<BroadcastHub>,
}

impl EventService {
    pub fn new(events: Arc<dyn Repository<Event>>, directory: UserDirectory, hub: Arc<BroadcastHub>) -> Self {
        Self { events, directory, hub }
    }

    pub async fn list(&self) -> AppResult<Vec<EventResponse>> {
        let events = self.events.find(None).await?;
        let users = self.directory.for_entities(&events).await?;

        Ok(events.into_iter().map(|e| EventResponse::populate(e, &users)).collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<EventResponse> {
        let event = self.load(id).await?;
        self.respond(event).await
    }

    pub async fn create(&self, request: CreateEventRequest) -> AppResult<EventResponse> {
        request.validate()?;

        let created = self.events.insert(request.into_entity()?).await?;
        log::info!("📅 이벤트 생성: {}", created.titulo);

        let response = self.respond(created).await?;
        self.hub.publish_change(Namespace::Events, Change::Created, &response);
        Ok(response)
    }

    pub async fn update(&self, id: &str, changes: UpdateEventRequest) -> AppResult<EventResponse> {
        changes.validate()?;

        let mut event = self.load(id).await?;
        changes.apply(&mut event)?;
        self.save(event).await
    }

    /// 참가자 한 명의 참석 확인 상태를 바꿉니다.
    ///
    /// `fechaConfirmacion`은 기록하지 않습니다.
    pub async fn update_participant(
        &self,
        id: &str,
        user_id: &str,
        request: UpdateParticipantRequest,
    ) -> AppResult<EventResponse> {
        let user_id = parse_object_id(user_id)?;
        let mut event = self.load(id).await?;

        let participant = event
            .participant_mut(&user_id)
            .ok_or_else(|| AppError::NotFound(PARTICIPANT_NOT_FOUND.to_string()))?;
        participant.confirmacion = request.confirmacion;

        let response = self.save(event).await?;
        self.hub.publish(
            Namespace::Events,
            events::PARTICIPANT_STATUS_UPDATED,
            &ParticipantStatusChanged {
                event_id: response.id.clone(),
                user_id: user_id.to_hex(),
                status: request.confirmacion,
            },
        );
        Ok(response)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let object_id = parse_object_id(id)?;
        if !self.events.delete(&object_id).await? {
            return Err(AppError::NotFound(EVENT_NOT_FOUND.to_string()));
        }

        self.hub.publish_change(Namespace::Events, Change::Deleted, &object_id.to_hex());
        Ok(())
    }

    async fn save(&self, mut event: Event) -> AppResult<EventResponse> {
        event.touch();
        if !self.events.replace(&event).await? {
            return Err(AppError::NotFound(EVENT_NOT_FOUND.to_string()));
        }

        let response = self.respond(event).await?;
        self.hub.publish_change(Namespace::Events, Change::Updated, &response);
        Ok(response)
    }

    async fn load(&self, id: &str) -> AppResult<Event> {
        let object_id = parse_object_id(id)?;
        self.events
            .find_by_id(&object_id)
            .await?
            .ok_or_else(|| AppError::NotFound(EVENT_NOT_FOUND.to_string()))
    }

    async fn respond(&self, event: Event) -> AppResult<EventResponse> {
        let users = self.directory.for_entity(&event).await?;
        Ok(EventResponse::populate(event, &users))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;

    use crate::domain::entities::{Confirmation, User};
    use crate::repositories::MemoryRepository;

    fn service() -> (EventService, Arc<BroadcastHub>) {
        let hub = Arc::new(BroadcastHub::new(64));
        let users: Arc<dyn Repository<User>> = Arc::new(MemoryRepository::<User>::new());
        let events: Arc<dyn Repository<Event>> = Arc::new(MemoryRepository::<Event>::new());
        (EventService::new(events, UserDirectory::new(users), hub.clone()), hub)
    }

    #[actix_web::test]
    async fn test_participant_update_publishes_event_and_status_deltas() {
        let (service, hub) = service();
        let mut rx = hub.subscribe(Namespace::Events);
        let participant = ObjectId::new();

        let request: CreateEventRequest = serde_json::from_value(json!({
            "titulo": "Comité técnico",
            "descripcion": "Seguimiento mensual",
            "tipo": "Taller",
            "modalidad": "Virtual",
            "ubicacion": { "virtual": { "plataforma": "Meet", "link": "https://meet.example.com/x" } },
            "fecha": "2025-04-10T00:00:00Z",
            "horaInicio": "14:00",
            "horaFin": "15:00",
            "organizador": ObjectId::new().to_hex(),
            "participantes": [{ "usuario": participant.to_hex() }]
        }))
        .unwrap();
        let created = service.create(request).await.unwrap();

        let updated = service
            .update_participant(
                &created.id,
                &participant.to_hex(),
                UpdateParticipantRequest { confirmacion: Confirmation::Rechazado },
            )
            .await
            .unwrap();
        assert_eq!(updated.participantes[0].confirmacion, Confirmation::Rechazado);

        assert_eq!(rx.recv().await.unwrap().event, "event-created");
        let delta = rx.recv().await.unwrap();
        assert_eq!(delta.event, "event-updated");
        assert_eq!(delta.seq, Some(2));

        let notice = rx.recv().await.unwrap();
        assert_eq!(notice.event, events::PARTICIPANT_STATUS_UPDATED);
        assert_eq!(notice.seq, Some(3));
        assert_eq!(
            notice.data,
            json!({ "eventId": created.id, "userId": participant.to_hex(), "status": "Rechazado" })
        );
    }

    #[actix_web::test]
    async fn test_unknown_participant_publishes_nothing() {
        let (service, hub) = service();
        let err = service
            .update_participant(
                &ObjectId::new().to_hex(),
                &ObjectId::new().to_hex(),
                UpdateParticipantRequest { confirmacion: Confirmation::Confirmado },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(hub.current_seq(Namespace::Events), 0);
    }
}
