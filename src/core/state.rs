//! # Application State
//!
//! 서비스 인스턴스를 한 번 생성해 actix에 `web::Data<AppState>`로 넘깁니다.
//! 전역 레지스트리 없이 생성자 주입만 사용하므로 테스트는
//! [`Stores::memory`]로 독립된 상태를 만들 수 있습니다.
//!
//! ```rust,ignore
//! let stores = Stores::mongo(&database);
//! stores.ensure_indexes().await?;
//! let state = AppState::new(stores, AppSettings::from_env());
//!
//! HttpServer::new(move || App::new().app_data(web::Data::new(state.clone())))
//! ```

use std::sync::Arc;
use std::time::Instant;

use crate::config::{Environment, JwtConfig, PasswordConfig, RealtimeConfig, StoreBackend};
use crate::core::errors::AppResult;
use crate::db::Database;
use crate::domain::entities::{Activity, Event, Guide, Notification, User};
use crate::realtime::BroadcastHub;
use crate::repositories::{MemoryRepository, MongoRepository, Repository};
use crate::services::{
    ActivityService, AuthService, EventService, GuideService, NotificationService, TokenService,
    UserDirectory, UserService,
};

/// 컬렉션별 리포지토리 묶음
#[derive(Clone)]
pub struct Stores {
    pub backend: StoreBackend,
    pub users: Arc<dyn Repository<User>>,
    pub activities: Arc<dyn Repository<Activity>>,
    pub events: Arc<dyn Repository<Event>>,
    pub guides: Arc<dyn Repository<Guide>>,
    pub notifications: Arc<dyn Repository<Notification>>,
}

impl Stores {
    pub fn mongo(database: &Database) -> Self {
        Self {
            backend: StoreBackend::Mongo,
            users: Arc::new(MongoRepository::<User>::new(database)),
            activities: Arc::new(MongoRepository::<Activity>::new(database)),
            events: Arc::new(MongoRepository::<Event>::new(database)),
            guides: Arc::new(MongoRepository::<Guide>::new(database)),
            notifications: Arc::new(MongoRepository::<Notification>::new(database)),
        }
    }

    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            users: Arc::new(MemoryRepository::<User>::new()),
            activities: Arc::new(MemoryRepository::<Activity>::new()),
            events: Arc::new(MemoryRepository::<Event>::new()),
            guides: Arc::new(MemoryRepository::<Guide>::new()),
            notifications: Arc::new(MemoryRepository::<Notification>::new()),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.users.ensure_indexes().await?;
        self.activities.ensure_indexes().await?;
        self.events.ensure_indexes().await?;
        self.guides.ensure_indexes().await?;
        self.notifications.ensure_indexes().await
    }
}

/// 상태 생성에 필요한 값
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub environment: Environment,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub bcrypt_cost: u32,
    pub channel_capacity: usize,
}

impl AppSettings {
    pub fn from_env() -> Self {
        Self {
            environment: Environment::current(),
            jwt_secret: JwtConfig::secret(),
            jwt_expiration_hours: JwtConfig::expiration_hours(),
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
            channel_capacity: RealtimeConfig::channel_capacity(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub auth: Arc<AuthService>,
    pub tokens: Arc<TokenService>,
    pub activities: Arc<ActivityService>,
    pub events: Arc<EventService>,
    pub guides: Arc<GuideService>,
    pub notifications: Arc<NotificationService>,
    pub hub: Arc<BroadcastHub>,
    pub environment: Environment,
    pub backend: StoreBackend,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(stores: Stores, settings: AppSettings) -> Self {
        let hub = Arc::new(BroadcastHub::new(settings.channel_capacity));
        let directory = UserDirectory::new(stores.users.clone());

        let tokens = Arc::new(TokenService::new(settings.jwt_secret, settings.jwt_expiration_hours));
        let users = Arc::new(UserService::new(stores.users.clone(), hub.clone(), settings.bcrypt_cost));
        let auth = Arc::new(AuthService::new(users.clone(), tokens.clone()));

        Self {
            activities: Arc::new(ActivityService::new(stores.activities, directory.clone(), hub.clone())),
            events: Arc::new(EventService::new(stores.events, directory.clone(), hub.clone())),
            guides: Arc::new(GuideService::new(stores.guides, directory.clone(), hub.clone())),
            notifications: Arc::new(NotificationService::new(stores.notifications, directory, hub.clone())),
            users,
            auth,
            tokens,
            hub,
            environment: settings.environment,
            backend: stores.backend,
            started_at: Instant::now(),
        }
    }

    /// 메모리 저장소와 낮은 bcrypt 비용을 사용하는 테스트용 상태
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(
            Stores::memory(),
            AppSettings {
                environment: Environment::Test,
                jwt_secret: "secreto-de-prueba".to_string(),
                jwt_expiration_hours: 24,
                bcrypt_cost: 4,
                channel_capacity: 256,
            },
        )
    }
}
