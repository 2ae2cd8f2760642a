//! 사용자 참조 채우기
//!
//! 여러 엔티티가 가리키는 사용자를 한 번의 `find_by_ids` 조회로 모읍니다.

use std::collections::BTreeSet;
use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppResult;
use crate::domain::dto::PopulatedUsers;
use crate::domain::entities::User;
use crate::repositories::{Repository, UserReferences};

#[derive(Clone)]
pub struct UserDirectory {
    users: Arc<dyn Repository<User>>,
}

impl UserDirectory {
    pub fn new(users: Arc<dyn Repository<User>>) -> Self {
        Self { users }
    }

    pub async fn resolve(&self, ids: impl IntoIterator<Item = ObjectId>) -> AppResult<PopulatedUsers> {
        let ids: Vec<ObjectId> = ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        if ids.is_empty() {
            return Ok(PopulatedUsers::default());
        }

        let users = self.users.find_by_ids(&ids).await?;
        Ok(PopulatedUsers::new(users))
    }

    pub async fn for_entities<E: UserReferences>(&self, entities: &[E]) -> AppResult<PopulatedUsers> {
        self.resolve(entities.iter().flat_map(UserReferences::user_refs)).await
    }

    pub async fn for_entity<E: UserReferences>(&self, entity: &E) -> AppResult<PopulatedUsers> {
        self.resolve(entity.user_refs()).await
    }
}
