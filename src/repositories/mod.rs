//! # Repository Layer
//!
//! 컬렉션별 데이터 액세스 계약과 두 가지 구현을 제공합니다.
//!
//! - [`MongoRepository`] - MongoDB 컬렉션 위에서 동작하는 운영용 구현
//! - [`MemoryRepository`] - 프로세스 메모리에 보관하는 구현 (테스트, DB 없는 개발 환경)
//!
//! 서비스 계층은 `Arc<dyn Repository<T>>`만 알고 있으므로
//! 저장소 종류는 시작 시점에 한 번 결정됩니다.
//!
//! ## 고유 제약
//!
//! [`Entity::UNIQUE_FIELDS`]에 선언된 필드는 두 구현 모두에서 고유성이 보장됩니다.
//! MongoDB는 고유 인덱스로, 메모리 구현은 쓰기 시점 검사로 처리하며
//! 위반 시 같은 `ValidationError`를 반환합니다.

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde::{de::DeserializeOwned, Serialize};

use crate::core::errors::AppResult;

pub use memory::MemoryRepository;
pub use mongo::MongoRepository;

/// 고유 제약 위반 시 메시지
pub const DUPLICATE_MESSAGE: &str = "Ya existe un registro con ese valor único";

/// 컬렉션에 저장되는 문서
pub trait Entity:
    Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static
{
    const COLLECTION: &'static str;
    const UNIQUE_FIELDS: &'static [&'static str] = &[];

    fn id(&self) -> Option<ObjectId>;

    fn set_id(&mut self, id: ObjectId);

    /// 저장 직전에 호출되어 `updatedAt`을 갱신합니다.
    fn touch(&mut self) {}
}

/// 사용자 컬렉션을 참조하는 엔티티
///
/// 응답 생성 시 한 번의 조회로 참조를 채우기 위해 사용합니다.
pub trait UserReferences {
    fn user_refs(&self) -> Vec<ObjectId>;
}

/// 단일 필드 동등 조건
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: &'static str,
    pub value: Bson,
}

impl FieldFilter {
    pub fn eq(field: &'static str, value: impl Into<Bson>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(self.field, self.value.clone());
        doc
    }

    /// BSON 문서가 조건을 만족하는지 검사
    pub fn matches(&self, doc: &Document) -> bool {
        doc.get(self.field) == Some(&self.value)
    }
}

#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// 전체 또는 조건에 맞는 문서 (삽입 순서)
    async fn find(&self, filter: Option<&FieldFilter>) -> AppResult<Vec<T>>;

    /// 조건 중 하나라도 만족하는 첫 문서
    async fn find_any(&self, filters: &[FieldFilter]) -> AppResult<Option<T>>;

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<T>>;

    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<T>>;

    /// 새 ObjectId를 부여하고 저장합니다.
    async fn insert(&self, entity: T) -> AppResult<T>;

    /// 문서 전체를 교체합니다. 대상이 없으면 `false`.
    async fn replace(&self, entity: &T) -> AppResult<bool>;

    /// 지정 필드만 `$set`으로 갱신하고 갱신된 문서를 반환합니다.
    async fn set_fields(&self, id: &ObjectId, fields: Document) -> AppResult<Option<T>>;

    async fn delete(&self, id: &ObjectId) -> AppResult<bool>;

    async fn ensure_indexes(&self) -> AppResult<()>;
}
