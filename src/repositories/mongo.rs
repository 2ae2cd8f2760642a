//! MongoDB 기반 리포지토리 구현

use std::marker::PhantomData;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::repositories::{Entity, FieldFilter, Repository, DUPLICATE_MESSAGE};

const DUPLICATE_KEY_CODE: i32 = 11000;

/// 엔티티 타입 하나에 대응하는 MongoDB 컬렉션 리포지토리
pub struct MongoRepository<T: Entity> {
    collection: Collection<T>,
    _entity: PhantomData<T>,
}

impl<T: Entity> MongoRepository<T> {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.get_database().collection::<T>(T::COLLECTION),
            _entity: PhantomData,
        }
    }
}

/// 드라이버 에러를 `AppError`로 변환합니다. 중복 키는 400입니다.
fn map_driver_error(e: mongodb::error::Error) -> AppError {
    let duplicate = match e.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) => we.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(ce) => ce.code == DUPLICATE_KEY_CODE,
        _ => false,
    };

    if duplicate {
        AppError::ValidationError(DUPLICATE_MESSAGE.to_string())
    } else {
        AppError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MongoRepository<T> {
    async fn find(&self, filter: Option<&FieldFilter>) -> AppResult<Vec<T>> {
        let filter = filter.map(FieldFilter::to_document).unwrap_or_default();

        self.collection
            .find(filter)
            .sort(doc! { "_id": 1 })
            .await
            .map_err(map_driver_error)?
            .try_collect()
            .await
            .map_err(map_driver_error)
    }

    async fn find_any(&self, filters: &[FieldFilter]) -> AppResult<Option<T>> {
        if filters.is_empty() {
            return Ok(None);
        }

        let clauses: Vec<Document> = filters.iter().map(FieldFilter::to_document).collect();

        self.collection
            .find_one(doc! { "$or": clauses })
            .await
            .map_err(map_driver_error)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<T>> {
        self.collection
            .find_one(doc! { "_id": *id })
            .await
            .map_err(map_driver_error)
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<T>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.collection
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await
            .map_err(map_driver_error)?
            .try_collect()
            .await
            .map_err(map_driver_error)
    }

    async fn insert(&self, mut entity: T) -> AppResult<T> {
        entity.set_id(ObjectId::new());

        self.collection
            .insert_one(&entity)
            .await
            .map_err(map_driver_error)?;

        Ok(entity)
    }

    async fn replace(&self, entity: &T) -> AppResult<bool> {
        let id = entity
            .id()
            .ok_or_else(|| AppError::InternalError("ID 없는 문서는 교체할 수 없습니다".to_string()))?;

        let result = self.collection
            .replace_one(doc! { "_id": id }, entity)
            .await
            .map_err(map_driver_error)?;

        Ok(result.matched_count > 0)
    }

    async fn set_fields(&self, id: &ObjectId, fields: Document) -> AppResult<Option<T>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": fields })
            .with_options(options)
            .await
            .map_err(map_driver_error)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(map_driver_error)?;

        Ok(result.deleted_count > 0)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        if T::UNIQUE_FIELDS.is_empty() {
            return Ok(());
        }

        let indexes = T::UNIQUE_FIELDS.iter().map(|field| {
            let mut keys = Document::new();
            keys.insert(*field, 1);

            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder()
                    .unique(true)
                    .name(format!("{}_unique", field))
                    .build())
                .build()
        });

        self.collection
            .create_indexes(indexes)
            .await
            .map_err(map_driver_error)?;

        log::info!("📇 {} 고유 인덱스 확인 완료: {:?}", T::COLLECTION, T::UNIQUE_FIELDS);
        Ok(())
    }
}
