//! 메모리 기반 리포지토리 구현
//!
//! MongoDB 없이 서비스를 실행하거나 테스트할 때 사용합니다.
//! 필터와 고유 제약은 문서의 BSON 표현을 기준으로 평가하므로
//! MongoDB 구현과 같은 필드 이름 규칙을 따릅니다.

use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId, Document};
use tokio::sync::RwLock;

use crate::core::errors::{AppError, AppResult};
use crate::repositories::{Entity, FieldFilter, Repository, DUPLICATE_MESSAGE};

pub struct MemoryRepository<T: Entity> {
    items: RwLock<Vec<T>>,
}

impl<T: Entity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    fn check_unique(items: &[T], candidate: &T) -> AppResult<()> {
        if T::UNIQUE_FIELDS.is_empty() {
            return Ok(());
        }

        let candidate_doc = bson::to_document(candidate)?;

        for other in items.iter().filter(|o| o.id() != candidate.id()) {
            let other_doc = bson::to_document(other)?;
            let clash = T::UNIQUE_FIELDS.iter().any(|field| {
                match (candidate_doc.get(*field), other_doc.get(*field)) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            });

            if clash {
                return Err(AppError::ValidationError(DUPLICATE_MESSAGE.to_string()));
            }
        }

        Ok(())
    }

    fn matches_any(entity: &T, filters: &[FieldFilter]) -> AppResult<bool> {
        let doc = bson::to_document(entity)?;
        Ok(filters.iter().any(|f| f.matches(&doc)))
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn find(&self, filter: Option<&FieldFilter>) -> AppResult<Vec<T>> {
        let items = self.items.read().await;

        match filter {
            None => Ok(items.clone()),
            Some(filter) => {
                let mut found = Vec::new();
                for item in items.iter() {
                    if Self::matches_any(item, std::slice::from_ref(filter))? {
                        found.push(item.clone());
                    }
                }
                Ok(found)
            }
        }
    }

    async fn find_any(&self, filters: &[FieldFilter]) -> AppResult<Option<T>> {
        let items = self.items.read().await;

        for item in items.iter() {
            if Self::matches_any(item, filters)? {
                return Ok(Some(item.clone()));
            }
        }
        Ok(None)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<T>> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id().as_ref() == Some(id)).cloned())
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<T>> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|item| item.id().is_some_and(|id| ids.contains(&id)))
            .cloned()
            .collect())
    }

    async fn insert(&self, mut entity: T) -> AppResult<T> {
        entity.set_id(ObjectId::new());

        let mut items = self.items.write().await;
        Self::check_unique(&items, &entity)?;
        items.push(entity.clone());
        Ok(entity)
    }

    async fn replace(&self, entity: &T) -> AppResult<bool> {
        let mut items = self.items.write().await;
        Self::check_unique(&items, entity)?;

        match items.iter_mut().find(|item| item.id().is_some() && item.id() == entity.id()) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_fields(&self, id: &ObjectId, fields: Document) -> AppResult<Option<T>> {
        let mut items = self.items.write().await;

        let Some(index) = items.iter().position(|item| item.id().as_ref() == Some(id)) else {
            return Ok(None);
        };

        let mut doc = bson::to_document(&items[index])?;
        for (key, value) in fields {
            doc.insert(key, value);
        }
        let updated: T = bson::from_document(doc)?;

        Self::check_unique(&items, &updated)?;
        items[index] = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id().as_ref() != Some(id));
        Ok(items.len() < before)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DocumentType, InstructorStatus, Role, User};
    use mongodb::bson::doc;

    fn user(documento: &str, institucional: &str, rol: Role) -> User {
        User::new(
            "Prueba".to_string(),
            DocumentType::CC,
            documento.to_string(),
            institucional.to_string(),
            format!("{}@gmail.com", documento),
            "hash".to_string(),
            rol,
            vec![],
            None,
        )
    }

    #[actix_web::test]
    async fn test_insert_assigns_id_and_keeps_order() {
        let repo = MemoryRepository::<User>::new();
        let a = repo.insert(user("1", "a@sena.edu.co", Role::Admin)).await.unwrap();
        let b = repo.insert(user("2", "b@sena.edu.co", Role::Instructor)).await.unwrap();

        assert!(a.id.is_some());
        let all = repo.find(None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, a.id);
        assert_eq!(all[1].id, b.id);
    }

    #[actix_web::test]
    async fn test_unique_fields_are_enforced() {
        let repo = MemoryRepository::<User>::new();
        repo.insert(user("1", "a@sena.edu.co", Role::Admin)).await.unwrap();

        let dup = repo.insert(user("1", "otro@sena.edu.co", Role::Admin)).await;
        assert!(matches!(dup, Err(AppError::ValidationError(_))));

        let dup_mail = repo.insert(user("9", "a@sena.edu.co", Role::Admin)).await;
        assert!(matches!(dup_mail, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_replace_own_document_is_not_a_clash() {
        let repo = MemoryRepository::<User>::new();
        let mut a = repo.insert(user("1", "a@sena.edu.co", Role::Admin)).await.unwrap();
        a.nombre = "Cambiado".to_string();

        assert!(repo.replace(&a).await.unwrap());
        let stored = repo.find_by_id(&a.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.nombre, "Cambiado");
    }

    #[actix_web::test]
    async fn test_filters() {
        let repo = MemoryRepository::<User>::new();
        repo.insert(user("1", "a@sena.edu.co", Role::Admin)).await.unwrap();
        let inst = repo.insert(user("2", "b@sena.edu.co", Role::Instructor)).await.unwrap();

        let filter = FieldFilter::eq("rol", Role::Instructor.as_str());
        let found = repo.find(Some(&filter)).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, inst.id);

        let any = repo
            .find_any(&[
                FieldFilter::eq("correoInstitucional", "nadie@sena.edu.co"),
                FieldFilter::eq("correoPersonal", "2@gmail.com"),
            ])
            .await
            .unwrap();
        assert_eq!(any.unwrap().id, inst.id);
    }

    #[actix_web::test]
    async fn test_set_fields_updates_only_given_fields() {
        let repo = MemoryRepository::<User>::new();
        let inst = repo.insert(user("2", "b@sena.edu.co", Role::Instructor)).await.unwrap();
        let id = inst.id.unwrap();

        let updated = repo
            .set_fields(&id, doc! { "estadoInstructor": "aprobado" })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.estado_instructor, Some(InstructorStatus::Aprobado));
        assert_eq!(updated.nombre, inst.nombre);
        assert!(repo.set_fields(&ObjectId::new(), doc! { "nombre": "x" }).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_delete_reports_missing() {
        let repo = MemoryRepository::<User>::new();
        let a = repo.insert(user("1", "a@sena.edu.co", Role::Admin)).await.unwrap();

        assert!(repo.delete(&a.id.unwrap()).await.unwrap());
        assert!(!repo.delete(&a.id.unwrap()).await.unwrap());
    }
}
