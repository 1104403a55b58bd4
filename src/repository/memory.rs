//! In-memory data source

use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DataSource, Entity};
use crate::error::{AppError, AppResult};

/// Collection kept in insertion order behind an async lock. Every mutation
/// is a single write critical section.
pub struct MemoryStore<E: Entity> {
    records: RwLock<IndexMap<String, E>>,
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(IndexMap::new()),
        }
    }

    /// Store pre-built records; ids must be unique
    pub fn with_records(records: Vec<E>) -> AppResult<Self> {
        let mut map = IndexMap::with_capacity(records.len());
        for record in records {
            let id = record.id().to_string();
            if map.insert(id.clone(), record).is_some() {
                return Err(AppError::Conflict(format!(
                    "Duplicate {} id {}",
                    E::KIND,
                    id
                )));
            }
        }
        Ok(Self {
            records: RwLock::new(map),
        })
    }

    fn not_found(id: &str) -> AppError {
        AppError::NotFound(format!("{} {} not found", E::KIND, id))
    }
}

impl<E: Entity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> DataSource<E> for MemoryStore<E> {
    async fn list(&self) -> AppResult<Vec<E>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> AppResult<E> {
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, data: E::Create) -> AppResult<E> {
        let mut records = self.records.write().await;
        let mut id = Uuid::new_v4().to_string();
        while records.contains_key(&id) {
            id = Uuid::new_v4().to_string();
        }
        let record = E::build(id.clone(), data, Utc::now());
        records.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, data: E::Update) -> AppResult<E> {
        let mut records = self.records.write().await;
        let current = records.get_mut(id).ok_or_else(|| Self::not_found(id))?;

        // Apply to a copy so a rejected change leaves the stored record intact
        let mut updated = current.clone();
        updated.apply(data, Utc::now())?;
        *current = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.records
            .write()
            .await
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{
            location::{CreateLocation, UpdateLocation},
            user::UpdateUser,
            Location, Role, User,
        },
        repository::seed,
    };

    fn new_location(name: &str) -> CreateLocation {
        CreateLocation {
            name: name.to_string(),
            address: "1 Test Street".into(),
            city: "Austin".into(),
            country: "USA".into(),
            device_count: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids_and_keeps_order() {
        let store = MemoryStore::<Location>::new();
        let a = store.create(new_location("A")).await.unwrap();
        let b = store.create(new_location("B")).await.unwrap();
        assert_ne!(a.id, b.id);

        let names: Vec<String> = store.list().await.unwrap().into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_duplicate_seed_ids_rejected() {
        let mut users = seed::users();
        users.push(users[0].clone());
        assert!(matches!(
            MemoryStore::with_records(users),
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_record_unchanged() {
        let store = MemoryStore::with_records(seed::users()).unwrap();
        let before = store.get("2").await.unwrap();

        let result = store
            .update(
                "2",
                UpdateUser {
                    email: Some("changed@telecom.demo".into()),
                    role: Some(Role::Admin),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let after: User = store.get("2").await.unwrap();
        assert_eq!(after.role, before.role);
        assert_eq!(after.updated_at, before.updated_at);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let store = MemoryStore::<Location>::new();
        assert!(matches!(
            store.update("nope", UpdateLocation::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(store.delete("nope").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_preserves_order_of_rest() {
        let store = MemoryStore::with_records(seed::locations()).unwrap();
        store.delete("2").await.unwrap();
        let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
