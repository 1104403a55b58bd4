//! Repository layer: entity data sources

pub mod memory;
pub mod seed;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    error::AppResult,
    models::{Alert, Device, Location, User, UtilizationLog},
};

pub use memory::MemoryStore;

/// Record type held by a data source
pub trait Entity: Clone + Send + Sync + 'static {
    /// Fields accepted on creation
    type Create: Send + 'static;
    /// Change applied on update
    type Update: Send + 'static;

    /// Human-readable name used in messages ("Device 7 not found")
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn build(id: String, data: Self::Create, now: DateTime<Utc>) -> Self;

    /// Apply a change in place. On error the record must be left as it was.
    fn apply(&mut self, data: Self::Update, now: DateTime<Utc>) -> AppResult<()>;
}

/// Backing store for one entity collection
#[async_trait]
pub trait DataSource<E: Entity>: Send + Sync {
    /// All records, in insertion order
    async fn list(&self) -> AppResult<Vec<E>>;

    async fn get(&self, id: &str) -> AppResult<E>;

    async fn create(&self, data: E::Create) -> AppResult<E>;

    async fn update(&self, id: &str, data: E::Update) -> AppResult<E>;

    async fn delete(&self, id: &str) -> AppResult<()>;
}

/// Main repository struct holding one data source per entity type
#[derive(Clone)]
pub struct Repository {
    pub users: Arc<dyn DataSource<User>>,
    pub devices: Arc<dyn DataSource<Device>>,
    pub locations: Arc<dyn DataSource<Location>>,
    pub utilization: Arc<dyn DataSource<UtilizationLog>>,
    pub alerts: Arc<dyn DataSource<Alert>>,
}

impl Repository {
    /// In-memory repository, optionally seeded with the mock records
    pub fn in_memory(seed: bool) -> AppResult<Self> {
        if !seed {
            return Ok(Self {
                users: Arc::new(MemoryStore::<User>::new()),
                devices: Arc::new(MemoryStore::<Device>::new()),
                locations: Arc::new(MemoryStore::<Location>::new()),
                utilization: Arc::new(MemoryStore::<UtilizationLog>::new()),
                alerts: Arc::new(MemoryStore::<Alert>::new()),
            });
        }

        Ok(Self {
            users: Arc::new(MemoryStore::with_records(seed::users())?),
            devices: Arc::new(MemoryStore::with_records(seed::devices())?),
            locations: Arc::new(MemoryStore::with_records(seed::locations())?),
            utilization: Arc::new(MemoryStore::with_records(seed::utilization_logs())?),
            alerts: Arc::new(MemoryStore::with_records(seed::alerts())?),
        })
    }
}
