//! Repository traits describing the in-memory state store.
//!
//! The store holds working state for the lifetime of the process; restarting
//! the server reverts to the seeded defaults. Admin saves replace whole
//! snapshots rather than patching in place.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{EventRecord, SiteSettingsRecord};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("resource not found")]
    NotFound,
}

#[async_trait]
pub trait EventsRepo: Send + Sync {
    async fn list_events(&self) -> Result<Vec<EventRecord>, RepoError>;

    async fn find_event(&self, id: &str) -> Result<Option<EventRecord>, RepoError>;

    /// New rows land at the top of the working list.
    async fn insert_event(&self, record: EventRecord) -> Result<(), RepoError>;

    async fn update_event(&self, record: EventRecord) -> Result<(), RepoError>;

    async fn delete_event(&self, id: &str) -> Result<(), RepoError>;

    /// Bulk-import pathway: the incoming rows replace the list wholesale.
    async fn replace_events(&self, records: Vec<EventRecord>) -> Result<(), RepoError>;
}

#[async_trait]
pub trait SettingsRepo: Send + Sync {
    async fn load_site_settings(&self) -> Result<SiteSettingsRecord, RepoError>;

    /// Atomically replace the prior settings snapshot.
    async fn replace_site_settings(&self, record: SiteSettingsRecord) -> Result<(), RepoError>;
}
