//! In-memory state store backing the repository traits.
//!
//! Working state lives here for the lifetime of the process and is seeded
//! from the static defaults at startup; a restart reverts everything.

use async_trait::async_trait;
use time::Date;
use tokio::sync::RwLock;

use crate::application::repos::{EventsRepo, RepoError, SettingsRepo};
use crate::domain::entities::{EventRecord, SiteSettingsRecord};
use crate::domain::seed;

pub struct MemoryStore {
    events: RwLock<Vec<EventRecord>>,
    settings: RwLock<SiteSettingsRecord>,
}

impl MemoryStore {
    /// Store seeded with the default demo content; the first demo event is
    /// pinned to `today`.
    pub fn seeded(today: Date) -> Self {
        Self {
            events: RwLock::new(seed::seed_events(today)),
            settings: RwLock::new(seed::default_settings()),
        }
    }

    pub fn with_state(events: Vec<EventRecord>, settings: SiteSettingsRecord) -> Self {
        Self {
            events: RwLock::new(events),
            settings: RwLock::new(settings),
        }
    }
}

#[async_trait]
impl EventsRepo for MemoryStore {
    async fn list_events(&self) -> Result<Vec<EventRecord>, RepoError> {
        Ok(self.events.read().await.clone())
    }

    async fn find_event(&self, id: &str) -> Result<Option<EventRecord>, RepoError> {
        Ok(self
            .events
            .read()
            .await
            .iter()
            .find(|event| event.id == id)
            .cloned())
    }

    async fn insert_event(&self, record: EventRecord) -> Result<(), RepoError> {
        self.events.write().await.insert(0, record);
        Ok(())
    }

    async fn update_event(&self, record: EventRecord) -> Result<(), RepoError> {
        let mut events = self.events.write().await;
        match events.iter_mut().find(|event| event.id == record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete_event(&self, id: &str) -> Result<(), RepoError> {
        let mut events = self.events.write().await;
        let before = events.len();
        events.retain(|event| event.id != id);
        if events.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn replace_events(&self, records: Vec<EventRecord>) -> Result<(), RepoError> {
        *self.events.write().await = records;
        Ok(())
    }
}

#[async_trait]
impl SettingsRepo for MemoryStore {
    async fn load_site_settings(&self) -> Result<SiteSettingsRecord, RepoError> {
        Ok(self.settings.read().await.clone())
    }

    async fn replace_site_settings(&self, record: SiteSettingsRecord) -> Result<(), RepoError> {
        *self.settings.write().await = record;
        Ok(())
    }
}
