//! Admin management of the event schedule.

use std::sync::Arc;

use chrono_tz::Tz;
use metrics::counter;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::application::admin::import::{self, ImportError};
use crate::application::repos::{EventsRepo, RepoError};
use crate::domain::entities::EventRecord;
use crate::domain::schedule::{DayContext, date_key};
use crate::domain::seed::DEFAULT_EVENT_TIME;
use crate::util::timezone;

#[derive(Debug, Error)]
pub enum AdminEventError {
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error(transparent)]
    Import(#[from] ImportError),
}

/// Full field set of the event edit form. Values land on the record without
/// validation; blank optional fields become `None`.
#[derive(Debug, Clone, Default)]
pub struct EventFormCommand {
    pub city: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub address: String,
    pub map_link: String,
    pub brand: String,
    pub description: String,
    pub region: String,
    pub outlet_id: String,
    pub sale_rep: String,
    pub bu: String,
    pub scale: String,
}

/// Dashboard split of the current working list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOverview {
    pub total: usize,
    pub upcoming: usize,
    pub past: usize,
}

#[derive(Clone)]
pub struct AdminEventService {
    events: Arc<dyn EventsRepo>,
    timezone: Tz,
}

impl AdminEventService {
    pub fn new(events: Arc<dyn EventsRepo>, timezone: Tz) -> Self {
        Self { events, timezone }
    }

    pub async fn list(&self) -> Result<Vec<EventRecord>, AdminEventError> {
        self.events.list_events().await.map_err(AdminEventError::from)
    }

    pub async fn find(&self, id: &str) -> Result<Option<EventRecord>, AdminEventError> {
        self.events.find_event(id).await.map_err(AdminEventError::from)
    }

    /// Day boundaries for the current render pass in the configured
    /// timezone.
    pub fn day_context(&self) -> DayContext {
        DayContext::new(timezone::today(self.timezone))
    }

    pub async fn overview(&self) -> Result<EventOverview, AdminEventError> {
        let events = self.events.list_events().await?;
        let days = self.day_context();

        let past = events
            .iter()
            .filter(|event| days.is_past(&event.date))
            .count();

        Ok(EventOverview {
            total: events.len(),
            upcoming: events.len() - past,
            past,
        })
    }

    /// Insert a fresh row with the usual defaults and hand back its id so the
    /// caller can jump straight to the edit form.
    pub async fn create_default(&self) -> Result<String, AdminEventError> {
        let record = EventRecord {
            id: format!("new-{}", Uuid::new_v4()),
            city: String::new(),
            date: date_key(timezone::today(self.timezone)),
            time: DEFAULT_EVENT_TIME.to_string(),
            venue: String::new(),
            address: String::new(),
            map_link: None,
            brand: "Heineken".to_string(),
            description: None,
            region: None,
            outlet_id: None,
            sale_rep: None,
            bu: None,
            scale: None,
        };
        let id = record.id.clone();
        self.events.insert_event(record).await?;
        Ok(id)
    }

    pub async fn update(&self, id: &str, command: EventFormCommand) -> Result<(), AdminEventError> {
        let record = apply_command(id, command);
        self.events.update_event(record).await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), AdminEventError> {
        self.events.delete_event(id).await?;
        Ok(())
    }

    /// Bulk import: parse the uploaded spreadsheet and replace the working
    /// list wholesale. Returns the number of imported rows.
    pub async fn import_replace(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<usize, AdminEventError> {
        let rows = match import::parse_spreadsheet(filename, bytes) {
            Ok(rows) => rows,
            Err(err) => {
                counter!("fiera_import_failed_total").increment(1);
                return Err(err.into());
            }
        };

        let count = rows.len();
        self.events.replace_events(rows).await?;

        counter!("fiera_import_rows_total").increment(count as u64);
        info!(
            target = "fiera::admin::events",
            rows = count,
            file = filename,
            "schedule replaced from spreadsheet"
        );
        Ok(count)
    }
}

fn apply_command(id: &str, command: EventFormCommand) -> EventRecord {
    EventRecord {
        id: id.to_string(),
        city: command.city.trim().to_string(),
        date: command.date.trim().to_string(),
        time: command.time.trim().to_string(),
        venue: command.venue.trim().to_string(),
        address: command.address.trim().to_string(),
        map_link: optional(&command.map_link),
        brand: command.brand.trim().to_string(),
        description: optional(&command.description),
        region: optional(&command.region),
        outlet_id: optional(&command.outlet_id),
        sale_rep: optional(&command.sale_rep),
        bu: optional(&command.bu),
        scale: optional(&command.scale),
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
