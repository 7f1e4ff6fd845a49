//! Admin editing of site content and promotions.
//!
//! Every save loads the current snapshot, applies the command, and replaces
//! the snapshot atomically; a rejected command leaves the previous snapshot
//! untouched.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::info;

use crate::application::repos::{RepoError, SettingsRepo};
use crate::domain::entities::{PromotionKind, SiteSettingsRecord};

#[derive(Debug, Error)]
pub enum AdminSettingsError {
    #[error("`{0}` cannot be empty")]
    ConstraintViolation(&'static str),
    #[error("promotion `{0}` does not exist")]
    UnknownPromotion(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct UpdateSettingsCommand {
    pub logo_url: String,
    pub hero_image: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub cta_title: String,
    pub cta_description: String,
    pub schedule_title: String,
    pub schedule_subtitle: String,
}

#[derive(Debug, Clone)]
pub struct UpdatePromotionCommand {
    pub title: String,
    pub image: String,
    pub brand: String,
    pub kind: PromotionKind,
    pub content: String,
}

/// Which image URL field an upload should land on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageTarget {
    Logo,
    Hero,
    Promotion(String),
}

#[derive(Clone)]
pub struct AdminSettingsService {
    repo: Arc<dyn SettingsRepo>,
}

impl AdminSettingsService {
    pub fn new(repo: Arc<dyn SettingsRepo>) -> Self {
        Self { repo }
    }

    pub async fn load(&self) -> Result<SiteSettingsRecord, AdminSettingsError> {
        self.repo
            .load_site_settings()
            .await
            .map_err(AdminSettingsError::from)
    }

    pub async fn update(
        &self,
        command: UpdateSettingsCommand,
    ) -> Result<SiteSettingsRecord, AdminSettingsError> {
        ensure_non_empty(&command.hero_title, "hero_title")?;
        ensure_non_empty(&command.schedule_title, "schedule_title")?;

        let mut record = self.repo.load_site_settings().await?;
        record.logo_url = command.logo_url.trim().to_string();
        record.hero_image = command.hero_image.trim().to_string();
        record.hero_title = command.hero_title.trim().to_string();
        record.hero_subtitle = command.hero_subtitle.trim().to_string();
        record.cta_title = command.cta_title.trim().to_string();
        record.cta_description = command.cta_description.trim().to_string();
        record.schedule_title = command.schedule_title.trim().to_string();
        record.schedule_subtitle = command.schedule_subtitle.trim().to_string();
        record.updated_at = OffsetDateTime::now_utc();

        self.replace_and_log(record.clone(), "settings.update").await?;
        Ok(record)
    }

    pub async fn update_promotion(
        &self,
        id: &str,
        command: UpdatePromotionCommand,
    ) -> Result<SiteSettingsRecord, AdminSettingsError> {
        ensure_non_empty(&command.title, "title")?;

        let mut record = self.repo.load_site_settings().await?;
        let promo = record
            .promotions
            .iter_mut()
            .find(|promo| promo.id == id)
            .ok_or_else(|| AdminSettingsError::UnknownPromotion(id.to_string()))?;

        promo.title = command.title.trim().to_string();
        promo.image = command.image.trim().to_string();
        promo.brand = command.brand.trim().to_string();
        promo.kind = command.kind;
        promo.content = command.content.clone();
        record.updated_at = OffsetDateTime::now_utc();

        self.replace_and_log(record.clone(), "settings.promotion.update")
            .await?;
        Ok(record)
    }

    /// Point the targeted image field at a freshly stored upload URL.
    pub async fn set_image(
        &self,
        target: ImageTarget,
        url: String,
    ) -> Result<SiteSettingsRecord, AdminSettingsError> {
        let mut record = self.repo.load_site_settings().await?;

        match &target {
            ImageTarget::Logo => record.logo_url = url,
            ImageTarget::Hero => record.hero_image = url,
            ImageTarget::Promotion(id) => {
                let promo = record
                    .promotions
                    .iter_mut()
                    .find(|promo| promo.id == *id)
                    .ok_or_else(|| AdminSettingsError::UnknownPromotion(id.clone()))?;
                promo.image = url;
            }
        }
        record.updated_at = OffsetDateTime::now_utc();

        self.replace_and_log(record.clone(), "settings.image.update")
            .await?;
        Ok(record)
    }

    async fn replace_and_log(
        &self,
        record: SiteSettingsRecord,
        action: &'static str,
    ) -> Result<(), AdminSettingsError> {
        let record_for_log = record.clone();
        let snapshot = SettingsSnapshot::from(&record_for_log);
        self.repo.replace_site_settings(record).await?;

        info!(
            target = "fiera::admin::settings",
            action = action,
            snapshot = %serde_json::to_string(&snapshot).unwrap_or_default(),
            "settings snapshot replaced"
        );
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct SettingsSnapshot<'a> {
    logo_url: &'a str,
    hero_title: &'a str,
    cta_title: &'a str,
    schedule_title: &'a str,
    promotions: usize,
}

impl<'a> From<&'a SiteSettingsRecord> for SettingsSnapshot<'a> {
    fn from(record: &'a SiteSettingsRecord) -> Self {
        Self {
            logo_url: record.logo_url.as_str(),
            hero_title: record.hero_title.as_str(),
            cta_title: record.cta_title.as_str(),
            schedule_title: record.schedule_title.as_str(),
            promotions: record.promotions.len(),
        }
    }
}

fn ensure_non_empty(value: &str, field: &'static str) -> Result<(), AdminSettingsError> {
    if value.trim().is_empty() {
        return Err(AdminSettingsError::ConstraintViolation(field));
    }
    Ok(())
}
