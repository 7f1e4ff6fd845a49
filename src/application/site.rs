//! Public site assembly: chrome, homepage, and program pages.

use std::sync::Arc;

use crate::application::error::AppError;
use crate::application::repos::SettingsRepo;
use crate::domain::brands::badge_tone;
use crate::domain::entities::{PromotionKind, PromotionRecord};
use crate::presentation::views::{
    HomeContext, LayoutChrome, NavProgramView, ProgramDetailContext, ProgramListContext,
    PromoCard, copy_lines,
};

#[derive(Clone)]
pub struct SiteService {
    settings: Arc<dyn SettingsRepo>,
}

impl SiteService {
    pub fn new(settings: Arc<dyn SettingsRepo>) -> Self {
        Self { settings }
    }

    pub async fn chrome(&self) -> Result<LayoutChrome, AppError> {
        let settings = self.settings.load_site_settings().await?;

        let nav_view = |promo: &PromotionRecord| NavProgramView {
            id: promo.id.clone(),
            title: promo.title.clone(),
            brand: promo.brand.clone(),
        };

        Ok(LayoutChrome {
            logo_url: settings.logo_url.clone(),
            activation_programs: settings
                .promotions
                .iter()
                .filter(|promo| promo.kind == PromotionKind::Activation)
                .map(nav_view)
                .collect(),
            awo_programs: settings
                .promotions
                .iter()
                .filter(|promo| promo.kind == PromotionKind::Awo)
                .map(nav_view)
                .collect(),
        })
    }

    pub async fn home(&self) -> Result<HomeContext, AppError> {
        let settings = self.settings.load_site_settings().await?;

        Ok(HomeContext {
            hero_image: settings.hero_image.clone(),
            hero_title_lines: copy_lines(&settings.hero_title),
            hero_subtitle_lines: copy_lines(&settings.hero_subtitle),
            promos: settings.promotions.iter().map(promo_card).collect(),
            cta_title: settings.cta_title,
            cta_description: settings.cta_description,
        })
    }

    pub async fn program_list(&self) -> Result<ProgramListContext, AppError> {
        let settings = self.settings.load_site_settings().await?;

        Ok(ProgramListContext {
            activation: settings
                .promotions
                .iter()
                .filter(|promo| promo.kind == PromotionKind::Activation)
                .map(promo_card)
                .collect(),
            awo: settings
                .promotions
                .iter()
                .filter(|promo| promo.kind == PromotionKind::Awo)
                .map(promo_card)
                .collect(),
        })
    }

    pub async fn program_detail(&self, id: &str) -> Result<Option<ProgramDetailContext>, AppError> {
        let settings = self.settings.load_site_settings().await?;

        Ok(settings.promotion(id).map(|promo| ProgramDetailContext {
            title: promo.title.clone(),
            image: promo.image.clone(),
            brand: promo.brand.clone(),
            tone_class: badge_tone(&promo.brand).css_class(),
            kind_label: promo.kind.label(),
            paragraphs: copy_lines(&promo.content),
        }))
    }
}

fn promo_card(promo: &PromotionRecord) -> PromoCard {
    PromoCard {
        id: promo.id.clone(),
        title: promo.title.clone(),
        image: promo.image.clone(),
        brand: promo.brand.clone(),
        tone_class: badge_tone(&promo.brand).css_class(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed;
    use crate::infra::memstore::MemoryStore;
    use time::macros::date;

    fn service() -> SiteService {
        let store = Arc::new(MemoryStore::seeded(date!(2024 - 06 - 10)));
        SiteService::new(store)
    }

    #[tokio::test]
    async fn chrome_groups_programs_by_kind() {
        let chrome = service().chrome().await.expect("chrome");
        let seeded = seed::default_settings();
        let total = chrome.activation_programs.len() + chrome.awo_programs.len();
        assert_eq!(total, seeded.promotions.len());
        assert!(!chrome.activation_programs.is_empty());
        assert!(!chrome.awo_programs.is_empty());
    }

    #[tokio::test]
    async fn hero_title_splits_into_pre_line_rows() {
        let home = service().home().await.expect("home context");
        assert_eq!(
            home.hero_title_lines,
            ["Khuấy Động Cuộc Vui", "Cùng Heineken Vietnam"]
        );
    }

    #[tokio::test]
    async fn program_detail_splits_paragraphs_and_skips_blanks() {
        let detail = service()
            .program_detail("1")
            .await
            .expect("settings")
            .expect("program 1");
        assert!(detail.paragraphs.len() >= 2);
        assert!(detail.paragraphs.iter().all(|p| !p.trim().is_empty()));
    }

    #[tokio::test]
    async fn unknown_program_resolves_to_none() {
        assert!(
            service()
                .program_detail("404")
                .await
                .expect("settings")
                .is_none()
        );
    }
}
