//! Domain entities held in the in-memory state.

use serde::Serialize;
use time::OffsetDateTime;

/// One scheduled promotional activation.
///
/// `date` is an ISO-8601 `YYYY-MM-DD` string compared lexicographically;
/// malformed values degrade silently (wrong sort position, wrong or missing
/// badges) rather than failing. `time` is a display string and is never
/// parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub id: String,
    pub city: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub address: String,
    pub map_link: Option<String>,
    pub brand: String,
    pub description: Option<String>,
    pub region: Option<String>,
    pub outlet_id: Option<String>,
    pub sale_rep: Option<String>,
    pub bu: Option<String>,
    pub scale: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PromotionKind {
    Activation,
    Awo,
}

impl PromotionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PromotionKind::Activation => "activation",
            PromotionKind::Awo => "awo",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PromotionKind::Activation => "Activation",
            PromotionKind::Awo => "AWO",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "activation" => Some(PromotionKind::Activation),
            "awo" => Some(PromotionKind::Awo),
            _ => None,
        }
    }
}

/// A marketing content card independent of the schedule. `content` is free
/// text rendered as newline-separated paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromotionRecord {
    pub id: String,
    pub title: String,
    pub image: String,
    pub brand: String,
    pub kind: PromotionKind,
    pub content: String,
}

/// Site-wide content snapshot. Mutated only through the admin save flow,
/// which replaces the whole record atomically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSettingsRecord {
    pub logo_url: String,
    pub hero_image: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub cta_title: String,
    pub cta_description: String,
    pub schedule_title: String,
    pub schedule_subtitle: String,
    pub promotions: Vec<PromotionRecord>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl SiteSettingsRecord {
    pub fn promotion(&self, id: &str) -> Option<&PromotionRecord> {
        self.promotions.iter().find(|promo| promo.id == id)
    }
}
