use askama::Template;
use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

use crate::presentation::views::OptionView;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month padding:zero]-[day padding:zero] [hour padding:zero]:[minute padding:zero] UTC"
);

pub fn format_timestamp(timestamp: OffsetDateTime) -> String {
    timestamp
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| timestamp.to_string())
}

#[derive(Clone)]
pub struct AdminFlashView {
    pub kind: &'static str,
    pub text: String,
}

/// Admin page shell: active navigation entry plus an optional flash notice
/// carried over from the previous action.
pub struct AdminLayout<T> {
    pub active: &'static str,
    pub flash: Option<AdminFlashView>,
    pub content: T,
}

impl<T> AdminLayout<T> {
    pub fn new(active: &'static str, flash: Option<AdminFlashView>, content: T) -> Self {
        Self {
            active,
            flash,
            content,
        }
    }
}

pub struct AdminDashboardView {
    pub total_events: usize,
    pub upcoming_events: usize,
    pub past_events: usize,
    pub promotions: usize,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardTemplate {
    pub view: AdminLayout<AdminDashboardView>,
}

#[derive(Clone)]
pub struct AdminEventRowView {
    pub id: String,
    pub city: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub address: String,
    pub brand: String,
    pub is_past: bool,
}

pub struct AdminEventListView {
    pub rows: Vec<AdminEventRowView>,
    pub count: usize,
}

#[derive(Template)]
#[template(path = "admin/events.html")]
pub struct AdminEventsTemplate {
    pub view: AdminLayout<AdminEventListView>,
}

pub struct AdminEventFormView {
    pub id: String,
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
    pub brands: Vec<OptionView>,
    pub form_action: String,
}

#[derive(Template)]
#[template(path = "admin/event_edit.html")]
pub struct AdminEventEditTemplate {
    pub view: AdminLayout<AdminEventFormView>,
}

pub struct AdminSettingsFormView {
    pub logo_url: String,
    pub hero_image: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub cta_title: String,
    pub cta_description: String,
    pub schedule_title: String,
    pub schedule_subtitle: String,
    pub updated_at: String,
}

#[derive(Template)]
#[template(path = "admin/settings.html")]
pub struct AdminSettingsTemplate {
    pub view: AdminLayout<AdminSettingsFormView>,
}

#[derive(Clone)]
pub struct AdminPromotionRowView {
    pub id: String,
    pub title: String,
    pub brand: String,
    pub kind_label: &'static str,
    pub image: String,
}

pub struct AdminPromotionListView {
    pub rows: Vec<AdminPromotionRowView>,
}

#[derive(Template)]
#[template(path = "admin/promotions.html")]
pub struct AdminPromotionsTemplate {
    pub view: AdminLayout<AdminPromotionListView>,
}

pub struct AdminPromotionFormView {
    pub id: String,
    pub title: String,
    pub image: String,
    pub brand: String,
    pub content: String,
    pub brands: Vec<OptionView>,
    pub kinds: Vec<OptionView>,
    pub form_action: String,
    pub image_action: String,
}

#[derive(Template)]
#[template(path = "admin/promotion_edit.html")]
pub struct AdminPromotionEditTemplate {
    pub view: AdminLayout<AdminPromotionFormView>,
}
