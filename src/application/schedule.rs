//! Schedule page assembly on top of the domain pipeline.

use std::sync::Arc;
use std::time::Instant;

use chrono_tz::Tz;
use metrics::histogram;
use url::Url;

use crate::application::error::AppError;
use crate::application::repos::{EventsRepo, SettingsRepo};
use crate::domain::brands::{Brand, badge_tone};
use crate::domain::entities::EventRecord;
use crate::domain::schedule::{
    self, DateBadge, DayContext, FilterState, SortConfig, SortField, SortOrder,
};
use crate::domain::seed::CITIES;
use crate::presentation::views::{
    DateBadgeView, EventDetailView, EventRowView, FilterBarView, OptionView, SchedulePageContext,
    SortHeaderView, SortIndicator,
};
use crate::util::timezone;

const MAPS_SEARCH_BASE: &str = "https://www.google.com/maps/search/";

/// Sortable table columns in display order.
const COLUMNS: [(SortField, &str); 5] = [
    (SortField::City, "Thành phố"),
    (SortField::Date, "Thời gian"),
    (SortField::Venue, "Tên quán"),
    (SortField::Address, "Địa chỉ"),
    (SortField::Brand, "Brand"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleQuery {
    pub filters: FilterState,
    pub sort: SortConfig,
    pub show_past: bool,
}

impl Default for ScheduleQuery {
    fn default() -> Self {
        Self {
            filters: FilterState::default(),
            sort: SortConfig::default(),
            show_past: true,
        }
    }
}

#[derive(Clone)]
pub struct ScheduleService {
    events: Arc<dyn EventsRepo>,
    settings: Arc<dyn SettingsRepo>,
    timezone: Tz,
}

impl ScheduleService {
    pub fn new(events: Arc<dyn EventsRepo>, settings: Arc<dyn SettingsRepo>, timezone: Tz) -> Self {
        Self {
            events,
            settings,
            timezone,
        }
    }

    pub async fn page_context(&self, query: &ScheduleQuery) -> Result<SchedulePageContext, AppError> {
        let settings = self.settings.load_site_settings().await?;
        let events = self.events.list_events().await?;
        let days = DayContext::new(timezone::today(self.timezone));

        let started = Instant::now();
        let processed = schedule::process(events, &query.filters, query.sort, query.show_past, &days);
        histogram!("fiera_schedule_process_ms").record(started.elapsed().as_secs_f64() * 1_000.0);

        let rows: Vec<EventRowView> = processed
            .iter()
            .map(|event| build_row(event, &days))
            .collect();
        let result_count = rows.len();

        Ok(SchedulePageContext {
            heading: settings.schedule_title,
            subtitle: settings.schedule_subtitle,
            filters: build_filter_bar(query),
            columns: build_columns(query),
            has_results: result_count > 0,
            rows,
            result_count,
        })
    }
}

fn build_row(event: &EventRecord, days: &DayContext) -> EventRowView {
    let status = days.classify(&event.date);
    let has_custom_map_link = event
        .map_link
        .as_deref()
        .is_some_and(|link| !link.trim().is_empty());

    EventRowView {
        city: event.city.clone(),
        date_display: schedule::display_date(&event.date),
        time: event.time.clone(),
        venue: event.venue.clone(),
        address: event.address.clone(),
        map_url: map_url(event),
        has_custom_map_link,
        brand: event.brand.clone(),
        brand_tone: badge_tone(&event.brand).css_class(),
        description: event.description.clone(),
        badge: status.badge().map(badge_view),
        is_past: status.is_past,
        details: build_details(event),
    }
}

/// Custom link when present, otherwise a synthesized maps search for
/// venue + address + city.
fn map_url(event: &EventRecord) -> String {
    if let Some(link) = event.map_link.as_deref() {
        let trimmed = link.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let query = format!("{}, {}, {}", event.venue, event.address, event.city);
    Url::parse_with_params(MAPS_SEARCH_BASE, [("api", "1"), ("query", query.as_str())])
        .expect("static maps base url")
        .to_string()
}

fn badge_view(badge: DateBadge) -> DateBadgeView {
    match badge {
        DateBadge::Past => DateBadgeView {
            label: "Đã qua",
            css_class: "chip-past",
        },
        DateBadge::Today => DateBadgeView {
            label: "Hôm nay",
            css_class: "chip-today",
        },
        DateBadge::Tomorrow => DateBadgeView {
            label: "Ngày mai",
            css_class: "chip-tomorrow",
        },
        DateBadge::ThisWeek => DateBadgeView {
            label: "Tuần này",
            css_class: "chip-this-week",
        },
        DateBadge::NextWeek => DateBadgeView {
            label: "Tuần sau",
            css_class: "chip-next-week",
        },
    }
}

fn build_details(event: &EventRecord) -> Vec<EventDetailView> {
    let fields = [
        ("Vùng", event.region.as_deref()),
        ("Outlet ID", event.outlet_id.as_deref()),
        ("Sale Rep", event.sale_rep.as_deref()),
        ("BU", event.bu.as_deref()),
        ("Quy mô", event.scale.as_deref()),
    ];

    fields
        .into_iter()
        .filter_map(|(label, value)| {
            let value = value?.trim();
            (!value.is_empty()).then(|| EventDetailView {
                label,
                value: value.to_string(),
            })
        })
        .collect()
}

fn build_filter_bar(query: &ScheduleQuery) -> FilterBarView {
    let filters = &query.filters;
    let (sort_value, order_value) = if query.sort == SortConfig::default() {
        (String::new(), String::new())
    } else {
        (
            query.sort.field.as_str().to_string(),
            query.sort.order.as_str().to_string(),
        )
    };

    FilterBarView {
        sort_value,
        order_value,
        search: filters.search.clone(),
        city: filters.city.clone(),
        brand: filters.brand.clone(),
        date_from: filters.date_from.clone(),
        date_to: filters.date_to.clone(),
        hide_past: !query.show_past,
        cities: CITIES
            .iter()
            .map(|city| OptionView {
                value: (*city).to_string(),
                is_active: filters.city == *city,
            })
            .collect(),
        brands: Brand::ALL
            .iter()
            .map(|brand| OptionView {
                value: brand.label().to_string(),
                is_active: filters.brand == brand.label(),
            })
            .collect(),
    }
}

fn build_columns(query: &ScheduleQuery) -> Vec<SortHeaderView> {
    COLUMNS
        .into_iter()
        .map(|(field, label)| {
            let indicator = if query.sort.field == field {
                match query.sort.order {
                    SortOrder::Asc => SortIndicator::Asc,
                    SortOrder::Desc => SortIndicator::Desc,
                }
            } else {
                SortIndicator::Inactive
            };

            SortHeaderView {
                label,
                href: schedule_href(&query.filters, query.sort.toggled(field), query.show_past),
                indicator,
            }
        })
        .collect()
}

/// Canonical `/schedule` URL for the given state; default values stay out of
/// the query string.
pub fn schedule_href(filters: &FilterState, sort: SortConfig, show_past: bool) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());

    if !filters.search.is_empty() {
        serializer.append_pair("search", &filters.search);
    }
    if !filters.city.is_empty() {
        serializer.append_pair("city", &filters.city);
    }
    if !filters.brand.is_empty() {
        serializer.append_pair("brand", &filters.brand);
    }
    if !filters.date_from.is_empty() {
        serializer.append_pair("from", &filters.date_from);
    }
    if !filters.date_to.is_empty() {
        serializer.append_pair("to", &filters.date_to);
    }
    if sort != SortConfig::default() {
        serializer.append_pair("sort", sort.field.as_str());
        serializer.append_pair("order", sort.order.as_str());
    }
    if !show_past {
        serializer.append_pair("past", "0");
    }

    let encoded = serializer.finish();
    if encoded.is_empty() {
        "/schedule".to_string()
    } else {
        format!("/schedule?{encoded}")
    }
}
