//! Schedule processing: filtering, date classification, and ordering.
//!
//! Event dates are `YYYY-MM-DD` strings and every comparison in this module
//! is lexicographic, which is only correct because the format is zero-padded
//! and fixed-width. Malformed dates are not rejected; they sort and classify
//! wherever the string comparison puts them.

use std::cmp::Ordering;

use time::{Date, Duration, format_description::FormatItem, macros::format_description};

use super::entities::EventRecord;

pub const DATE_KEY_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month padding:zero]-[day padding:zero]");
pub const DISPLAY_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[day padding:zero]/[month padding:zero]/[year]");

/// Conjunctive filter predicates; empty strings mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub city: String,
    pub brand: String,
    pub date_from: String,
    pub date_to: String,
}

impl FilterState {
    pub fn is_active(&self) -> bool {
        !(self.search.is_empty()
            && self.city.is_empty()
            && self.brand.is_empty()
            && self.date_from.is_empty()
            && self.date_to.is_empty())
    }

    fn matches(&self, event: &EventRecord) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let hit = event.venue.to_lowercase().contains(&needle)
                || event.address.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        if !self.city.is_empty() && event.city != self.city {
            return false;
        }
        if !self.brand.is_empty() && event.brand != self.brand {
            return false;
        }
        if !self.date_from.is_empty() && event.date.as_str() < self.date_from.as_str() {
            return false;
        }
        if !self.date_to.is_empty() && event.date.as_str() > self.date_to.as_str() {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    City,
    #[default]
    Date,
    Time,
    Venue,
    Address,
    MapLink,
    Brand,
    Description,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::City => "city",
            SortField::Date => "date",
            SortField::Time => "time",
            SortField::Venue => "venue",
            SortField::Address => "address",
            SortField::MapLink => "map_link",
            SortField::Brand => "brand",
            SortField::Description => "description",
        }
    }

    pub fn parse(value: &str) -> Option<SortField> {
        match value {
            "city" => Some(SortField::City),
            "date" => Some(SortField::Date),
            "time" => Some(SortField::Time),
            "venue" => Some(SortField::Venue),
            "address" => Some(SortField::Address),
            "map_link" => Some(SortField::MapLink),
            "brand" => Some(SortField::Brand),
            "description" => Some(SortField::Description),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<SortOrder> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn flipped(self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortConfig {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortConfig {
    /// Next state after selecting `field`: the active field flips its order,
    /// a new field resets to ascending.
    pub fn toggled(self, field: SortField) -> SortConfig {
        if self.field == field {
            SortConfig {
                field,
                order: self.order.flipped(),
            }
        } else {
            SortConfig {
                field,
                order: SortOrder::Asc,
            }
        }
    }
}

/// Day boundaries captured once per render pass so every classification in
/// the pass agrees on what "today" is.
///
/// The week starts on Monday: the back-offset from today is
/// `weekday.number_days_from_monday()`, so a Sunday resolves to the Monday
/// six days earlier. "Next week" is the seven days immediately after this
/// week's Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayContext {
    pub today: String,
    tomorrow: String,
    week_start: String,
    week_end: String,
    next_week_end: String,
}

impl DayContext {
    pub fn new(today: Date) -> Self {
        let back = i64::from(today.weekday().number_days_from_monday());
        let week_start = today - Duration::days(back);
        let week_end = week_start + Duration::days(6);

        Self {
            today: date_key(today),
            tomorrow: date_key(today + Duration::days(1)),
            week_start: date_key(week_start),
            week_end: date_key(week_end),
            next_week_end: date_key(week_end + Duration::days(7)),
        }
    }

    pub fn classify(&self, date: &str) -> DateStatus {
        let is_today = date == self.today;
        let is_tomorrow = date == self.tomorrow;
        let in_window = self.week_start.as_str() <= date && date <= self.week_end.as_str();

        DateStatus {
            is_today,
            is_tomorrow,
            // Today and tomorrow suppress the this-week badge even when the
            // window alone would match.
            in_this_week: in_window && !is_today && !is_tomorrow,
            in_next_week: self.week_end.as_str() < date && date <= self.next_week_end.as_str(),
            is_past: date < self.today.as_str(),
        }
    }

    pub fn is_past(&self, date: &str) -> bool {
        date < self.today.as_str()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateStatus {
    pub is_today: bool,
    pub is_tomorrow: bool,
    pub in_this_week: bool,
    pub in_next_week: bool,
    pub is_past: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBadge {
    Past,
    Today,
    Tomorrow,
    ThisWeek,
    NextWeek,
}

impl DateStatus {
    /// Display badge; past takes precedence over every other window.
    pub fn badge(self) -> Option<DateBadge> {
        if self.is_past {
            Some(DateBadge::Past)
        } else if self.is_today {
            Some(DateBadge::Today)
        } else if self.is_tomorrow {
            Some(DateBadge::Tomorrow)
        } else if self.in_this_week {
            Some(DateBadge::ThisWeek)
        } else if self.in_next_week {
            Some(DateBadge::NextWeek)
        } else {
            None
        }
    }
}

/// Produce the ordered, filtered list to display.
///
/// Pure function of its inputs; `days` must carry the "today" captured for
/// this render pass. With `show_past` off, past events are removed entirely
/// (they do not appear in counts). With it on they remain but always sort
/// after every non-past event, whatever the selected sort.
pub fn process(
    mut events: Vec<EventRecord>,
    filters: &FilterState,
    sort: SortConfig,
    show_past: bool,
    days: &DayContext,
) -> Vec<EventRecord> {
    events.retain(|event| filters.matches(event));

    if !show_past {
        events.retain(|event| event.date.as_str() >= days.today.as_str());
    }

    events.sort_by(|a, b| compare(a, b, sort, days));
    events
}

fn compare(a: &EventRecord, b: &EventRecord, sort: SortConfig, days: &DayContext) -> Ordering {
    let past_a = days.is_past(&a.date);
    let past_b = days.is_past(&b.date);
    if past_a != past_b {
        return if past_a {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    // Absent optional values compare equal on purpose; the surrounding sort
    // is stable, so such rows keep their incoming relative order.
    let (Some(left), Some(right)) = (field_value(a, sort.field), field_value(b, sort.field)) else {
        return Ordering::Equal;
    };

    let ordering = left.cmp(right);
    match sort.order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn field_value(event: &EventRecord, field: SortField) -> Option<&str> {
    match field {
        SortField::City => Some(event.city.as_str()),
        SortField::Date => Some(event.date.as_str()),
        SortField::Time => Some(event.time.as_str()),
        SortField::Venue => Some(event.venue.as_str()),
        SortField::Address => Some(event.address.as_str()),
        SortField::Brand => Some(event.brand.as_str()),
        SortField::MapLink => event.map_link.as_deref(),
        SortField::Description => event.description.as_deref(),
    }
}

pub fn date_key(date: Date) -> String {
    date.format(DATE_KEY_FORMAT).expect("valid date key")
}

/// `YYYY-MM-DD` rendered as `dd/mm/yyyy`; anything unparseable is shown
/// unchanged.
pub fn display_date(date: &str) -> String {
    match Date::parse(date, DATE_KEY_FORMAT) {
        Ok(parsed) => parsed
            .format(DISPLAY_DATE_FORMAT)
            .unwrap_or_else(|_| date.to_string()),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn event(id: &str, date: &str) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            city: "Hà Nội".to_string(),
            date: date.to_string(),
            time: "19:00 - 21:00".to_string(),
            venue: format!("Venue {id}"),
            address: format!("Address {id}"),
            map_link: None,
            brand: "Heineken".to_string(),
            description: None,
            region: None,
            outlet_id: None,
            sale_rep: None,
            bu: None,
            scale: None,
        }
    }

    fn ids(events: &[EventRecord]) -> Vec<&str> {
        events.iter().map(|event| event.id.as_str()).collect()
    }

    // 2024-06-10 is a Monday.
    fn monday_context() -> DayContext {
        DayContext::new(date!(2024 - 06 - 10))
    }

    #[test]
    fn date_bounds_are_inclusive_and_independently_optional() {
        let events = vec![
            event("a", "2024-06-01"),
            event("b", "2024-06-10"),
            event("c", "2024-06-20"),
        ];
        let days = monday_context();

        let filters = FilterState {
            date_from: "2024-06-10".to_string(),
            date_to: "2024-06-20".to_string(),
            ..Default::default()
        };
        let got = process(
            events.clone(),
            &filters,
            SortConfig::default(),
            true,
            &days,
        );
        assert_eq!(ids(&got), ["b", "c"]);

        let from_only = FilterState {
            date_from: "2024-06-10".to_string(),
            ..Default::default()
        };
        let got = process(
            events.clone(),
            &from_only,
            SortConfig::default(),
            true,
            &days,
        );
        assert_eq!(ids(&got), ["b", "c"]);

        let to_only = FilterState {
            date_to: "2024-06-01".to_string(),
            ..Default::default()
        };
        let got = process(events, &to_only, SortConfig::default(), true, &days);
        assert_eq!(ids(&got), ["a"]);
    }

    #[test]
    fn search_is_case_insensitive_over_venue_and_address_only() {
        let mut in_venue = event("a", "2024-06-11");
        in_venue.venue = "Sky Bar 360".to_string();
        let mut in_address = event("b", "2024-06-11");
        in_address.address = "54 Liễu Giai, Ba Đình".to_string();
        let mut in_description = event("c", "2024-06-11");
        in_description.description = Some("sky lounge party".to_string());

        let filters = FilterState {
            search: "SKY".to_string(),
            ..Default::default()
        };
        let got = process(
            vec![in_venue, in_address.clone(), in_description],
            &filters,
            SortConfig::default(),
            true,
            &monday_context(),
        );
        // Matching in the description alone does not count.
        assert_eq!(ids(&got), ["a"]);

        let filters = FilterState {
            search: "liễu giai".to_string(),
            ..Default::default()
        };
        let got = process(
            vec![in_address],
            &filters,
            SortConfig::default(),
            true,
            &monday_context(),
        );
        assert_eq!(ids(&got), ["b"]);
    }

    #[test]
    fn city_and_brand_filters_are_exact_and_conjunctive() {
        let mut other_city = event("a", "2024-06-11");
        other_city.city = "Đà Nẵng".to_string();
        let mut other_brand = event("b", "2024-06-11");
        other_brand.brand = "Tiger".to_string();
        let matching = event("c", "2024-06-11");

        let filters = FilterState {
            city: "Hà Nội".to_string(),
            brand: "Heineken".to_string(),
            ..Default::default()
        };
        let got = process(
            vec![other_city, other_brand, matching],
            &filters,
            SortConfig::default(),
            true,
            &monday_context(),
        );
        assert_eq!(ids(&got), ["c"]);
    }

    #[test]
    fn hiding_past_removes_past_events_entirely() {
        let events = vec![event("past", "2024-06-09"), event("today", "2024-06-10")];
        let got = process(
            events,
            &FilterState::default(),
            SortConfig::default(),
            false,
            &monday_context(),
        );
        assert_eq!(ids(&got), ["today"]);
    }

    #[test]
    fn past_events_sort_after_future_ones_when_shown() {
        let events = vec![
            event("past", "2024-06-09"),
            event("later", "2024-06-11"),
            event("today", "2024-06-10"),
        ];
        let got = process(
            events,
            &FilterState::default(),
            SortConfig::default(),
            true,
            &monday_context(),
        );
        assert_eq!(ids(&got), ["today", "later", "past"]);
    }

    #[test]
    fn descending_sort_keeps_past_events_at_the_bottom() {
        let events = vec![
            event("past", "2024-06-09"),
            event("today", "2024-06-10"),
            event("later", "2024-06-11"),
        ];
        let sort = SortConfig {
            field: SortField::Date,
            order: SortOrder::Desc,
        };
        let got = process(
            events,
            &FilterState::default(),
            sort,
            true,
            &monday_context(),
        );
        assert_eq!(ids(&got), ["later", "today", "past"]);
    }

    #[test]
    fn toggling_the_same_field_twice_returns_to_ascending() {
        let initial = SortConfig::default();
        assert_eq!(initial.field, SortField::Date);
        assert_eq!(initial.order, SortOrder::Asc);

        let once = initial.toggled(SortField::Date);
        assert_eq!(once.order, SortOrder::Desc);

        let twice = once.toggled(SortField::Date);
        assert_eq!(twice, initial);

        let other = twice.toggled(SortField::Venue);
        assert_eq!(other.field, SortField::Venue);
        assert_eq!(other.order, SortOrder::Asc);
    }

    #[test]
    fn switching_field_resets_descending_to_ascending() {
        let current = SortConfig {
            field: SortField::Date,
            order: SortOrder::Desc,
        };
        let next = current.toggled(SortField::City);
        assert_eq!(next.field, SortField::City);
        assert_eq!(next.order, SortOrder::Asc);
    }

    #[test]
    fn equal_keys_preserve_incoming_order() {
        let mut first = event("first", "2024-06-11");
        first.city = "Cần Thơ".to_string();
        let mut second = event("second", "2024-06-11");
        second.city = "Cần Thơ".to_string();

        let sort = SortConfig {
            field: SortField::City,
            order: SortOrder::Asc,
        };
        let got = process(
            vec![first, second],
            &FilterState::default(),
            sort,
            true,
            &monday_context(),
        );
        assert_eq!(ids(&got), ["first", "second"]);
    }

    #[test]
    fn absent_optional_values_compare_equal() {
        let mut described = event("described", "2024-06-11");
        described.description = Some("Acoustic night".to_string());
        let bare = event("bare", "2024-06-11");

        let sort = SortConfig {
            field: SortField::Description,
            order: SortOrder::Asc,
        };
        // "bare" has no description, so the pair compares equal and the
        // incoming order survives even though "Acoustic night" sorts first
        // among present values.
        let got = process(
            vec![bare, described],
            &FilterState::default(),
            sort,
            true,
            &monday_context(),
        );
        assert_eq!(ids(&got), ["bare", "described"]);
    }

    #[test]
    fn today_is_not_tomorrow_this_week_or_past() {
        let days = monday_context();
        let status = days.classify("2024-06-10");
        assert!(status.is_today);
        assert!(!status.is_tomorrow);
        assert!(!status.in_this_week);
        assert!(!status.is_past);
        assert_eq!(status.badge(), Some(DateBadge::Today));
    }

    #[test]
    fn tomorrow_is_suppressed_from_this_week() {
        let days = monday_context();
        let status = days.classify("2024-06-11");
        assert!(status.is_tomorrow);
        assert!(!status.in_this_week);
        assert_eq!(status.badge(), Some(DateBadge::Tomorrow));
    }

    #[test]
    fn later_days_of_the_current_week_classify_as_this_week() {
        let days = monday_context();
        let status = days.classify("2024-06-14");
        assert!(status.in_this_week);
        assert!(!status.in_next_week);
        assert_eq!(status.badge(), Some(DateBadge::ThisWeek));
    }

    #[test]
    fn next_week_window_covers_the_seven_days_after_sunday() {
        let days = monday_context();
        // This week is 2024-06-10 ..= 2024-06-16.
        assert!(!days.classify("2024-06-16").in_next_week);
        assert!(days.classify("2024-06-17").in_next_week);
        assert!(days.classify("2024-06-23").in_next_week);
        assert!(!days.classify("2024-06-24").in_next_week);
    }

    #[test]
    fn sunday_week_starts_on_the_preceding_monday() {
        // 2024-06-16 is a Sunday; its week began on 2024-06-10.
        let days = DayContext::new(date!(2024 - 06 - 16));
        assert_eq!(days.week_start, "2024-06-10");
        assert_eq!(days.week_end, "2024-06-16");
        // Wednesday of the same week is already past but inside the window.
        let status = days.classify("2024-06-12");
        assert!(status.is_past);
        assert!(status.in_this_week);
        assert_eq!(status.badge(), Some(DateBadge::Past));
    }

    #[test]
    fn past_badge_wins_over_every_window() {
        let days = monday_context();
        let status = days.classify("2024-06-03");
        assert!(status.is_past);
        assert_eq!(status.badge(), Some(DateBadge::Past));
    }

    #[test]
    fn malformed_dates_degrade_silently() {
        let events = vec![event("odd", "junk"), event("ok", "2024-06-11")];
        // "junk" > "2024-06-11" lexicographically, so the malformed row is
        // treated as future and simply sorts last; nothing errors.
        let got = process(
            events,
            &FilterState::default(),
            SortConfig::default(),
            false,
            &monday_context(),
        );
        assert_eq!(ids(&got), ["ok", "odd"]);
    }

    #[test]
    fn display_date_formats_well_formed_dates_and_passes_junk_through() {
        assert_eq!(display_date("2024-06-10"), "10/06/2024");
        assert_eq!(display_date("soon"), "soon");
        assert_eq!(display_date(""), "");
    }
}
