use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;
use time::{Date, Month};

/// Calendar date of `instant` in the given timezone, bridged into `time::Date`.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> Date {
    let localized = tz.from_utc_datetime(&instant.naive_utc());
    let month = Month::try_from(localized.month() as u8)
        .expect("valid month value from chrono to time conversion");
    let day =
        u8::try_from(localized.day()).expect("valid day value from chrono to time conversion");
    Date::from_calendar_date(localized.year(), month, day).expect("valid calendar date")
}

/// Today's calendar date in the given timezone.
pub fn today(tz: Tz) -> Date {
    local_date(Utc::now(), tz)
}
