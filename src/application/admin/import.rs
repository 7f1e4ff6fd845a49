//! Spreadsheet ingestion for the bulk-import pathway.
//!
//! Columns are matched by recognised header names in Vietnamese or English;
//! unrecognised or missing columns default to empty strings. Values are not
//! validated: date format, brand membership, and URL shape all pass through
//! untouched. Every row receives a fresh unique id.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::EventRecord;

/// Header row of the downloadable import template, mirrored by `recognize`.
pub const TEMPLATE_HEADERS: [&str; 8] = [
    "Thành phố",
    "Ngày",
    "Giờ",
    "Tên quán",
    "Địa chỉ",
    "Link bản đồ",
    "Brand",
    "Ghi chú",
];

const TEMPLATE_SAMPLE_ROW: [&str; 8] = [
    "Hà Nội",
    "2023-12-01",
    "19:30 - 21:30",
    "Tên quán mẫu",
    "123 Đường ABC",
    "https://goo.gl/maps/xyz",
    "Tiger",
    "Mô tả sự kiện",
];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported spreadsheet format `{0}`")]
    UnsupportedFormat(String),
    #[error("workbook could not be read: {0}")]
    Workbook(String),
    #[error("workbook contains no sheets")]
    NoSheet,
    #[error("csv could not be read: {0}")]
    Csv(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    City,
    Date,
    Time,
    Venue,
    Address,
    MapLink,
    Brand,
    Description,
    Region,
    OutletId,
    SaleRep,
    Bu,
    Scale,
}

fn recognize(header: &str) -> Option<Column> {
    match header.trim().to_lowercase().as_str() {
        "thành phố" | "city" => Some(Column::City),
        "ngày" | "date" => Some(Column::Date),
        "giờ" | "time" => Some(Column::Time),
        "tên quán" | "venue" => Some(Column::Venue),
        "địa chỉ" | "address" => Some(Column::Address),
        "link" | "map link" | "link bản đồ" => Some(Column::MapLink),
        "brand" => Some(Column::Brand),
        "ghi chú" | "description" => Some(Column::Description),
        "region" => Some(Column::Region),
        "outlet id" => Some(Column::OutletId),
        "sale rep" => Some(Column::SaleRep),
        "bu" => Some(Column::Bu),
        "scale" => Some(Column::Scale),
        _ => None,
    }
}

/// Parse an uploaded spreadsheet into event rows. The format is picked from
/// the file extension; `.csv` goes through the csv reader, Excel formats
/// through calamine.
pub fn parse_spreadsheet(filename: &str, bytes: &[u8]) -> Result<Vec<EventRecord>, ImportError> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => parse_csv(bytes),
        "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => parse_workbook(bytes),
        other => Err(ImportError::UnsupportedFormat(other.to_string())),
    }
}

fn parse_workbook(bytes: &[u8]) -> Result<Vec<EventRecord>, ImportError> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook =
        open_workbook_auto_from_rs(cursor).map_err(|err| ImportError::Workbook(err.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ImportError::NoSheet)?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|err| ImportError::Workbook(err.to_string()))?;

    let mut rows = range.rows().map(|row| {
        row.iter()
            .map(cell_to_string)
            .collect::<Vec<String>>()
    });

    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };

    Ok(rows_to_events(&header, rows))
}

fn parse_csv(bytes: &[u8]) -> Result<Vec<EventRecord>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| ImportError::Csv(err.to_string()))?;
        rows.push(
            record
                .iter()
                .map(|cell| cell.trim().to_string())
                .collect::<Vec<String>>(),
        );
    }

    let mut rows = rows.into_iter();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };

    Ok(rows_to_events(&header, rows))
}

fn rows_to_events(
    header: &[String],
    rows: impl Iterator<Item = Vec<String>>,
) -> Vec<EventRecord> {
    let columns: Vec<Option<Column>> = header.iter().map(|cell| recognize(cell)).collect();

    rows.filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .map(|row| row_to_event(&columns, &row))
        .collect()
}

fn row_to_event(columns: &[Option<Column>], row: &[String]) -> EventRecord {
    let mut event = EventRecord {
        id: format!("import-{}", Uuid::new_v4()),
        city: String::new(),
        date: String::new(),
        time: String::new(),
        venue: String::new(),
        address: String::new(),
        map_link: None,
        brand: String::new(),
        description: None,
        region: None,
        outlet_id: None,
        sale_rep: None,
        bu: None,
        scale: None,
    };

    for (index, column) in columns.iter().enumerate() {
        let Some(column) = column else { continue };
        let value = row.get(index).map(|cell| cell.trim()).unwrap_or_default();

        match column {
            Column::City => event.city = value.to_string(),
            Column::Date => event.date = value.to_string(),
            Column::Time => event.time = value.to_string(),
            Column::Venue => event.venue = value.to_string(),
            Column::Address => event.address = value.to_string(),
            Column::Brand => event.brand = value.to_string(),
            Column::MapLink => event.map_link = optional(value),
            Column::Description => event.description = optional(value),
            Column::Region => event.region = optional(value),
            Column::OutletId => event.outlet_id = optional(value),
            Column::SaleRep => event.sale_rep = optional(value),
            Column::Bu => event.bu = optional(value),
            Column::Scale => event.scale = optional(value),
        }
    }

    event
}

fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(value) => value.trim().to_string(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => {
            if value.fract() == 0.0 {
                format!("{}", *value as i64)
            } else {
                value.to_string()
            }
        }
        Data::Bool(value) => value.to_string(),
        Data::DateTime(value) => value
            .as_datetime()
            .map(|datetime| datetime.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(value) => value.trim().to_string(),
        Data::DurationIso(value) => value.trim().to_string(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

/// The CSV template offered for download next to the import control.
pub fn template_csv() -> Vec<u8> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(TEMPLATE_HEADERS)
        .and_then(|()| writer.write_record(TEMPLATE_SAMPLE_ROW))
        .expect("in-memory csv write");
    writer.into_inner().expect("in-memory csv flush")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_bytes(content: &str) -> Vec<u8> {
        content.as_bytes().to_vec()
    }

    #[test]
    fn vietnamese_headers_map_to_event_fields() {
        let data = csv_bytes(
            "Thành phố,Ngày,Giờ,Tên quán,Địa chỉ,Link bản đồ,Brand,Ghi chú\n\
             Hà Nội,2024-07-01,19:00 - 21:00,Sky Bar,54 Liễu Giai,https://maps.example/x,Heineken,Đêm nhạc\n",
        );
        let events = parse_spreadsheet("rows.csv", &data).expect("parse");
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.city, "Hà Nội");
        assert_eq!(event.date, "2024-07-01");
        assert_eq!(event.venue, "Sky Bar");
        assert_eq!(event.map_link.as_deref(), Some("https://maps.example/x"));
        assert_eq!(event.description.as_deref(), Some("Đêm nhạc"));
    }

    #[test]
    fn english_headers_are_equivalent() {
        let data = csv_bytes(
            "City,Date,Time,Venue,Address,Map Link,Brand,Description\n\
             Đà Nẵng,2024-07-02,18:00,Golden Pine,52 Bạch Đằng,,Larue,\n",
        );
        let events = parse_spreadsheet("rows.csv", &data).expect("parse");
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.city, "Đà Nẵng");
        assert_eq!(event.brand, "Larue");
        assert_eq!(event.map_link, None);
        assert_eq!(event.description, None);
    }

    #[test]
    fn unrecognised_columns_are_ignored_and_missing_fields_stay_empty() {
        let data = csv_bytes(
            "Whatever,City\n\
             noise,Hải Phòng\n",
        );
        let events = parse_spreadsheet("rows.csv", &data).expect("parse");
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.city, "Hải Phòng");
        assert_eq!(event.date, "");
        assert_eq!(event.venue, "");
        assert_eq!(event.brand, "");
    }

    #[test]
    fn every_imported_row_gets_a_distinct_id() {
        let data = csv_bytes(
            "City,Venue\n\
             A,Bar 1\n\
             B,Bar 2\n\
             C,Bar 3\n",
        );
        let events = parse_spreadsheet("rows.csv", &data).expect("parse");
        let mut ids: Vec<&str> = events.iter().map(|event| event.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert!(events.iter().all(|event| event.id.starts_with("import-")));
    }

    #[test]
    fn malformed_dates_pass_through_unvalidated() {
        let data = csv_bytes("Date\nnext friday\n");
        let events = parse_spreadsheet("rows.csv", &data).expect("parse");
        assert_eq!(events[0].date, "next friday");
    }

    #[test]
    fn blank_rows_are_skipped() {
        let data = csv_bytes("City,Venue\n,\nHuế,Bar\n");
        let events = parse_spreadsheet("rows.csv", &data).expect("parse");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].city, "Huế");
    }

    #[test]
    fn unsupported_extensions_are_rejected() {
        assert!(matches!(
            parse_spreadsheet("rows.pdf", b"%PDF"),
            Err(ImportError::UnsupportedFormat(ext)) if ext == "pdf"
        ));
    }

    #[test]
    fn extension_matching_ignores_case() {
        let data = csv_bytes("City\nVinh\n");
        let events = parse_spreadsheet("ROWS.CSV", &data).expect("parse");
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn template_round_trips_through_the_parser() {
        let template = template_csv();
        let events = parse_spreadsheet("template.csv", &template).expect("parse template");
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.city, "Hà Nội");
        assert_eq!(event.date, "2023-12-01");
        assert_eq!(event.brand, "Tiger");
    }

    #[test]
    fn corrupt_workbooks_surface_a_workbook_error() {
        let result = parse_spreadsheet("rows.xlsx", b"this is not a zip archive");
        assert!(matches!(result, Err(ImportError::Workbook(_))));
    }
}
