use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use axum::extract::Form;
use axum_extra::extract::Multipart;
use serde::Deserialize;
use tracing::warn;

use crate::application::admin::events::{AdminEventError, EventFormCommand};
use crate::application::admin::import;
use crate::application::error::HttpError;
use crate::application::repos::RepoError;
use crate::domain::brands::Brand;
use crate::domain::entities::EventRecord;
use crate::domain::schedule::DayContext;
use crate::presentation::{
    admin::views::{
        AdminEventEditTemplate, AdminEventFormView, AdminEventListView, AdminEventRowView,
        AdminEventsTemplate, AdminLayout,
    },
    views::{OptionView, render_template_response},
};

use super::{
    AdminState,
    shared::{FlashQuery, FlashTone, blank_to_empty, flash_view, redirect_with_flash},
};

const EVENTS_PATH: &str = "/events";
const TEMPLATE_FILE_NAME: &str = "Mau_Lich_Activation.csv";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct AdminEventForm {
    city: Option<String>,
    date: Option<String>,
    time: Option<String>,
    venue: Option<String>,
    address: Option<String>,
    map_link: Option<String>,
    brand: Option<String>,
    description: Option<String>,
    region: Option<String>,
    outlet_id: Option<String>,
    sale_rep: Option<String>,
    bu: Option<String>,
    scale: Option<String>,
}

impl AdminEventForm {
    fn into_command(self) -> EventFormCommand {
        EventFormCommand {
            city: blank_to_empty(self.city),
            date: blank_to_empty(self.date),
            time: blank_to_empty(self.time),
            venue: blank_to_empty(self.venue),
            address: blank_to_empty(self.address),
            map_link: blank_to_empty(self.map_link),
            brand: blank_to_empty(self.brand),
            description: blank_to_empty(self.description),
            region: blank_to_empty(self.region),
            outlet_id: blank_to_empty(self.outlet_id),
            sale_rep: blank_to_empty(self.sale_rep),
            bu: blank_to_empty(self.bu),
            scale: blank_to_empty(self.scale),
        }
    }
}

pub(super) async fn admin_events(
    State(state): State<AdminState>,
    Query(query): Query<FlashQuery>,
) -> Response {
    let events = match state.events.list().await {
        Ok(events) => events,
        Err(err) => return admin_event_error("infra::http::admin_events", err),
    };

    let days = state.events.day_context();
    let rows: Vec<AdminEventRowView> = events.iter().map(|event| row_view(event, &days)).collect();
    let content = AdminEventListView {
        count: rows.len(),
        rows,
    };
    let view = AdminLayout::new("events", flash_view(&query), content);
    render_template_response(AdminEventsTemplate { view }, StatusCode::OK)
}

pub(super) async fn admin_event_create(State(state): State<AdminState>) -> Response {
    match state.events.create_default().await {
        Ok(id) => redirect_with_flash(
            &format!("{EVENTS_PATH}/{id}/edit"),
            FlashTone::Success,
            "Đã thêm dòng mới",
        ),
        Err(err) => admin_event_error("infra::http::admin_event_create", err),
    }
}

pub(super) async fn admin_event_edit(
    State(state): State<AdminState>,
    Path(id): Path<String>,
    Query(query): Query<FlashQuery>,
) -> Response {
    match state.events.find(&id).await {
        Ok(Some(event)) => {
            let view = AdminLayout::new("events", flash_view(&query), form_view(&event));
            render_template_response(AdminEventEditTemplate { view }, StatusCode::OK)
        }
        Ok(None) => HttpError::new(
            "infra::http::admin_event_edit",
            StatusCode::NOT_FOUND,
            "Event not found",
            format!("event `{id}` does not exist"),
        )
        .into_response(),
        Err(err) => admin_event_error("infra::http::admin_event_edit", err),
    }
}

pub(super) async fn admin_event_update(
    State(state): State<AdminState>,
    Path(id): Path<String>,
    Form(form): Form<AdminEventForm>,
) -> Response {
    match state.events.update(&id, form.into_command()).await {
        Ok(()) => redirect_with_flash(EVENTS_PATH, FlashTone::Success, "Đã cập nhật sự kiện"),
        Err(AdminEventError::Repo(RepoError::NotFound)) => redirect_with_flash(
            EVENTS_PATH,
            FlashTone::Error,
            "Sự kiện không còn tồn tại",
        ),
        Err(err) => admin_event_error("infra::http::admin_event_update", err),
    }
}

pub(super) async fn admin_event_delete(
    State(state): State<AdminState>,
    Path(id): Path<String>,
) -> Response {
    match state.events.delete(&id).await {
        Ok(()) => redirect_with_flash(EVENTS_PATH, FlashTone::Success, "Đã xóa sự kiện"),
        Err(AdminEventError::Repo(RepoError::NotFound)) => redirect_with_flash(
            EVENTS_PATH,
            FlashTone::Error,
            "Sự kiện không còn tồn tại",
        ),
        Err(err) => admin_event_error("infra::http::admin_event_delete", err),
    }
}

pub(super) async fn admin_events_template() -> Response {
    let bytes = import::template_csv();
    let mut response = Response::new(Body::from(bytes));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    let disposition = format!("attachment; filename=\"{TEMPLATE_FILE_NAME}\"");
    response.headers_mut().insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
    );
    response
}

pub(super) async fn admin_events_import(
    State(state): State<AdminState>,
    mut multipart: Multipart,
) -> Response {
    let payload = match read_spreadsheet_field(&mut multipart).await {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            return redirect_with_flash(
                EVENTS_PATH,
                FlashTone::Error,
                "Chưa chọn file để nhập",
            );
        }
        Err(response) => return response,
    };

    match state.events.import_replace(&payload.0, &payload.1).await {
        Ok(count) => redirect_with_flash(
            EVENTS_PATH,
            FlashTone::Success,
            &format!("Đã nhập thành công {count} dòng từ file"),
        ),
        Err(AdminEventError::Import(err)) => {
            warn!(
                target = "fiera::http::admin_events_import",
                error = %err,
                "spreadsheet import rejected"
            );
            redirect_with_flash(
                EVENTS_PATH,
                FlashTone::Error,
                "Lỗi đọc file. Vui lòng kiểm tra định dạng.",
            )
        }
        Err(err) => admin_event_error("infra::http::admin_events_import", err),
    }
}

async fn read_spreadsheet_field(
    multipart: &mut Multipart,
) -> Result<Option<(String, Vec<u8>)>, Response> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(err) => {
                return Err(HttpError::new(
                    "infra::http::admin_events_import",
                    StatusCode::BAD_REQUEST,
                    "Malformed upload",
                    err.to_string(),
                )
                .into_response());
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                return Err(HttpError::new(
                    "infra::http::admin_events_import",
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "Upload too large",
                    err.to_string(),
                )
                .into_response());
            }
        };

        return Ok(Some((filename, bytes.to_vec())));
    }
}

fn row_view(event: &EventRecord, days: &DayContext) -> AdminEventRowView {
    AdminEventRowView {
        id: event.id.clone(),
        city: event.city.clone(),
        date: event.date.clone(),
        time: event.time.clone(),
        venue: event.venue.clone(),
        address: event.address.clone(),
        brand: event.brand.clone(),
        is_past: days.is_past(&event.date),
    }
}

fn form_view(event: &EventRecord) -> AdminEventFormView {
    AdminEventFormView {
        id: event.id.clone(),
        city: event.city.clone(),
        date: event.date.clone(),
        time: event.time.clone(),
        venue: event.venue.clone(),
        address: event.address.clone(),
        map_link: event.map_link.clone().unwrap_or_default(),
        brand: event.brand.clone(),
        description: event.description.clone().unwrap_or_default(),
        region: event.region.clone().unwrap_or_default(),
        outlet_id: event.outlet_id.clone().unwrap_or_default(),
        sale_rep: event.sale_rep.clone().unwrap_or_default(),
        bu: event.bu.clone().unwrap_or_default(),
        scale: event.scale.clone().unwrap_or_default(),
        brands: Brand::ALL
            .iter()
            .map(|brand| OptionView {
                value: brand.label().to_string(),
                is_active: event.brand == brand.label(),
            })
            .collect(),
        form_action: format!("{EVENTS_PATH}/{}/edit", event.id),
    }
}

pub(super) fn admin_event_error(source: &'static str, err: AdminEventError) -> Response {
    match err {
        AdminEventError::Repo(RepoError::NotFound) => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Event not found",
            "event does not exist",
        )
        .into_response(),
        AdminEventError::Import(err) => HttpError::new(
            source,
            StatusCode::BAD_REQUEST,
            "Spreadsheet could not be imported",
            err.to_string(),
        )
        .into_response(),
    }
}
