use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use fiera::{
    application::admin::{
        events::AdminEventService, settings::AdminSettingsService, uploads::AdminUploadService,
    },
    infra::{
        http::{AdminState, build_admin_router},
        memstore::MemoryStore,
        uploads::UploadStore,
    },
    util::timezone,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

const TZ: chrono_tz::Tz = chrono_tz::Asia::Ho_Chi_Minh;
const BODY_LIMIT: usize = 10 * 1024 * 1024;
const IMAGE_LIMIT: u64 = 64 * 1024;

fn admin_router() -> Router {
    let store = Arc::new(MemoryStore::seeded(timezone::today(TZ)));
    let uploads = Arc::new(UploadStore::new());

    let state = AdminState {
        events: Arc::new(AdminEventService::new(store.clone(), TZ)),
        settings: Arc::new(AdminSettingsService::new(store)),
        uploads: Arc::new(AdminUploadService::new(uploads, IMAGE_LIMIT)),
    };
    build_admin_router(state, BODY_LIMIT)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("response");

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    (status, location, String::from_utf8_lossy(&body).to_string())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded; charset=utf-8",
        )
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn multipart_post(uri: &str, field: &str, filename: &str, content_type: &str, payload: &[u8]) -> Request<Body> {
    let boundary = "fiera-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; \
             filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("request")
}

#[tokio::test]
async fn dashboard_shows_the_working_set_counts() {
    let router = admin_router();
    let (status, _, body) = send(&router, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Sự kiện"));
    assert!(body.contains("Chương trình"));
}

#[tokio::test]
async fn events_list_shows_seeded_rows() {
    let router = admin_router();
    let (status, _, body) = send(&router, get("/events")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Sky Bar 360"));
    assert!(body.contains("5 dòng"));
}

#[tokio::test]
async fn create_redirects_to_the_new_edit_form() {
    let router = admin_router();
    let (status, location, _) = send(&router, form_post("/events/create", "")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let location = location.expect("location");
    assert!(location.starts_with("/events/new-"));
    assert!(location.contains("/edit"));

    let (_, _, body) = send(&router, get("/events")).await;
    assert!(body.contains("6 dòng"));
}

#[tokio::test]
async fn edit_form_round_trips_field_changes() {
    let router = admin_router();
    let (status, location, _) = send(
        &router,
        form_post(
            "/events/1/edit",
            "city=Hu%E1%BA%BF&date=2030-01-02&time=20%3A00&venue=Quan+Moi&address=1+Le+Loi&map_link=&brand=Tiger&description=",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(location.expect("location").starts_with("/events?notice="));

    let (_, _, body) = send(&router, get("/events/1/edit")).await;
    assert!(body.contains("Quan Moi"));
    assert!(body.contains("2030-01-02"));
}

#[tokio::test]
async fn editing_a_ghost_event_is_not_found() {
    let router = admin_router();
    let (status, _, _) = send(&router, get("/events/ghost/edit")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_row_and_flashes() {
    let router = admin_router();
    let (status, location, _) = send(&router, form_post("/events/2/delete", "")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(location.expect("location").contains("notice="));

    let (_, _, body) = send(&router, get("/events")).await;
    assert!(!body.contains("Beer Club Vuvuzela"));
    assert!(body.contains("4 dòng"));
}

#[tokio::test]
async fn csv_import_replaces_the_schedule() {
    let router = admin_router();
    let csv = "Thành phố,Ngày,Giờ,Tên quán,Địa chỉ,Brand\n\
               Vinh,2030-05-01,19:00,Quán Nhập,12 Quang Trung,Larue\n";
    let (status, location, _) = send(
        &router,
        multipart_post("/events/import", "file", "rows.csv", "text/csv", csv.as_bytes()),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(location.expect("location").contains("notice="));

    let (_, _, body) = send(&router, get("/events")).await;
    assert!(body.contains("Quán Nhập"));
    assert!(!body.contains("Sky Bar 360"));
    assert!(body.contains("1 dòng"));
}

#[tokio::test]
async fn broken_spreadsheet_flashes_an_error_and_keeps_data() {
    let router = admin_router();
    let (status, location, _) = send(
        &router,
        multipart_post(
            "/events/import",
            "file",
            "rows.xlsx",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            b"definitely not a workbook",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(location.expect("location").contains("tone=error"));

    let (_, _, body) = send(&router, get("/events")).await;
    assert!(body.contains("Sky Bar 360"));
}

#[tokio::test]
async fn template_csv_downloads_with_bilingual_headers() {
    let router = admin_router();
    let response = router
        .clone()
        .oneshot(get("/events/template.csv"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("text/csv; charset=utf-8")
    );
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let text = String::from_utf8_lossy(&body);
    assert!(text.contains("Thành phố"));
    assert!(text.contains("Link bản đồ"));
}

#[tokio::test]
async fn settings_save_replaces_the_snapshot() {
    let router = admin_router();
    let (status, location, _) = send(
        &router,
        form_post(
            "/settings",
            "logo_url=%2Fuploads%2Flogo.png&hero_image=x&hero_title=Ti%C3%AAu+%C4%91%E1%BB%81+m%E1%BB%9Bi&hero_subtitle=s&cta_title=c&cta_description=d&schedule_title=L%E1%BB%8Bch+m%E1%BB%9Bi&schedule_subtitle=s",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(location.expect("location").starts_with("/settings?notice="));

    let (_, _, body) = send(&router, get("/settings")).await;
    assert!(body.contains("Tiêu đề mới"));
    assert!(body.contains("Lịch mới"));
}

#[tokio::test]
async fn blank_required_setting_flashes_an_error() {
    let router = admin_router();
    let (status, location, _) = send(
        &router,
        form_post(
            "/settings",
            "logo_url=x&hero_image=x&hero_title=&hero_subtitle=s&cta_title=c&cta_description=d&schedule_title=t&schedule_subtitle=s",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(location.expect("location").contains("tone=error"));
}

#[tokio::test]
async fn promotion_edit_updates_the_card() {
    let router = admin_router();
    let (status, location, _) = send(
        &router,
        form_post(
            "/promotions/2/edit",
            "title=Tiger+Remix&image=x&brand=Tiger&kind=awo&content=A%0AB",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(location.expect("location").starts_with("/promotions/2/edit?notice="));

    let (_, _, body) = send(&router, get("/promotions")).await;
    assert!(body.contains("Tiger Remix"));
}

#[tokio::test]
async fn image_upload_sets_the_logo_and_serves_from_memory() {
    let router = admin_router();
    let (status, location, _) = send(
        &router,
        multipart_post(
            "/settings/logo-image",
            "image",
            "logo.png",
            "image/png",
            b"tiny png payload",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(!location.expect("location").contains("tone=error"));

    let (_, _, body) = send(&router, get("/settings")).await;
    assert!(body.contains("/uploads/"));
}

#[tokio::test]
async fn oversized_image_is_rejected_with_a_size_notice() {
    let router = admin_router();
    let payload = vec![0u8; (IMAGE_LIMIT + 1) as usize];
    let (status, location, _) = send(
        &router,
        multipart_post("/settings/hero-image", "image", "big.png", "image/png", &payload),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(location.expect("location").contains("tone=error"));

    // The previous hero image is untouched.
    let (_, _, body) = send(&router, get("/settings")).await;
    assert!(body.contains("unsplash.com"));
}
