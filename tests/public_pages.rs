use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use bytes::Bytes;
use fiera::{
    application::{schedule::ScheduleService, site::SiteService},
    domain::{entities::EventRecord, schedule::date_key, seed},
    infra::{
        http::{HttpState, build_router},
        memstore::MemoryStore,
        uploads::UploadStore,
    },
    util::timezone,
};
use http_body_util::BodyExt;
use time::Duration;
use tower::ServiceExt;

const TZ: chrono_tz::Tz = chrono_tz::Asia::Ho_Chi_Minh;

fn state_with_store(store: Arc<MemoryStore>) -> (HttpState, Arc<UploadStore>) {
    let uploads = Arc::new(UploadStore::new());
    let state = HttpState {
        schedule: Arc::new(ScheduleService::new(store.clone(), store.clone(), TZ)),
        site: Arc::new(SiteService::new(store)),
        uploads: uploads.clone(),
    };
    (state, uploads)
}

/// Router over the demo seed, pinned so the first event lands on the real
/// "today" in the service timezone.
fn router() -> Router {
    let store = Arc::new(MemoryStore::seeded(timezone::today(TZ)));
    let (state, _) = state_with_store(store);
    build_router(state)
}

fn upcoming_event(id: &str, days_ahead: i64, map_link: Option<&str>) -> EventRecord {
    EventRecord {
        id: id.to_string(),
        city: "Hà Nội".to_string(),
        date: date_key(timezone::today(TZ) + Duration::days(days_ahead)),
        time: "19:00 - 21:00".to_string(),
        venue: format!("Venue {id}"),
        address: format!("Address {id}"),
        map_link: map_link.map(str::to_string),
        brand: "Heineken".to_string(),
        description: None,
        region: None,
        outlet_id: None,
        sale_rep: None,
        bu: None,
        scale: None,
    }
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    (status, String::from_utf8_lossy(&body).to_string())
}

#[tokio::test]
async fn homepage_renders_hero_and_promotions() {
    let (status, body) = get(router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Khuấy Động Cuộc Vui"));
    assert!(body.contains("Heineken - Nhẹ Êm Mà Đậm Chất"));
    assert!(body.contains("Tìm quán ngay!"));
}

#[tokio::test]
async fn schedule_lists_seeded_events_with_count() {
    let (status, body) = get(router(), "/schedule").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Sky Bar 360"));
    assert!(body.contains("Hiển thị <strong>5</strong> kết quả"));
}

#[tokio::test]
async fn todays_seed_event_carries_the_today_chip() {
    let (_, body) = get(router(), "/schedule").await;
    assert!(body.contains("Hôm nay"));
}

#[tokio::test]
async fn hiding_past_events_removes_them_from_the_count() {
    // Everything but the "today" seed event is dated 2023.
    let (status, body) = get(router(), "/schedule?past=0").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Sky Bar 360"));
    assert!(!body.contains("Beer Club Vuvuzela"));
    assert!(body.contains("Hiển thị <strong>1</strong> kết quả"));
}

#[tokio::test]
async fn schedule_search_filters_on_venue_and_address() {
    let (status, body) = get(router(), "/schedule?search=vuvuzela").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Beer Club Vuvuzela"));
    assert!(!body.contains("Sky Bar 360"));
    assert!(body.contains("Hiển thị <strong>1</strong> kết quả"));
}

#[tokio::test]
async fn schedule_city_filter_is_exact() {
    let (status, body) = get(router(), "/schedule?city=H%C3%A0%20N%E1%BB%99i").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Sky Bar 360"));
    assert!(body.contains("Tạ Hiện Corner"));
    assert!(!body.contains("Sailing Club"));
}

#[tokio::test]
async fn schedule_with_impossible_filter_shows_empty_state() {
    let (status, body) = get(router(), "/schedule?search=zzzznothing").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Không tìm thấy sự kiện nào"));
}

#[tokio::test]
async fn schedule_headers_link_to_toggled_sort_state() {
    // Default sort is date ascending, so the date column links to descending.
    let (_, body) = get(router(), "/schedule").await;
    assert!(body.contains("sort=date"));
    assert!(body.contains("order=desc"));
}

#[tokio::test]
async fn upcoming_rows_link_custom_or_synthesized_map_urls() {
    let store = Arc::new(MemoryStore::with_state(
        vec![
            upcoming_event("custom", 3, Some("https://goo.gl/maps/custom-link")),
            upcoming_event("plain", 4, None),
        ],
        seed::default_settings(),
    ));
    let (state, _) = state_with_store(store);

    let (status, body) = get(build_router(state), "/schedule").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("https://goo.gl/maps/custom-link"));
    assert!(body.contains("https://www.google.com/maps/search/"));
}

#[tokio::test]
async fn past_rows_lose_their_map_link() {
    let (_, body) = get(router(), "/schedule").await;
    // The 2023 seed row carries a custom link that must not be rendered.
    assert!(!body.contains("https://goo.gl/maps/example"));
}

#[tokio::test]
async fn program_detail_renders_paragraphs() {
    let (status, body) = get(router(), "/programs/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Heineken - Nhẹ Êm Mà Đậm Chất"));
    assert!(body.contains("beer club"));
}

#[tokio::test]
async fn unknown_program_is_styled_not_found() {
    let (status, body) = get(router(), "/programs/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Không tìm thấy trang"));
}

#[tokio::test]
async fn program_list_groups_by_kind() {
    let (status, body) = get(router(), "/programs").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Activation"));
    assert!(body.contains("AWO"));
    assert!(body.contains("Strongbow - Cider Chill Phết"));
}

#[tokio::test]
async fn fallback_renders_styled_not_found() {
    let (status, body) = get(router(), "/no-such-page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Không tìm thấy trang"));
}

#[tokio::test]
async fn health_endpoint_answers_no_content() {
    let (status, _) = get(router(), "/_health").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn embedded_css_is_served() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/static/public/site.css")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("text/css")
    );
}

#[tokio::test]
async fn stored_uploads_are_served_with_their_content_type() {
    let store = Arc::new(MemoryStore::seeded(timezone::today(TZ)));
    let (state, uploads) = state_with_store(store);
    let name = uploads.store(
        "logo.png",
        Some("image/png"),
        Bytes::from_static(b"fake png bytes"),
    );

    let response = build_router(state)
        .oneshot(
            Request::builder()
                .uri(format!("/uploads/{name}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("image/png")
    );
}

#[tokio::test]
async fn missing_upload_is_not_found() {
    let (status, _) = get(router(), "/uploads/nope.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
