mod dashboard;
mod events;
mod settings;
mod shared;
mod state;
mod uploads;

pub use state::AdminState;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

use crate::infra::assets;

use super::middleware::{log_responses, set_request_context};

pub fn build_admin_router(state: AdminState, upload_body_limit: usize) -> Router {
    Router::new()
        .route("/", get(dashboard::admin_dashboard))
        .route("/events", get(events::admin_events))
        .route("/events/create", post(events::admin_event_create))
        .route(
            "/events/{id}/edit",
            get(events::admin_event_edit).post(events::admin_event_update),
        )
        .route("/events/{id}/delete", post(events::admin_event_delete))
        .route("/events/import", post(events::admin_events_import))
        .route("/events/template.csv", get(events::admin_events_template))
        .route(
            "/settings",
            get(settings::admin_settings).post(settings::admin_settings_update),
        )
        .route("/settings/logo-image", post(uploads::admin_logo_image))
        .route("/settings/hero-image", post(uploads::admin_hero_image))
        .route("/promotions", get(settings::admin_promotions))
        .route(
            "/promotions/{id}/edit",
            get(settings::admin_promotion_edit).post(settings::admin_promotion_update),
        )
        .route(
            "/promotions/{id}/image",
            post(uploads::admin_promotion_image),
        )
        .route("/static/admin/{*path}", get(assets::serve_admin))
        .with_state(state)
        .layer(DefaultBodyLimit::max(upload_body_limit))
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}
