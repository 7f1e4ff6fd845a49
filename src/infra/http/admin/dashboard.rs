use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::presentation::{
    admin::views::{AdminDashboardTemplate, AdminDashboardView, AdminLayout},
    views::render_template_response,
};

use super::{
    AdminState,
    shared::{FlashQuery, flash_view},
};

pub(super) async fn admin_dashboard(
    State(state): State<AdminState>,
    Query(query): Query<FlashQuery>,
) -> Response {
    let overview = match state.events.overview().await {
        Ok(overview) => overview,
        Err(err) => return super::events::admin_event_error("infra::http::admin_dashboard", err),
    };

    let settings = match state.settings.load().await {
        Ok(settings) => settings,
        Err(err) => {
            return super::settings::admin_settings_error("infra::http::admin_dashboard", err)
                .into_response();
        }
    };

    let content = AdminDashboardView {
        total_events: overview.total,
        upcoming_events: overview.upcoming,
        past_events: overview.past,
        promotions: settings.promotions.len(),
    };
    let view = AdminLayout::new("dashboard", flash_view(&query), content);
    render_template_response(AdminDashboardTemplate { view }, StatusCode::OK)
}
