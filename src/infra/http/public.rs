use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;

use crate::{
    application::{
        error::HttpError,
        schedule::{ScheduleQuery, ScheduleService},
        site::SiteService,
    },
    domain::schedule::{FilterState, SortConfig, SortField, SortOrder},
    infra::{assets, uploads::UploadStore},
    presentation::views::{
        HomeTemplate, LayoutContext, ProgramListTemplate, ProgramTemplate, ScheduleTemplate,
        render_not_found_response, render_template_response,
    },
};

use super::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub schedule: Arc<ScheduleService>,
    pub site: Arc<SiteService>,
    pub uploads: Arc<UploadStore>,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/schedule", get(schedule_page))
        .route("/programs", get(program_list))
        .route("/programs/{id}", get(program_detail))
        .route("/uploads/{*path}", get(serve_upload))
        .route("/static/public/{*path}", get(assets::serve_public))
        .route("/_health", get(health))
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ScheduleParams {
    search: Option<String>,
    city: Option<String>,
    brand: Option<String>,
    from: Option<String>,
    to: Option<String>,
    sort: Option<String>,
    order: Option<String>,
    past: Option<String>,
}

impl ScheduleParams {
    fn into_query(self) -> ScheduleQuery {
        let field = self
            .sort
            .as_deref()
            .and_then(SortField::parse)
            .unwrap_or_default();
        let order = self
            .order
            .as_deref()
            .and_then(SortOrder::parse)
            .unwrap_or_default();

        ScheduleQuery {
            filters: FilterState {
                search: self.search.unwrap_or_default(),
                city: self.city.unwrap_or_default(),
                brand: self.brand.unwrap_or_default(),
                date_from: self.from.unwrap_or_default(),
                date_to: self.to.unwrap_or_default(),
            },
            sort: SortConfig { field, order },
            show_past: self.past.as_deref() != Some("0"),
        }
    }
}

async fn home(State(state): State<HttpState>) -> Response {
    let chrome = match state.site.chrome().await {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    match state.site.home().await {
        Ok(content) => {
            let view = LayoutContext::new(chrome, content);
            render_template_response(HomeTemplate { view }, StatusCode::OK)
        }
        Err(err) => err.into_response(),
    }
}

async fn schedule_page(
    State(state): State<HttpState>,
    Query(params): Query<ScheduleParams>,
) -> Response {
    let chrome = match state.site.chrome().await {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    let query = params.into_query();
    match state.schedule.page_context(&query).await {
        Ok(content) => {
            let view = LayoutContext::new(chrome, content);
            render_template_response(ScheduleTemplate { view }, StatusCode::OK)
        }
        Err(err) => err.into_response(),
    }
}

async fn program_list(State(state): State<HttpState>) -> Response {
    let chrome = match state.site.chrome().await {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    match state.site.program_list().await {
        Ok(content) => {
            let view = LayoutContext::new(chrome, content);
            render_template_response(ProgramListTemplate { view }, StatusCode::OK)
        }
        Err(err) => err.into_response(),
    }
}

async fn program_detail(State(state): State<HttpState>, Path(id): Path<String>) -> Response {
    let chrome = match state.site.chrome().await {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    match state.site.program_detail(&id).await {
        Ok(Some(content)) => {
            let view = LayoutContext::new(chrome, content);
            render_template_response(ProgramTemplate { view }, StatusCode::OK)
        }
        Ok(None) => render_not_found_response(chrome),
        Err(err) => err.into_response(),
    }
}

async fn serve_upload(State(state): State<HttpState>, Path(path): Path<String>) -> Response {
    const SOURCE: &str = "infra::http::public::serve_upload";

    match state.uploads.get(&path) {
        Some(stored) => {
            let mut response = Response::new(Body::from(stored.bytes));
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_str(&stored.content_type)
                    .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
            );
            response
        }
        None => HttpError::new(
            SOURCE,
            StatusCode::NOT_FOUND,
            "Upload not found",
            "The requested upload is not available",
        )
        .into_response(),
    }
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn fallback(State(state): State<HttpState>) -> Response {
    match state.site.chrome().await {
        Ok(chrome) => render_not_found_response(chrome),
        Err(err) => err.into_response(),
    }
}
