use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::application::error::{ErrorReport, HttpError};

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(chrome: LayoutChrome) -> Response {
    let content = ErrorPageView::not_found();
    let view = LayoutContext::new(chrome, content);
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

/// Shared page furniture: logo and the program dropdown.
#[derive(Clone)]
pub struct LayoutChrome {
    pub logo_url: String,
    pub activation_programs: Vec<NavProgramView>,
    pub awo_programs: Vec<NavProgramView>,
}

#[derive(Clone)]
pub struct NavProgramView {
    pub id: String,
    pub title: String,
    pub brand: String,
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub chrome: LayoutChrome,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self { chrome, content }
    }
}

#[derive(Clone)]
pub struct PromoCard {
    pub id: String,
    pub title: String,
    pub image: String,
    pub brand: String,
    pub tone_class: &'static str,
}

pub struct HomeContext {
    pub hero_image: String,
    pub hero_title_lines: Vec<String>,
    pub hero_subtitle_lines: Vec<String>,
    pub promos: Vec<PromoCard>,
    pub cta_title: String,
    pub cta_description: String,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub view: LayoutContext<HomeContext>,
}

#[derive(Clone)]
pub struct OptionView {
    pub value: String,
    pub is_active: bool,
}

pub struct FilterBarView {
    pub search: String,
    pub city: String,
    pub brand: String,
    pub date_from: String,
    pub date_to: String,
    pub hide_past: bool,
    pub cities: Vec<OptionView>,
    pub brands: Vec<OptionView>,
    /// Non-empty only when the sort differs from the default, so the filter
    /// form can carry it across submissions as hidden inputs.
    pub sort_value: String,
    pub order_value: String,
}

pub enum SortIndicator {
    Inactive,
    Asc,
    Desc,
}

pub struct SortHeaderView {
    pub label: &'static str,
    pub href: String,
    pub indicator: SortIndicator,
}

#[derive(Clone)]
pub struct DateBadgeView {
    pub label: &'static str,
    pub css_class: &'static str,
}

#[derive(Clone)]
pub struct EventDetailView {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone)]
pub struct EventRowView {
    pub city: String,
    pub date_display: String,
    pub time: String,
    pub venue: String,
    pub address: String,
    pub map_url: String,
    pub has_custom_map_link: bool,
    pub brand: String,
    pub brand_tone: &'static str,
    pub description: Option<String>,
    pub badge: Option<DateBadgeView>,
    pub is_past: bool,
    pub details: Vec<EventDetailView>,
}

pub struct SchedulePageContext {
    pub heading: String,
    pub subtitle: String,
    pub filters: FilterBarView,
    pub columns: Vec<SortHeaderView>,
    pub rows: Vec<EventRowView>,
    pub result_count: usize,
    pub has_results: bool,
}

#[derive(Template)]
#[template(path = "schedule.html")]
pub struct ScheduleTemplate {
    pub view: LayoutContext<SchedulePageContext>,
}

pub struct ProgramListContext {
    pub activation: Vec<PromoCard>,
    pub awo: Vec<PromoCard>,
}

#[derive(Template)]
#[template(path = "programs.html")]
pub struct ProgramListTemplate {
    pub view: LayoutContext<ProgramListContext>,
}

pub struct ProgramDetailContext {
    pub title: String,
    pub image: String,
    pub brand: String,
    pub tone_class: &'static str,
    pub kind_label: &'static str,
    pub paragraphs: Vec<String>,
}

#[derive(Template)]
#[template(path = "program.html")]
pub struct ProgramTemplate {
    pub view: LayoutContext<ProgramDetailContext>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Không tìm thấy trang".to_string(),
            message: "Trang bạn yêu cầu không tồn tại. Hãy quay lại trang chủ để tiếp tục."
                .to_string(),
            primary_action: Some(ErrorAction::home()),
        }
    }
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn home() -> Self {
        Self {
            href: "/".to_string(),
            label: "Về trang chủ".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}

/// Split pre-line copy into displayable lines, dropping blank ones.
pub fn copy_lines(value: &str) -> Vec<String> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
