use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use url::form_urlencoded;

use crate::presentation::admin::views::AdminFlashView;

/// Flash notices travel as query parameters on the post-redirect GET.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct FlashQuery {
    pub(super) notice: Option<String>,
    pub(super) tone: Option<String>,
}

#[derive(Clone, Copy)]
pub(super) enum FlashTone {
    Success,
    Error,
}

impl FlashTone {
    fn as_kind(self) -> &'static str {
        match self {
            FlashTone::Success => "success",
            FlashTone::Error => "error",
        }
    }
}

pub(super) fn flash_view(query: &FlashQuery) -> Option<AdminFlashView> {
    let text = query.notice.as_deref()?.trim();
    if text.is_empty() {
        return None;
    }

    let kind = match query.tone.as_deref() {
        Some("error") => "error",
        _ => "success",
    };

    Some(AdminFlashView {
        kind,
        text: text.to_string(),
    })
}

pub(super) fn redirect_with_flash(path: &str, tone: FlashTone, message: &str) -> Response {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair("notice", message);
    if matches!(tone, FlashTone::Error) {
        serializer.append_pair("tone", tone.as_kind());
    }

    let target = format!("{path}?{}", serializer.finish());
    Redirect::to(&target).into_response()
}

pub(super) fn blank_to_empty(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}
