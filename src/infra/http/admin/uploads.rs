use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Multipart;
use bytes::Bytes;

use crate::application::admin::settings::ImageTarget;
use crate::application::admin::uploads::AdminUploadError;
use crate::application::error::HttpError;

use super::{
    AdminState,
    settings::admin_settings_error,
    shared::{FlashTone, redirect_with_flash},
};

const MIB: u64 = 1024 * 1024;

pub(super) async fn admin_logo_image(
    State(state): State<AdminState>,
    multipart: Multipart,
) -> Response {
    store_image(state, multipart, ImageTarget::Logo, "/settings").await
}

pub(super) async fn admin_hero_image(
    State(state): State<AdminState>,
    multipart: Multipart,
) -> Response {
    store_image(state, multipart, ImageTarget::Hero, "/settings").await
}

pub(super) async fn admin_promotion_image(
    State(state): State<AdminState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let back = format!("/promotions/{id}/edit");
    store_image(state, multipart, ImageTarget::Promotion(id), &back).await
}

async fn store_image(
    state: AdminState,
    mut multipart: Multipart,
    target: ImageTarget,
    back_path: &str,
) -> Response {
    let payload = match read_image_field(&mut multipart).await {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            return redirect_with_flash(back_path, FlashTone::Error, "Chưa chọn ảnh để tải lên");
        }
        Err(response) => return response,
    };

    let stored = match state
        .uploads
        .store_image(&payload.name, payload.content_type.as_deref(), payload.bytes)
    {
        Ok(stored) => stored,
        Err(err @ AdminUploadError::TooLarge { limit_bytes }) => {
            let limit_mib = limit_bytes.div_ceil(MIB);
            tracing::warn!(
                target = "fiera::http::admin_uploads",
                error = %err,
                "image upload rejected"
            );
            return redirect_with_flash(
                back_path,
                FlashTone::Error,
                &format!("Kích thước ảnh quá lớn (tối đa {limit_mib} MB)"),
            );
        }
        Err(AdminUploadError::Empty) => {
            return redirect_with_flash(back_path, FlashTone::Error, "File ảnh rỗng");
        }
    };

    match state.settings.set_image(target, stored.url).await {
        Ok(_) => redirect_with_flash(back_path, FlashTone::Success, "Đã tải ảnh lên thành công"),
        Err(err) => admin_settings_error("infra::http::admin_uploads", err).into_response(),
    }
}

struct ImagePayload {
    name: String,
    content_type: Option<String>,
    bytes: Bytes,
}

async fn read_image_field(multipart: &mut Multipart) -> Result<Option<ImagePayload>, Response> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(err) => {
                return Err(HttpError::new(
                    "infra::http::admin_uploads",
                    StatusCode::BAD_REQUEST,
                    "Malformed upload",
                    err.to_string(),
                )
                .into_response());
            }
        };

        if field.name() != Some("image") {
            continue;
        }

        let name = field.file_name().unwrap_or("image").to_string();
        let content_type = field.content_type().map(|mime| mime.to_string());
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                return Err(HttpError::new(
                    "infra::http::admin_uploads",
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "Upload too large",
                    err.to_string(),
                )
                .into_response());
            }
        };

        return Ok(Some(ImagePayload {
            name,
            content_type,
            bytes,
        }));
    }
}
