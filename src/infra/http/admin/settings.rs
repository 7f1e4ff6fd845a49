use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::application::admin::settings::{
    AdminSettingsError, UpdatePromotionCommand, UpdateSettingsCommand,
};
use crate::application::error::HttpError;
use crate::domain::brands::Brand;
use crate::domain::entities::{PromotionKind, PromotionRecord, SiteSettingsRecord};
use crate::infra::http::repo_error_to_http;
use crate::presentation::{
    admin::views::{
        AdminLayout, AdminPromotionEditTemplate, AdminPromotionFormView, AdminPromotionListView,
        AdminPromotionRowView, AdminPromotionsTemplate, AdminSettingsFormView,
        AdminSettingsTemplate, format_timestamp,
    },
    views::{OptionView, render_template_response},
};

use super::{
    AdminState,
    shared::{FlashQuery, FlashTone, blank_to_empty, flash_view, redirect_with_flash},
};

const SETTINGS_PATH: &str = "/settings";
const PROMOTIONS_PATH: &str = "/promotions";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct AdminSettingsForm {
    logo_url: Option<String>,
    hero_image: Option<String>,
    hero_title: Option<String>,
    hero_subtitle: Option<String>,
    cta_title: Option<String>,
    cta_description: Option<String>,
    schedule_title: Option<String>,
    schedule_subtitle: Option<String>,
}

impl AdminSettingsForm {
    fn into_command(self) -> UpdateSettingsCommand {
        UpdateSettingsCommand {
            logo_url: blank_to_empty(self.logo_url),
            hero_image: blank_to_empty(self.hero_image),
            hero_title: blank_to_empty(self.hero_title),
            hero_subtitle: blank_to_empty(self.hero_subtitle),
            cta_title: blank_to_empty(self.cta_title),
            cta_description: blank_to_empty(self.cta_description),
            schedule_title: blank_to_empty(self.schedule_title),
            schedule_subtitle: blank_to_empty(self.schedule_subtitle),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct AdminPromotionForm {
    title: Option<String>,
    image: Option<String>,
    brand: Option<String>,
    kind: Option<String>,
    content: Option<String>,
}

impl AdminPromotionForm {
    fn into_command(self) -> UpdatePromotionCommand {
        UpdatePromotionCommand {
            title: blank_to_empty(self.title),
            image: blank_to_empty(self.image),
            brand: blank_to_empty(self.brand),
            kind: self
                .kind
                .as_deref()
                .and_then(PromotionKind::parse)
                .unwrap_or(PromotionKind::Activation),
            content: self.content.unwrap_or_default(),
        }
    }
}

pub(super) async fn admin_settings(
    State(state): State<AdminState>,
    Query(query): Query<FlashQuery>,
) -> Response {
    let settings = match state.settings.load().await {
        Ok(settings) => settings,
        Err(err) => {
            return admin_settings_error("infra::http::admin_settings", err).into_response();
        }
    };

    let view = AdminLayout::new("settings", flash_view(&query), form_view(&settings));
    render_template_response(AdminSettingsTemplate { view }, StatusCode::OK)
}

pub(super) async fn admin_settings_update(
    State(state): State<AdminState>,
    Form(form): Form<AdminSettingsForm>,
) -> Response {
    match state.settings.update(form.into_command()).await {
        Ok(_) => redirect_with_flash(
            SETTINGS_PATH,
            FlashTone::Success,
            "Đã cập nhật giao diện web",
        ),
        Err(AdminSettingsError::ConstraintViolation(field)) => redirect_with_flash(
            SETTINGS_PATH,
            FlashTone::Error,
            &format!("Trường `{field}` không được để trống"),
        ),
        Err(err) => admin_settings_error("infra::http::admin_settings_update", err).into_response(),
    }
}

pub(super) async fn admin_promotions(
    State(state): State<AdminState>,
    Query(query): Query<FlashQuery>,
) -> Response {
    let settings = match state.settings.load().await {
        Ok(settings) => settings,
        Err(err) => {
            return admin_settings_error("infra::http::admin_promotions", err).into_response();
        }
    };

    let content = AdminPromotionListView {
        rows: settings.promotions.iter().map(promotion_row).collect(),
    };
    let view = AdminLayout::new("promotions", flash_view(&query), content);
    render_template_response(AdminPromotionsTemplate { view }, StatusCode::OK)
}

pub(super) async fn admin_promotion_edit(
    State(state): State<AdminState>,
    Path(id): Path<String>,
    Query(query): Query<FlashQuery>,
) -> Response {
    let settings = match state.settings.load().await {
        Ok(settings) => settings,
        Err(err) => {
            return admin_settings_error("infra::http::admin_promotion_edit", err).into_response();
        }
    };

    match settings.promotion(&id) {
        Some(promo) => {
            let view = AdminLayout::new("promotions", flash_view(&query), promotion_form(promo));
            render_template_response(AdminPromotionEditTemplate { view }, StatusCode::OK)
        }
        None => HttpError::new(
            "infra::http::admin_promotion_edit",
            StatusCode::NOT_FOUND,
            "Promotion not found",
            format!("promotion `{id}` does not exist"),
        )
        .into_response(),
    }
}

pub(super) async fn admin_promotion_update(
    State(state): State<AdminState>,
    Path(id): Path<String>,
    Form(form): Form<AdminPromotionForm>,
) -> Response {
    match state.settings.update_promotion(&id, form.into_command()).await {
        Ok(_) => redirect_with_flash(
            &format!("{PROMOTIONS_PATH}/{id}/edit"),
            FlashTone::Success,
            "Đã cập nhật chương trình",
        ),
        Err(AdminSettingsError::ConstraintViolation(field)) => redirect_with_flash(
            &format!("{PROMOTIONS_PATH}/{id}/edit"),
            FlashTone::Error,
            &format!("Trường `{field}` không được để trống"),
        ),
        Err(AdminSettingsError::UnknownPromotion(_)) => redirect_with_flash(
            PROMOTIONS_PATH,
            FlashTone::Error,
            "Chương trình không còn tồn tại",
        ),
        Err(err) => {
            admin_settings_error("infra::http::admin_promotion_update", err).into_response()
        }
    }
}

fn form_view(record: &SiteSettingsRecord) -> AdminSettingsFormView {
    AdminSettingsFormView {
        logo_url: record.logo_url.clone(),
        hero_image: record.hero_image.clone(),
        hero_title: record.hero_title.clone(),
        hero_subtitle: record.hero_subtitle.clone(),
        cta_title: record.cta_title.clone(),
        cta_description: record.cta_description.clone(),
        schedule_title: record.schedule_title.clone(),
        schedule_subtitle: record.schedule_subtitle.clone(),
        updated_at: format_timestamp(record.updated_at),
    }
}

fn promotion_row(promo: &PromotionRecord) -> AdminPromotionRowView {
    AdminPromotionRowView {
        id: promo.id.clone(),
        title: promo.title.clone(),
        brand: promo.brand.clone(),
        kind_label: promo.kind.label(),
        image: promo.image.clone(),
    }
}

fn promotion_form(promo: &PromotionRecord) -> AdminPromotionFormView {
    AdminPromotionFormView {
        id: promo.id.clone(),
        title: promo.title.clone(),
        image: promo.image.clone(),
        brand: promo.brand.clone(),
        content: promo.content.clone(),
        brands: Brand::ALL
            .iter()
            .map(|brand| OptionView {
                value: brand.label().to_string(),
                is_active: promo.brand == brand.label(),
            })
            .collect(),
        kinds: [PromotionKind::Activation, PromotionKind::Awo]
            .iter()
            .map(|kind| OptionView {
                value: kind.as_str().to_string(),
                is_active: promo.kind == *kind,
            })
            .collect(),
        form_action: format!("{PROMOTIONS_PATH}/{}/edit", promo.id),
        image_action: format!("{PROMOTIONS_PATH}/{}/image", promo.id),
    }
}

pub(super) fn admin_settings_error(source: &'static str, err: AdminSettingsError) -> HttpError {
    match err {
        AdminSettingsError::ConstraintViolation(field) => HttpError::new(
            source,
            StatusCode::BAD_REQUEST,
            "Settings request could not be processed",
            format!("invalid field `{field}`"),
        ),
        AdminSettingsError::UnknownPromotion(id) => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Promotion not found",
            format!("promotion `{id}` does not exist"),
        ),
        AdminSettingsError::Repo(repo) => repo_error_to_http(source, repo),
    }
}
