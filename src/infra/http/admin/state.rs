use std::sync::Arc;

use crate::application::admin::{
    events::AdminEventService, settings::AdminSettingsService, uploads::AdminUploadService,
};

#[derive(Clone)]
pub struct AdminState {
    pub events: Arc<AdminEventService>,
    pub settings: Arc<AdminSettingsService>,
    pub uploads: Arc<AdminUploadService>,
}
