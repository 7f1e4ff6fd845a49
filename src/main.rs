use std::{process, sync::Arc};

use fiera::{
    application::{
        admin::{
            events::AdminEventService, import, settings::AdminSettingsService,
            uploads::AdminUploadService,
        },
        error::AppError,
        schedule::ScheduleService,
        site::SiteService,
    },
    config,
    infra::{
        error::InfraError,
        http::{self, AdminState, HttpState},
        memstore::MemoryStore,
        telemetry,
        uploads::UploadStore,
    },
    util::timezone,
};
use tokio::try_join;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Template(args) => run_template(args).await,
    }
}

async fn run_template(args: config::TemplateArgs) -> Result<(), AppError> {
    tokio::fs::write(&args.file, import::template_csv())
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "fiera::template",
        path = %args.file.display(),
        "Import template written"
    );
    Ok(())
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let timezone = settings.site.timezone;
    let store = Arc::new(MemoryStore::seeded(timezone::today(timezone)));
    let upload_store = Arc::new(UploadStore::new());

    let schedule_service = Arc::new(ScheduleService::new(store.clone(), store.clone(), timezone));
    let site_service = Arc::new(SiteService::new(store.clone()));
    let admin_event_service = Arc::new(AdminEventService::new(store.clone(), timezone));
    let admin_settings_service = Arc::new(AdminSettingsService::new(store.clone()));
    let admin_upload_service = Arc::new(AdminUploadService::new(
        upload_store.clone(),
        settings.uploads.max_image_bytes.get(),
    ));

    let http_state = HttpState {
        schedule: schedule_service,
        site: site_service,
        uploads: upload_store,
    };

    let admin_state = AdminState {
        events: admin_event_service,
        settings: admin_settings_service,
        uploads: admin_upload_service,
    };

    serve_http(&settings, http_state, admin_state).await
}

async fn serve_http(
    settings: &config::Settings,
    http_state: HttpState,
    admin_state: AdminState,
) -> Result<(), AppError> {
    let public_router = http::build_router(http_state);
    // Body limit leaves headroom over the image ceiling so spreadsheet
    // uploads of similar size pass through the same listener.
    let upload_body_limit = settings.uploads.max_image_bytes.get() as usize * 2;
    let admin_router = http::build_admin_router(admin_state, upload_body_limit);

    let public_listener = tokio::net::TcpListener::bind(settings.server.public_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    let admin_listener = tokio::net::TcpListener::bind(settings.server.admin_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "fiera::serve",
        public = %settings.server.public_addr,
        admin = %settings.server.admin_addr,
        "Listening"
    );

    let public_server = axum::serve(public_listener, public_router.into_make_service());
    let admin_server = axum::serve(admin_listener, admin_router.into_make_service());

    try_join!(public_server, admin_server)
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}
