use lectio_api::telemetry::Telemetry;
use lectio_api::{
    app,
    state::{AppState, AuthConfig},
};
use lectio_schedule::{timezone, BookingService, LessonDateGenerator};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lectio_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = lectio_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Lectio API on port {}", config.server.port);

    let db = lectio_store::DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to database");
    db.migrate().await.expect("Failed to run migrations");

    let teachers = Arc::new(lectio_store::PgTeacherRepository::new(db.pool.clone()));
    let students = Arc::new(lectio_store::PgStudentRepository::new(db.pool.clone()));
    let plans = Arc::new(lectio_store::PgPlanRepository::new(db.pool.clone()));
    let lessons = Arc::new(lectio_store::PgLessonRepository::new(db.pool.clone()));

    let offset = timezone::offset_from_minutes(config.scheduling.timezone_offset_minutes)
        .expect("scheduling.timezone_offset_minutes is out of range");
    let booking = Arc::new(BookingService::new(
        students.clone(),
        plans.clone(),
        lessons.clone(),
        LessonDateGenerator::new(offset),
    ));

    let notifier = Arc::new(lectio_store::TelegramNotifier::new(
        config.telegram.bot_token.clone(),
        config.telegram.enabled,
    ));

    let telemetry = Telemetry::new();

    tokio::spawn(lectio_api::worker::start_completion_worker(
        lessons.clone(),
        telemetry.clone(),
        config.scheduling.completion_interval_seconds,
    ));

    let app_state = AppState {
        teachers,
        students,
        plans,
        lessons,
        booking,
        notifier,
        telemetry,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
            admin_email: config.auth.admin_email.clone(),
            admin_password: config.auth.admin_password.clone(),
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
