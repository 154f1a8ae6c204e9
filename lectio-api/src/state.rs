use crate::telemetry::Telemetry;
use lectio_core::repository::{
    LessonRepository, PlanRepository, StudentRepository, TeacherRepository,
};
use lectio_schedule::BookingService;
use lectio_store::TelegramNotifier;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
    pub admin_email: String,
    pub admin_password: String,
}

#[derive(Clone)]
pub struct AppState {
    pub teachers: Arc<dyn TeacherRepository>,
    pub students: Arc<dyn StudentRepository>,
    pub plans: Arc<dyn PlanRepository>,
    pub lessons: Arc<dyn LessonRepository>,
    pub booking: Arc<BookingService>,
    pub notifier: Arc<TelegramNotifier>,
    pub telemetry: Telemetry,
    pub auth: AuthConfig,
}
