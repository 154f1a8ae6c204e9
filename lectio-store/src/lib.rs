pub mod app_config;
pub mod database;
pub mod lesson_repo;
pub mod notify;
pub mod plan_repo;
pub mod student_repo;
pub mod teacher_repo;

pub use app_config::Config;
pub use database::DbClient;
pub use lesson_repo::PgLessonRepository;
pub use notify::TelegramNotifier;
pub use plan_repo::PgPlanRepository;
pub use student_repo::PgStudentRepository;
pub use teacher_repo::PgTeacherRepository;
