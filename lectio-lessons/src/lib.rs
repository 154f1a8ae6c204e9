pub mod billing;
pub mod manager;
pub mod models;

pub use billing::{BillingManager, BillingStatement, CurrencyTotal, StatementLine};
pub use manager::{LessonError, LessonManager};
pub use models::{Lesson, LessonStatus};
