pub mod booking;
pub mod generator;
pub mod models;
pub mod timezone;

pub use booking::{BookingError, BookingService};
pub use generator::{InvalidDateError, LessonDateGenerator};
pub use models::BookingRequest;
