use lectio_shared::models::events::{
    LessonCancelledEvent, LessonRescheduledEvent, LessonsBookedEvent, LessonsCompletedEvent,
};
use serde::Serialize;
use tracing::{info, warn};

/// Structured business-event log.
///
/// Events are serialized as one-line JSON under the `lectio::events` target
/// so they can be shipped from stdout to any collector without a broker.
#[derive(Clone, Default)]
pub struct Telemetry;

impl Telemetry {
    pub fn new() -> Self {
        Self
    }

    pub fn log_lessons_booked(&self, event: LessonsBookedEvent) {
        self.log("lessons.booked", &event);
    }

    pub fn log_lesson_cancelled(&self, event: LessonCancelledEvent) {
        self.log("lesson.cancelled", &event);
    }

    pub fn log_lesson_rescheduled(&self, event: LessonRescheduledEvent) {
        self.log("lesson.rescheduled", &event);
    }

    pub fn log_lessons_completed(&self, event: LessonsCompletedEvent) {
        self.log("lessons.completed", &event);
    }

    fn log<E: Serialize>(&self, kind: &str, event: &E) {
        match serde_json::to_string(event) {
            Ok(payload) => info!(target: "lectio::events", "{} {}", kind, payload),
            Err(e) => warn!("Failed to serialize {} event: {}", kind, e),
        }
    }
}
