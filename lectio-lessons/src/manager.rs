use crate::models::{Lesson, LessonStatus};
use chrono::{DateTime, Utc};

/// Guards lesson state transitions. Holds no storage; the caller persists the
/// mutated lessons through a repository.
pub struct LessonManager;

impl LessonManager {
    pub fn new() -> Self {
        Self
    }

    /// Transition: Scheduled → Cancelled
    pub fn cancel(&self, lesson: &mut Lesson) -> Result<(), LessonError> {
        if lesson.status != LessonStatus::Scheduled {
            return Err(LessonError::InvalidTransition {
                from: format!("{:?}", lesson.status),
                to: "CANCELLED".to_string(),
            });
        }

        lesson.update_status(LessonStatus::Cancelled);
        Ok(())
    }

    /// Transition: Scheduled → Completed
    pub fn complete(&self, lesson: &mut Lesson) -> Result<(), LessonError> {
        if lesson.status != LessonStatus::Scheduled {
            return Err(LessonError::InvalidTransition {
                from: format!("{:?}", lesson.status),
                to: "COMPLETED".to_string(),
            });
        }

        lesson.update_status(LessonStatus::Completed);
        Ok(())
    }

    /// Transition: Scheduled → Rescheduled. Returns the replacement lesson,
    /// a fresh Scheduled occurrence at the new start time linked back to the
    /// original through `rescheduled_from`.
    pub fn reschedule(
        &self,
        lesson: &mut Lesson,
        new_start_at: DateTime<Utc>,
    ) -> Result<Lesson, LessonError> {
        if lesson.status != LessonStatus::Scheduled {
            return Err(LessonError::InvalidTransition {
                from: format!("{:?}", lesson.status),
                to: "RESCHEDULED".to_string(),
            });
        }

        lesson.update_status(LessonStatus::Rescheduled);

        let mut replacement = Lesson::new(lesson.student_id, lesson.plan_id, new_start_at);
        replacement.rescheduled_from = Some(lesson.id);
        Ok(replacement)
    }
}

impl Default for LessonManager {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LessonError {
    #[error("Lesson not found: {0}")]
    NotFound(String),

    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}
