use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lesson status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LessonStatus {
    Scheduled,
    Completed,
    Cancelled,
    Rescheduled,
}

impl LessonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonStatus::Scheduled => "SCHEDULED",
            LessonStatus::Completed => "COMPLETED",
            LessonStatus::Cancelled => "CANCELLED",
            LessonStatus::Rescheduled => "RESCHEDULED",
        }
    }

    /// Completed, cancelled and rescheduled lessons accept no further transitions
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LessonStatus::Scheduled)
    }
}

impl std::str::FromStr for LessonStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCHEDULED" => Ok(LessonStatus::Scheduled),
            "COMPLETED" => Ok(LessonStatus::Completed),
            "CANCELLED" => Ok(LessonStatus::Cancelled),
            "RESCHEDULED" => Ok(LessonStatus::Rescheduled),
            other => Err(format!("unknown lesson status: {}", other)),
        }
    }
}

/// A single booked lesson occurrence: one student, one plan, one start time.
/// The booking flow creates one row per generated date; a periodic job flips
/// elapsed lessons to COMPLETED.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: Uuid,
    pub student_id: Uuid,
    pub plan_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub status: LessonStatus,
    /// Set on replacement lessons created by a reschedule, pointing at the original
    pub rescheduled_from: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lesson {
    pub fn new(student_id: Uuid, plan_id: Uuid, start_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            student_id,
            plan_id,
            start_at,
            status: LessonStatus::Scheduled,
            rescheduled_from: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update lesson status
    pub fn update_status(&mut self, new_status: LessonStatus) {
        self.status = new_status;
        self.updated_at = Utc::now();
    }

    /// Has the lesson's start time passed?
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.start_at <= now
    }
}
