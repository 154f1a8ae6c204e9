use crate::people::{Student, Teacher};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lectio_lessons::{Lesson, LessonStatus};
use lectio_plans::Plan;
use uuid::Uuid;

/// Filter for lesson listings
#[derive(Debug, Clone, Default)]
pub struct LessonQuery {
    pub student_id: Option<Uuid>,
    pub status: Option<LessonStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Repository trait for student records
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn create_student(
        &self,
        student: &Student,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn get_student(
        &self,
        id: Uuid,
    ) -> Result<Option<Student>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_students(
        &self,
        active_only: bool,
    ) -> Result<Vec<Student>, Box<dyn std::error::Error + Send + Sync>>;

    async fn update_student(
        &self,
        student: &Student,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Persist the weekly-recurrence flag; the side output of an
    /// until-cancellation booking
    async fn set_book_until_cancellation(
        &self,
        id: Uuid,
        value: bool,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn delete_student(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for teacher records
#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn create_teacher(
        &self,
        teacher: &Teacher,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn get_teacher(
        &self,
        id: Uuid,
    ) -> Result<Option<Teacher>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_teachers(
        &self,
        active_only: bool,
    ) -> Result<Vec<Teacher>, Box<dyn std::error::Error + Send + Sync>>;

    async fn update_teacher(
        &self,
        teacher: &Teacher,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn delete_teacher(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for lesson-plan templates
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn create_plan(
        &self,
        plan: &Plan,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn get_plan(
        &self,
        id: Uuid,
    ) -> Result<Option<Plan>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_plans(
        &self,
        active_only: bool,
    ) -> Result<Vec<Plan>, Box<dyn std::error::Error + Send + Sync>>;

    async fn update_plan(
        &self,
        plan: &Plan,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn delete_plan(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for lesson occurrences
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// One insert per generated lesson date; the booking flow never batches
    async fn create_lesson(
        &self,
        lesson: &Lesson,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn get_lesson(
        &self,
        id: Uuid,
    ) -> Result<Option<Lesson>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_lessons(
        &self,
        query: &LessonQuery,
    ) -> Result<Vec<Lesson>, Box<dyn std::error::Error + Send + Sync>>;

    /// Persist a status transition made through the lifecycle manager
    async fn update_lesson(
        &self,
        lesson: &Lesson,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Flip every SCHEDULED lesson whose start time has passed to COMPLETED.
    /// Idempotent: already-completed lessons are never matched again.
    /// Returns the number of lessons flipped.
    async fn complete_elapsed(
        &self,
        now: DateTime<Utc>,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>>;
}
