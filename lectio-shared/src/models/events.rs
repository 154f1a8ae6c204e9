use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct LessonsBookedEvent {
    pub student_id: Uuid,
    pub plan_id: Uuid,
    pub lesson_count: i32,
    pub first_start_at: i64,
    pub until_cancellation: bool,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct LessonCancelledEvent {
    pub lesson_id: Uuid,
    pub student_id: Uuid,
    pub start_at: i64,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct LessonRescheduledEvent {
    pub original_lesson_id: Uuid,
    pub replacement_lesson_id: Uuid,
    pub student_id: Uuid,
    pub old_start_at: i64,
    pub new_start_at: i64,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct LessonsCompletedEvent {
    pub completed_count: u64,
    pub swept_at: i64,
}
