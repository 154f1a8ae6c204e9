use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};
use lectio_core::repository::LessonQuery;
use lectio_lessons::{Lesson, LessonManager, LessonStatus};
use lectio_schedule::timezone;
use lectio_shared::models::events::{LessonCancelledEvent, LessonRescheduledEvent};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LessonsQuery {
    pub student_id: Option<Uuid>,
    pub status: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct RescheduleRequest {
    pub new_start_at: DateTime<Utc>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/lessons", get(list_lessons))
        .route("/lessons/{id}", get(get_lesson))
        .route("/lessons/{id}/cancel", post(cancel_lesson))
        .route("/lessons/{id}/reschedule", post(reschedule_lesson))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/lessons
pub async fn list_lessons(
    State(state): State<AppState>,
    Query(query): Query<LessonsQuery>,
) -> Result<Json<Vec<Lesson>>, AppError> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(
            raw.parse::<LessonStatus>()
                .map_err(AppError::ValidationError)?,
        ),
        None => None,
    };

    let lessons = state
        .lessons
        .list_lessons(&LessonQuery {
            student_id: query.student_id,
            status,
            from: query.from,
            to: query.to,
        })
        .await?;
    Ok(Json(lessons))
}

/// GET /v1/lessons/{id}
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = state
        .lessons
        .get_lesson(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Lesson not found: {}", id)))?;
    Ok(Json(lesson))
}

/// POST /v1/lessons/{id}/cancel
pub async fn cancel_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Lesson>, AppError> {
    let mut lesson = state
        .lessons
        .get_lesson(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Lesson not found: {}", id)))?;

    let manager = LessonManager::new();
    manager
        .cancel(&mut lesson)
        .map_err(|e| AppError::ConflictError(e.to_string()))?;
    state.lessons.update_lesson(&lesson).await?;

    state.telemetry.log_lesson_cancelled(LessonCancelledEvent {
        lesson_id: lesson.id,
        student_id: lesson.student_id,
        start_at: lesson.start_at.timestamp(),
        timestamp: Utc::now().timestamp(),
    });

    let start_at = lesson.start_at;
    notify_student(&state, lesson.student_id, |tz| {
        format!(
            "Your lesson on {} was cancelled",
            timezone::local_display(start_at, tz)
        )
    })
    .await;

    Ok(Json(lesson))
}

/// POST /v1/lessons/{id}/reschedule
/// Marks the lesson rescheduled and books a replacement at the new time,
/// linked back to the original
pub async fn reschedule_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RescheduleRequest>,
) -> Result<Json<Lesson>, AppError> {
    let mut original = state
        .lessons
        .get_lesson(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Lesson not found: {}", id)))?;

    let manager = LessonManager::new();
    let replacement = manager
        .reschedule(&mut original, req.new_start_at)
        .map_err(|e| AppError::ConflictError(e.to_string()))?;

    state.lessons.update_lesson(&original).await?;
    state.lessons.create_lesson(&replacement).await?;

    state.telemetry.log_lesson_rescheduled(LessonRescheduledEvent {
        original_lesson_id: original.id,
        replacement_lesson_id: replacement.id,
        student_id: replacement.student_id,
        old_start_at: original.start_at.timestamp(),
        new_start_at: replacement.start_at.timestamp(),
        timestamp: Utc::now().timestamp(),
    });

    let (old_start, new_start) = (original.start_at, replacement.start_at);
    notify_student(&state, replacement.student_id, |tz| {
        format!(
            "Your lesson on {} was moved to {}",
            timezone::local_display(old_start, tz),
            timezone::local_display(new_start, tz)
        )
    })
    .await;

    Ok(Json(replacement))
}

/// Best-effort Telegram notification in the student's own wall-clock time
async fn notify_student(
    state: &AppState,
    student_id: Uuid,
    make_text: impl FnOnce(i32) -> String,
) {
    let student = match state.students.get_student(student_id).await {
        Ok(Some(student)) => student,
        _ => return,
    };
    let Some(chat_id) = student.telegram_chat_id else {
        return;
    };
    state
        .notifier
        .send_message(chat_id, &make_text(student.tz_offset_minutes))
        .await;
}
