use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};
use lectio_lessons::Lesson;
use lectio_schedule::{timezone, BookingError, BookingRequest};
use lectio_shared::models::events::LessonsBookedEvent;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub booked_count: usize,
    pub lessons: Vec<Lesson>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/bookings", post(create_booking))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/bookings
/// Book a single lesson, a weekly until-cancellation series, or an explicit
/// list of days for one student and plan
pub async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<BookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let lessons = state.booking.book(&req).await.map_err(map_booking_error)?;

    state.telemetry.log_lessons_booked(LessonsBookedEvent {
        student_id: req.student_id,
        plan_id: req.plan_id,
        lesson_count: lessons.len() as i32,
        first_start_at: lessons.first().map(|l| l.start_at.timestamp()).unwrap_or_default(),
        until_cancellation: req.book_until_cancellation,
        timestamp: Utc::now().timestamp(),
    });

    notify_student_booked(&state, req.student_id, &lessons).await;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            booked_count: lessons.len(),
            lessons,
        }),
    ))
}

fn map_booking_error(err: BookingError) -> AppError {
    match err {
        BookingError::StudentNotFound(id) => {
            AppError::NotFoundError(format!("Student not found: {}", id))
        }
        BookingError::PlanNotFound(id) => AppError::NotFoundError(format!("Plan not found: {}", id)),
        BookingError::PlanInactive(id) => {
            AppError::ConflictError(format!("Plan is not active: {}", id))
        }
        BookingError::InvalidDate(e) => AppError::ValidationError(e.to_string()),
        BookingError::Storage(msg) => AppError::InternalServerError(msg),
    }
}

async fn notify_student_booked(state: &AppState, student_id: Uuid, lessons: &[Lesson]) {
    let student = match state.students.get_student(student_id).await {
        Ok(Some(student)) => student,
        _ => return,
    };
    let Some(chat_id) = student.telegram_chat_id else {
        return;
    };

    let mut text = format!("Booked {} lesson(s):", lessons.len());
    for lesson in lessons {
        text.push_str(&format!(
            "\n- {}",
            timezone::local_display(lesson.start_at, student.tz_offset_minutes)
        ));
    }
    state.notifier.send_message(chat_id, &text).await;
}
