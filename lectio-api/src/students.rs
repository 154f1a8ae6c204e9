use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::AppError, state::AppState, teachers::ListQuery};
use lectio_core::people::Student;
use lectio_shared::Masked;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub full_name: String,
    pub contact: Option<String>,
    pub telegram_chat_id: Option<i64>,
    pub teacher_id: Option<Uuid>,
    #[serde(default)]
    pub tz_offset_minutes: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStudentRequest {
    pub full_name: Option<String>,
    pub contact: Option<String>,
    pub telegram_chat_id: Option<i64>,
    pub teacher_id: Option<Uuid>,
    pub tz_offset_minutes: Option<i32>,
    pub is_active: Option<bool>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/students
pub async fn create_student(
    State(state): State<AppState>,
    Json(req): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    if let Some(teacher_id) = req.teacher_id {
        state
            .teachers
            .get_teacher(teacher_id)
            .await?
            .ok_or_else(|| AppError::ValidationError(format!("Unknown teacher: {}", teacher_id)))?;
    }

    let mut student = Student::new(req.full_name);
    student.contact = req.contact.map(Masked::new);
    student.telegram_chat_id = req.telegram_chat_id;
    student.teacher_id = req.teacher_id;
    student.tz_offset_minutes = req.tz_offset_minutes;

    student
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    state.students.create_student(&student).await?;

    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /v1/students
pub async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = state.students.list_students(!query.include_archived).await?;
    Ok(Json(students))
}

/// GET /v1/students/{id}
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, AppError> {
    let student = state
        .students
        .get_student(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Student not found: {}", id)))?;
    Ok(Json(student))
}

/// PUT /v1/students/{id}
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStudentRequest>,
) -> Result<Json<Student>, AppError> {
    let mut student = state
        .students
        .get_student(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Student not found: {}", id)))?;

    if let Some(teacher_id) = req.teacher_id {
        state
            .teachers
            .get_teacher(teacher_id)
            .await?
            .ok_or_else(|| AppError::ValidationError(format!("Unknown teacher: {}", teacher_id)))?;
        student.teacher_id = Some(teacher_id);
    }
    if let Some(full_name) = req.full_name {
        student.full_name = full_name;
    }
    if let Some(contact) = req.contact {
        student.contact = Some(Masked::new(contact));
    }
    if let Some(chat_id) = req.telegram_chat_id {
        student.telegram_chat_id = Some(chat_id);
    }
    if let Some(offset) = req.tz_offset_minutes {
        student.tz_offset_minutes = offset;
    }
    if let Some(is_active) = req.is_active {
        student.is_active = is_active;
    }

    student
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    state.students.update_student(&student).await?;

    Ok(Json(student))
}

/// DELETE /v1/students/{id}
/// Archives the student; lessons and billing history stay intact
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .students
        .get_student(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Student not found: {}", id)))?;

    state.students.delete_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
