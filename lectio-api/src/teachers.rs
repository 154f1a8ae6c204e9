use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};
use lectio_core::people::Teacher;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateTeacherRequest {
    pub full_name: String,
    pub email: Option<String>,
    pub telegram_chat_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTeacherRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub telegram_chat_id: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub include_archived: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/teachers", get(list_teachers).post(create_teacher))
        .route(
            "/teachers/{id}",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/teachers
pub async fn create_teacher(
    State(state): State<AppState>,
    Json(req): Json<CreateTeacherRequest>,
) -> Result<(StatusCode, Json<Teacher>), AppError> {
    let mut teacher = Teacher::new(req.full_name);
    teacher.email = req.email;
    teacher.telegram_chat_id = req.telegram_chat_id;

    teacher
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    state.teachers.create_teacher(&teacher).await?;

    Ok((StatusCode::CREATED, Json(teacher)))
}

/// GET /v1/teachers
pub async fn list_teachers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Teacher>>, AppError> {
    let teachers = state.teachers.list_teachers(!query.include_archived).await?;
    Ok(Json(teachers))
}

/// GET /v1/teachers/{id}
pub async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = state
        .teachers
        .get_teacher(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Teacher not found: {}", id)))?;
    Ok(Json(teacher))
}

/// PUT /v1/teachers/{id}
pub async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTeacherRequest>,
) -> Result<Json<Teacher>, AppError> {
    let mut teacher = state
        .teachers
        .get_teacher(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Teacher not found: {}", id)))?;

    if let Some(full_name) = req.full_name {
        teacher.full_name = full_name;
    }
    if let Some(email) = req.email {
        teacher.email = Some(email);
    }
    if let Some(chat_id) = req.telegram_chat_id {
        teacher.telegram_chat_id = Some(chat_id);
    }
    if let Some(is_active) = req.is_active {
        teacher.is_active = is_active;
    }

    teacher
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    state.teachers.update_teacher(&teacher).await?;

    Ok(Json(teacher))
}

/// DELETE /v1/teachers/{id}
/// Archives the teacher; students keep their assignment history
pub async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .teachers
        .get_teacher(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Teacher not found: {}", id)))?;

    state.teachers.delete_teacher(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
