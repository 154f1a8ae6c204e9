use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};
use lectio_core::repository::LessonQuery;
use lectio_lessons::{BillingManager, BillingStatement, LessonStatus};
use lectio_plans::Plan;
use lectio_schedule::timezone;

#[derive(Debug, Deserialize)]
pub struct BillingQuery {
    pub year: i32,
    pub month: u32,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/students/{id}/billing", get(student_billing))
}

/// GET /v1/students/{id}/billing?year=2025&month=3
/// Monthly statement of completed lessons, priced by plan, with per-currency
/// totals. Month boundaries follow the student's display timezone.
pub async fn student_billing(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Query(query): Query<BillingQuery>,
) -> Result<Json<BillingStatement>, AppError> {
    if !(1..=12).contains(&query.month) {
        return Err(AppError::ValidationError(format!(
            "Invalid month: {}",
            query.month
        )));
    }

    let student = state
        .students
        .get_student(student_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Student not found: {}", student_id)))?;

    let offset = timezone::offset_from_minutes(student.tz_offset_minutes).ok_or_else(|| {
        AppError::InternalServerError(format!(
            "Student {} has unusable timezone offset {}",
            student.id, student.tz_offset_minutes
        ))
    })?;

    let lessons = state
        .lessons
        .list_lessons(&LessonQuery {
            student_id: Some(student_id),
            status: Some(LessonStatus::Completed),
            ..Default::default()
        })
        .await?;

    let plans: HashMap<Uuid, Plan> = state
        .plans
        .list_plans(false)
        .await?
        .into_iter()
        .map(|plan| (plan.id, plan))
        .collect();

    let statement = BillingManager::new().monthly_statement(
        student_id,
        query.year,
        query.month,
        offset,
        &lessons,
        &plans,
    );

    Ok(Json(statement))
}
