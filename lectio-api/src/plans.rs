use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::AppError, state::AppState, teachers::ListQuery};
use lectio_plans::{Plan, PlanType};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    pub name: String,
    pub plan_type: String,
    pub duration_minutes: i32,
    pub price_minor: i32,
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlanRequest {
    pub name: Option<String>,
    pub plan_type: Option<String>,
    pub duration_minutes: Option<i32>,
    pub price_minor: Option<i32>,
    pub currency: Option<String>,
    pub is_active: Option<bool>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/plans", get(list_plans).post(create_plan))
        .route(
            "/plans/{id}",
            get(get_plan).put(update_plan).delete(delete_plan),
        )
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/plans
pub async fn create_plan(
    State(state): State<AppState>,
    Json(req): Json<CreatePlanRequest>,
) -> Result<(StatusCode, Json<Plan>), AppError> {
    let plan_type = req
        .plan_type
        .parse::<PlanType>()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let plan = Plan::new(
        req.name,
        plan_type,
        req.duration_minutes,
        req.price_minor,
        req.currency,
    );

    plan.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    state.plans.create_plan(&plan).await?;

    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /v1/plans
pub async fn list_plans(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Plan>>, AppError> {
    let plans = state.plans.list_plans(!query.include_archived).await?;
    Ok(Json(plans))
}

/// GET /v1/plans/{id}
pub async fn get_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Plan>, AppError> {
    let plan = state
        .plans
        .get_plan(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Plan not found: {}", id)))?;
    Ok(Json(plan))
}

/// PUT /v1/plans/{id}
pub async fn update_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePlanRequest>,
) -> Result<Json<Plan>, AppError> {
    let mut plan = state
        .plans
        .get_plan(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Plan not found: {}", id)))?;

    if let Some(name) = req.name {
        plan.name = name;
    }
    if let Some(plan_type) = req.plan_type {
        plan.plan_type = plan_type
            .parse::<PlanType>()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
    }
    if let Some(duration) = req.duration_minutes {
        plan.duration_minutes = duration;
    }
    if let Some(price) = req.price_minor {
        plan.price_minor = price;
    }
    if let Some(currency) = req.currency {
        plan.currency = currency;
    }
    if let Some(is_active) = req.is_active {
        plan.is_active = is_active;
    }

    plan.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    state.plans.update_plan(&plan).await?;

    Ok(Json(plan))
}

/// DELETE /v1/plans/{id}
/// Deactivates the plan; lessons already booked against it keep billing
pub async fn delete_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .plans
        .get_plan(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Plan not found: {}", id)))?;

    state.plans.delete_plan(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
