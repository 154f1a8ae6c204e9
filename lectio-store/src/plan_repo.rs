use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lectio_core::repository::PlanRepository;
use lectio_plans::{Plan, PlanType};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgPlanRepository {
    pool: PgPool,
}

impl PgPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PlanRow {
    id: Uuid,
    name: String,
    plan_type: String,
    duration_minutes: i32,
    price_minor: i32,
    currency: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<PlanRow> for Plan {
    type Error = Box<dyn std::error::Error + Send + Sync>;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        let plan_type = row.plan_type.parse::<PlanType>()?;
        Ok(Plan {
            id: row.id,
            name: row.name,
            plan_type,
            duration_minutes: row.duration_minutes,
            price_minor: row.price_minor,
            currency: row.currency,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

const PLAN_COLUMNS: &str = "id, name, plan_type, duration_minutes, price_minor, currency, is_active, created_at";

#[async_trait]
impl PlanRepository for PgPlanRepository {
    async fn create_plan(
        &self,
        plan: &Plan,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO plans (id, name, plan_type, duration_minutes, price_minor, currency, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(plan.id)
        .bind(&plan.name)
        .bind(plan.plan_type.as_str())
        .bind(plan.duration_minutes)
        .bind(plan.price_minor)
        .bind(&plan.currency)
        .bind(plan.is_active)
        .bind(plan.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_plan(
        &self,
        id: Uuid,
    ) -> Result<Option<Plan>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, PlanRow>(&format!(
            "SELECT {} FROM plans WHERE id = $1",
            PLAN_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Plan::try_from(row)?)),
            None => Ok(None),
        }
    }

    async fn list_plans(
        &self,
        active_only: bool,
    ) -> Result<Vec<Plan>, Box<dyn std::error::Error + Send + Sync>> {
        let sql = if active_only {
            format!(
                "SELECT {} FROM plans WHERE is_active = TRUE ORDER BY name",
                PLAN_COLUMNS
            )
        } else {
            format!("SELECT {} FROM plans ORDER BY name", PLAN_COLUMNS)
        };

        let rows = sqlx::query_as::<_, PlanRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        let mut plans = Vec::with_capacity(rows.len());
        for row in rows {
            plans.push(Plan::try_from(row)?);
        }
        Ok(plans)
    }

    async fn update_plan(
        &self,
        plan: &Plan,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            UPDATE plans
            SET name = $1, plan_type = $2, duration_minutes = $3, price_minor = $4,
                currency = $5, is_active = $6
            WHERE id = $7
            "#,
        )
        .bind(&plan.name)
        .bind(plan.plan_type.as_str())
        .bind(plan.duration_minutes)
        .bind(plan.price_minor)
        .bind(&plan.currency)
        .bind(plan.is_active)
        .bind(plan.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_plan(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query("UPDATE plans SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
