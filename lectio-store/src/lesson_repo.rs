use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lectio_core::repository::{LessonQuery, LessonRepository};
use lectio_lessons::{Lesson, LessonStatus};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgLessonRepository {
    pool: PgPool,
}

impl PgLessonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LessonRow {
    id: Uuid,
    student_id: Uuid,
    plan_id: Uuid,
    start_at: DateTime<Utc>,
    status: String,
    rescheduled_from: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<LessonRow> for Lesson {
    type Error = Box<dyn std::error::Error + Send + Sync>;

    fn try_from(row: LessonRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<LessonStatus>()?;
        Ok(Lesson {
            id: row.id,
            student_id: row.student_id,
            plan_id: row.plan_id,
            start_at: row.start_at,
            status,
            rescheduled_from: row.rescheduled_from,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const LESSON_COLUMNS: &str = "id, student_id, plan_id, start_at, status, rescheduled_from, created_at, updated_at";

#[async_trait]
impl LessonRepository for PgLessonRepository {
    async fn create_lesson(
        &self,
        lesson: &Lesson,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO lessons (id, student_id, plan_id, start_at, status, rescheduled_from, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(lesson.id)
        .bind(lesson.student_id)
        .bind(lesson.plan_id)
        .bind(lesson.start_at)
        .bind(lesson.status.as_str())
        .bind(lesson.rescheduled_from)
        .bind(lesson.created_at)
        .bind(lesson.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_lesson(
        &self,
        id: Uuid,
    ) -> Result<Option<Lesson>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, LessonRow>(&format!(
            "SELECT {} FROM lessons WHERE id = $1",
            LESSON_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Lesson::try_from(row)?)),
            None => Ok(None),
        }
    }

    async fn list_lessons(
        &self,
        query: &LessonQuery,
    ) -> Result<Vec<Lesson>, Box<dyn std::error::Error + Send + Sync>> {
        // NULL filters collapse to TRUE so one statement covers every
        // combination; casts keep Postgres happy about parameter types.
        let sql = format!(
            r#"
            SELECT {}
            FROM lessons
            WHERE ($1::uuid IS NULL OR student_id = $1)
              AND ($2::text IS NULL OR status = $2)
              AND ($3::timestamptz IS NULL OR start_at >= $3)
              AND ($4::timestamptz IS NULL OR start_at <= $4)
            ORDER BY start_at
            "#,
            LESSON_COLUMNS
        );

        let rows = sqlx::query_as::<_, LessonRow>(&sql)
            .bind(query.student_id)
            .bind(query.status.map(|s| s.as_str()))
            .bind(query.from)
            .bind(query.to)
            .fetch_all(&self.pool)
            .await?;

        let mut lessons = Vec::with_capacity(rows.len());
        for row in rows {
            lessons.push(Lesson::try_from(row)?);
        }
        Ok(lessons)
    }

    async fn update_lesson(
        &self,
        lesson: &Lesson,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            UPDATE lessons
            SET start_at = $1, status = $2, rescheduled_from = $3, updated_at = $4
            WHERE id = $5
            "#,
        )
        .bind(lesson.start_at)
        .bind(lesson.status.as_str())
        .bind(lesson.rescheduled_from)
        .bind(lesson.updated_at)
        .bind(lesson.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn complete_elapsed(
        &self,
        now: DateTime<Utc>,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query(
            "UPDATE lessons SET status = $1, updated_at = NOW() WHERE status = $2 AND start_at <= $3",
        )
        .bind(LessonStatus::Completed.as_str())
        .bind(LessonStatus::Scheduled.as_str())
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
