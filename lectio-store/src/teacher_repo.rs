use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lectio_core::people::Teacher;
use lectio_core::repository::TeacherRepository;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgTeacherRepository {
    pool: PgPool,
}

impl PgTeacherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TeacherRow {
    id: Uuid,
    full_name: String,
    email: Option<String>,
    telegram_chat_id: Option<i64>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<TeacherRow> for Teacher {
    fn from(row: TeacherRow) -> Self {
        Teacher {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            telegram_chat_id: row.telegram_chat_id,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

const TEACHER_COLUMNS: &str = "id, full_name, email, telegram_chat_id, is_active, created_at";

#[async_trait]
impl TeacherRepository for PgTeacherRepository {
    async fn create_teacher(
        &self,
        teacher: &Teacher,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO teachers (id, full_name, email, telegram_chat_id, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(teacher.id)
        .bind(&teacher.full_name)
        .bind(teacher.email.as_deref())
        .bind(teacher.telegram_chat_id)
        .bind(teacher.is_active)
        .bind(teacher.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_teacher(
        &self,
        id: Uuid,
    ) -> Result<Option<Teacher>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, TeacherRow>(&format!(
            "SELECT {} FROM teachers WHERE id = $1",
            TEACHER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Teacher::from))
    }

    async fn list_teachers(
        &self,
        active_only: bool,
    ) -> Result<Vec<Teacher>, Box<dyn std::error::Error + Send + Sync>> {
        let sql = if active_only {
            format!(
                "SELECT {} FROM teachers WHERE is_active = TRUE ORDER BY full_name",
                TEACHER_COLUMNS
            )
        } else {
            format!("SELECT {} FROM teachers ORDER BY full_name", TEACHER_COLUMNS)
        };

        let rows = sqlx::query_as::<_, TeacherRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Teacher::from).collect())
    }

    async fn update_teacher(
        &self,
        teacher: &Teacher,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            UPDATE teachers
            SET full_name = $1, email = $2, telegram_chat_id = $3, is_active = $4
            WHERE id = $5
            "#,
        )
        .bind(&teacher.full_name)
        .bind(teacher.email.as_deref())
        .bind(teacher.telegram_chat_id)
        .bind(teacher.is_active)
        .bind(teacher.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_teacher(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query("UPDATE teachers SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
