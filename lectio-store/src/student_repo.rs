use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lectio_core::people::Student;
use lectio_core::repository::StudentRepository;
use lectio_shared::Masked;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct StudentRow {
    id: Uuid,
    full_name: String,
    contact: Option<String>,
    telegram_chat_id: Option<i64>,
    teacher_id: Option<Uuid>,
    tz_offset_minutes: i32,
    book_until_cancellation: bool,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Student {
            id: row.id,
            full_name: row.full_name,
            contact: row.contact.map(Masked::new),
            telegram_chat_id: row.telegram_chat_id,
            teacher_id: row.teacher_id,
            tz_offset_minutes: row.tz_offset_minutes,
            book_until_cancellation: row.book_until_cancellation,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

const STUDENT_COLUMNS: &str = "id, full_name, contact, telegram_chat_id, teacher_id, tz_offset_minutes, book_until_cancellation, is_active, created_at";

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn create_student(
        &self,
        student: &Student,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO students (id, full_name, contact, telegram_chat_id, teacher_id, tz_offset_minutes, book_until_cancellation, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(student.id)
        .bind(&student.full_name)
        .bind(student.contact.as_ref().map(|c| c.inner().as_str()))
        .bind(student.telegram_chat_id)
        .bind(student.teacher_id)
        .bind(student.tz_offset_minutes)
        .bind(student.book_until_cancellation)
        .bind(student.is_active)
        .bind(student.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_student(
        &self,
        id: Uuid,
    ) -> Result<Option<Student>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {} FROM students WHERE id = $1",
            STUDENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Student::from))
    }

    async fn list_students(
        &self,
        active_only: bool,
    ) -> Result<Vec<Student>, Box<dyn std::error::Error + Send + Sync>> {
        let sql = if active_only {
            format!(
                "SELECT {} FROM students WHERE is_active = TRUE ORDER BY full_name",
                STUDENT_COLUMNS
            )
        } else {
            format!("SELECT {} FROM students ORDER BY full_name", STUDENT_COLUMNS)
        };

        let rows = sqlx::query_as::<_, StudentRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Student::from).collect())
    }

    async fn update_student(
        &self,
        student: &Student,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            UPDATE students
            SET full_name = $1, contact = $2, telegram_chat_id = $3, teacher_id = $4,
                tz_offset_minutes = $5, book_until_cancellation = $6, is_active = $7
            WHERE id = $8
            "#,
        )
        .bind(&student.full_name)
        .bind(student.contact.as_ref().map(|c| c.inner().as_str()))
        .bind(student.telegram_chat_id)
        .bind(student.teacher_id)
        .bind(student.tz_offset_minutes)
        .bind(student.book_until_cancellation)
        .bind(student.is_active)
        .bind(student.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_book_until_cancellation(
        &self,
        id: Uuid,
        value: bool,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query("UPDATE students SET book_until_cancellation = $1 WHERE id = $2")
            .bind(value)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_student(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        // Deactivate rather than drop the row; lessons keep their references
        sqlx::query("UPDATE students SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
