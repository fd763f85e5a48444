use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::StudentStore,
    models::student::{NewStudent, Student},
};

#[derive(Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for StudentRepository {
    async fn insert_student(&self, new: NewStudent) -> Result<Student, AppError> {
        Ok(sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (id, institution_id, name, email, enrollment_year, program)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.institution_id)
        .bind(&new.name)
        .bind(&new.email)
        .bind(new.enrollment_year)
        .bind(&new.program)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_students(&self, institution_id: Uuid) -> Result<Vec<Student>, AppError> {
        Ok(sqlx::query_as::<_, Student>(
            r#"
            SELECT * FROM students
            WHERE institution_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(institution_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_student(&self, id: Uuid) -> Result<Option<Student>, AppError> {
        Ok(sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_student(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Student"));
        }
        Ok(())
    }
}
