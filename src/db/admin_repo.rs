use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AdminStore,
    models::admin::{Admin, Institution, NewAdmin},
};

// Repositório de admins e instituições (tabelas 'admins' e 'institutions')
#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminStore for AdminRepository {
    async fn find_or_create_institution(&self, name: &str) -> Result<Institution, AppError> {
        // O "DO UPDATE" sem efeito garante que o RETURNING devolva a linha existente.
        let institution = sqlx::query_as::<_, Institution>(
            r#"
            INSERT INTO institutions (id, name)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(institution)
    }

    async fn create_admin(&self, new: NewAdmin) -> Result<Admin, AppError> {
        sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (id, institution_id, email, name, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.institution_id)
        .bind(&new.email)
        .bind(&new.name)
        .bind(&new.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Converte erro de violação de chave única em um erro mais amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, AppError> {
        Ok(sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_admin_by_id(&self, id: Uuid) -> Result<Option<Admin>, AppError> {
        Ok(sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }
}
