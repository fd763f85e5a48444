// src/db/alumni_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AlumniStore, DirectoryFilter},
    models::alumni::{AlumniRecord, AlumniRow, ConsentRecord, NewAlumni},
};

// O repositório de ex-alunos, responsável pela tabela 'alumni'
#[derive(Clone)]
pub struct AlumniRepository {
    pool: PgPool,
}

impl AlumniRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Monta o SELECT do diretório: o mesmo predicado de `DirectoryFilter::matches`,
/// ordenado por (created_at, id) e com o LIMIT no fim.
fn directory_query(filter: &DirectoryFilter) -> QueryBuilder<'static, Postgres> {
    let mut query: QueryBuilder<'static, Postgres> = QueryBuilder::new("SELECT * FROM alumni WHERE TRUE");

    if filter.consent_required {
        query.push(" AND consent_opt_in = TRUE");
    }

    if let Some(institution_id) = filter.institution_id {
        query.push(" AND institution_id = ").push_bind(institution_id);
    }

    if let Some(bbox) = filter.bbox {
        // `<@` usa o índice GiST, mas o Postgres compara pontos com tolerância (EPSILON).
        // Os BETWEEN deixam o corte exato, senão o LIMIT gasta vagas com linhas
        // que o serviço descarta depois. Linhas sem localização ficam de fora.
        query
            .push(" AND point(location_lng, location_lat) <@ box(point(")
            .push_bind(bbox.west)
            .push(", ")
            .push_bind(bbox.south)
            .push("), point(")
            .push_bind(bbox.east)
            .push(", ")
            .push_bind(bbox.north)
            .push("))")
            .push(" AND location_lng BETWEEN ")
            .push_bind(bbox.west)
            .push(" AND ")
            .push_bind(bbox.east)
            .push(" AND location_lat BETWEEN ")
            .push_bind(bbox.south)
            .push(" AND ")
            .push_bind(bbox.north);
    }

    query
        .push(" ORDER BY created_at ASC, id ASC LIMIT ")
        .push_bind(i64::try_from(filter.limit).unwrap_or(i64::MAX));

    query
}

#[async_trait]
impl AlumniStore for AlumniRepository {
    async fn insert_alumni(&self, new: NewAlumni) -> Result<AlumniRecord, AppError> {
        let row = sqlx::query_as::<_, AlumniRow>(
            r#"
            INSERT INTO alumni (
                id, institution_id, name, graduation_year, company, role, skills, city, state,
                location_lng, location_lat, display_lng, display_lat,
                location_visibility, consent_opt_in, consent_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.institution_id)
        .bind(&new.name)
        .bind(new.graduation_year)
        .bind(&new.company)
        .bind(&new.role)
        .bind(&new.skills)
        .bind(&new.city)
        .bind(&new.state)
        // Colunas separadas: longitude sempre antes da latitude
        .bind(new.location.map(|p| p.lng))
        .bind(new.location.map(|p| p.lat))
        .bind(new.display_point.map(|p| p.lng))
        .bind(new.display_point.map(|p| p.lat))
        .bind(new.location_visibility)
        .bind(new.consent.opt_in)
        .bind(new.consent.timestamp)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // institution_id apontando para uma instituição que não existe
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::NotFound("Institution");
                }
            }
            AppError::from(e)
        })?;

        Ok(row.into())
    }

    async fn search_alumni(&self, filter: &DirectoryFilter) -> Result<Vec<AlumniRecord>, AppError> {
        let mut query = directory_query(filter);
        let rows = query
            .build_query_as::<AlumniRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(AlumniRecord::from).collect())
    }

    async fn find_alumni(&self, id: Uuid) -> Result<Option<AlumniRecord>, AppError> {
        let row = sqlx::query_as::<_, AlumniRow>("SELECT * FROM alumni WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(AlumniRecord::from))
    }

    async fn update_consent(&self, id: Uuid, consent: ConsentRecord) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE alumni
            SET consent_opt_in = $2, consent_at = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(consent.opt_in)
        .bind(consent.timestamp)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Alumni"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::geo::BoundingBox;

    fn filter(bbox: Option<BoundingBox>) -> DirectoryFilter {
        DirectoryFilter { bbox, consent_required: true, institution_id: None, limit: 200 }
    }

    #[test]
    fn bbox_predicate_is_exact_and_limit_comes_last() {
        let bbox = BoundingBox { west: 0.0, south: 0.0, east: 20.0, north: 30.0 };
        let query = directory_query(&filter(Some(bbox)));
        let sql = query.sql();

        assert!(sql.contains("point(location_lng, location_lat) <@ box("));
        assert!(sql.contains("location_lng BETWEEN $5 AND $6"));
        assert!(sql.contains("location_lat BETWEEN $7 AND $8"));
        assert!(sql.ends_with("ORDER BY created_at ASC, id ASC LIMIT $9"));
    }

    #[test]
    fn unbounded_search_has_no_spatial_predicate() {
        let query = directory_query(&filter(None));
        let sql = query.sql();

        assert!(sql.contains("consent_opt_in = TRUE"));
        assert!(!sql.contains("BETWEEN"));
        assert!(sql.ends_with("LIMIT $1"));
    }

    #[test]
    fn tenant_scope_is_bound_before_the_box() {
        let mut f = filter(Some(BoundingBox { west: 1.0, south: 1.0, east: 2.0, north: 2.0 }));
        f.institution_id = Some(Uuid::new_v4());
        f.consent_required = false;
        let query = directory_query(&f);
        let sql = query.sql();

        assert!(!sql.contains("consent_opt_in"));
        assert!(sql.contains("institution_id = $1"));
        assert!(sql.contains("location_lat BETWEEN $8 AND $9"));
    }
}
