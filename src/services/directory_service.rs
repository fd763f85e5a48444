// src/services/directory_service.rs

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{AlumniStore, DirectoryFilter},
    middleware::tenancy::TenantContext,
    models::{
        alumni::{ConsentRecord, CreateAlumniPayload, DirectoryEntry, NewAlumni},
        geo::{BoundingBox, GeoPoint},
    },
};

/// Máximo de entradas devolvidas por busca.
pub const MAX_DIRECTORY_RESULTS: usize = 200;

#[derive(Clone)]
pub struct DirectoryService {
    store: Arc<dyn AlumniStore>,
    default_opt_in: bool,
}

impl DirectoryService {
    pub fn new(store: Arc<dyn AlumniStore>, default_opt_in: bool) -> Self {
        Self { store, default_opt_in }
    }

    /// Query string -> BoundingBox. Ausente ou vazia significa "sem filtro".
    pub fn parse_bbox(raw: Option<&str>) -> Result<Option<BoundingBox>, AppError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Ok(Some(raw.parse::<BoundingBox>()?)),
        }
    }

    /// LÓGICA DE NEGÓCIO: a busca do diretório.
    /// Filtra por consentimento e bbox, ordena por (created_at, id), corta em
    /// MAX_DIRECTORY_RESULTS e aplica a visibilidade de cada registro.
    pub async fn search(
        &self,
        bbox: Option<BoundingBox>,
        consent_required: bool,
        tenant: Option<&TenantContext>,
    ) -> Result<Vec<DirectoryEntry>, AppError> {
        let filter = DirectoryFilter {
            bbox,
            consent_required,
            institution_id: tenant.map(|t| t.0),
            limit: MAX_DIRECTORY_RESULTS,
        };

        let records = self.store.search_alumni(&filter).await?;

        // O consentimento é lido a cada requisição; nada aqui é cacheado.
        let entries: Vec<DirectoryEntry> = records
            .iter()
            .filter(|record| filter.matches(record))
            .take(MAX_DIRECTORY_RESULTS)
            .map(DirectoryEntry::from)
            .collect();

        tracing::debug!(
            "🔎 Diretório: {} resultado(s) (bbox: {:?}, instituição: {:?})",
            entries.len(),
            bbox,
            filter.institution_id
        );

        Ok(entries)
    }

    /// Cadastra um ex-aluno. `institution_id` já vem resolvido pelo handler:
    /// `None` na rota pública, a instituição do token na rota de admin.
    pub async fn create(
        &self,
        payload: CreateAlumniPayload,
        institution_id: Option<Uuid>,
    ) -> Result<Uuid, AppError> {
        payload.validate()?;

        // Sem consentimento explícito, vale o padrão configurado.
        let now = Utc::now();
        let consent = match payload.consent_record {
            Some(input) => ConsentRecord { opt_in: input.opt_in, timestamp: input.timestamp.unwrap_or(now) },
            None => ConsentRecord { opt_in: self.default_opt_in, timestamp: now },
        };

        let new = NewAlumni {
            institution_id,
            name: payload.name.trim().to_string(),
            graduation_year: payload.graduation_year,
            company: payload.company,
            role: payload.role,
            skills: payload.skills,
            city: payload.city,
            state: payload.state,
            location: payload.location.map(GeoPoint::from),
            display_point: payload.display_point.map(GeoPoint::from),
            location_visibility: payload.location_visibility,
            consent,
        };

        let record = self.store.insert_alumni(new).await?;
        tracing::info!("🎓 Ex-aluno {} cadastrado (opt-in: {})", record.id, record.consent.opt_in);

        Ok(record.id)
    }

    /// Atualiza o consentimento de um ex-aluno da própria instituição.
    /// Vale já na próxima busca.
    pub async fn update_consent(
        &self,
        tenant: &TenantContext,
        alumni_id: Uuid,
        opt_in: bool,
    ) -> Result<ConsentRecord, AppError> {
        let record = self
            .store
            .find_alumni(alumni_id)
            .await?
            .ok_or(AppError::NotFound("Alumni"))?;

        tenant.authorize(record.institution_id)?;

        let consent = ConsentRecord { opt_in, timestamp: Utc::now() };
        self.store.update_consent(alumni_id, consent).await?;

        tracing::info!("📝 Consentimento de {} alterado para {}", alumni_id, opt_in);
        Ok(consent)
    }
}
