use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        admin::{Admin, Institution, NewAdmin},
        alumni::{AlumniRecord, ConsentRecord, NewAlumni},
        geo::BoundingBox,
        student::{NewStudent, Student},
    },
};

pub mod alumni_repo;
pub use alumni_repo::AlumniRepository;
pub mod admin_repo;
pub use admin_repo::AdminRepository;
pub mod student_repo;
pub use student_repo::StudentRepository;

#[cfg(test)]
pub mod memory;

/// Critérios de busca do diretório, já validados.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryFilter {
    pub bbox: Option<BoundingBox>,
    pub consent_required: bool,
    // `Some(t)` restringe à instituição `t` (rotas de admin)
    pub institution_id: Option<Uuid>,
    pub limit: usize,
}

impl DirectoryFilter {
    /// O mesmo predicado que o SQL aplica, sem o limite.
    pub fn matches(&self, record: &AlumniRecord) -> bool {
        if self.consent_required && !record.consent.opt_in {
            return false;
        }
        if self.institution_id.is_some() && record.institution_id != self.institution_id {
            return false;
        }
        match (&self.bbox, &record.location) {
            (None, _) => true,
            (Some(bbox), Some(point)) => bbox.contains(point),
            (Some(_), None) => false,
        }
    }
}

// ---
// Traits de armazenamento
// ---
// Os serviços dependem destas traits; em produção quem responde é o Postgres.

#[async_trait]
pub trait AlumniStore: Send + Sync {
    async fn insert_alumni(&self, new: NewAlumni) -> Result<AlumniRecord, AppError>;

    /// Ordenado por (created_at, id) e limitado a `filter.limit`.
    async fn search_alumni(&self, filter: &DirectoryFilter) -> Result<Vec<AlumniRecord>, AppError>;

    async fn find_alumni(&self, id: Uuid) -> Result<Option<AlumniRecord>, AppError>;

    async fn update_consent(&self, id: Uuid, consent: ConsentRecord) -> Result<(), AppError>;
}

#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn find_or_create_institution(&self, name: &str) -> Result<Institution, AppError>;

    async fn create_admin(&self, new: NewAdmin) -> Result<Admin, AppError>;

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, AppError>;

    async fn find_admin_by_id(&self, id: Uuid) -> Result<Option<Admin>, AppError>;
}

#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn insert_student(&self, new: NewStudent) -> Result<Student, AppError>;

    async fn list_students(&self, institution_id: Uuid) -> Result<Vec<Student>, AppError>;

    async fn find_student(&self, id: Uuid) -> Result<Option<Student>, AppError>;

    async fn delete_student(&self, id: Uuid) -> Result<(), AppError>;
}
