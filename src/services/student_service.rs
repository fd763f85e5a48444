// src/services/student_service.rs

use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::StudentStore,
    middleware::tenancy::TenantContext,
    models::student::{CreateStudentPayload, NewStudent, Student},
};

#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
}

impl StudentService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    pub async fn create_student(
        &self,
        tenant: &TenantContext,
        payload: CreateStudentPayload,
    ) -> Result<Student, AppError> {
        payload.validate()?;

        // A instituição vem SEMPRE do token, nunca do payload.
        self.store
            .insert_student(NewStudent {
                institution_id: tenant.0,
                name: payload.name.trim().to_string(),
                email: payload.email,
                enrollment_year: payload.enrollment_year,
                program: payload.program,
            })
            .await
    }

    pub async fn list_students(&self, tenant: &TenantContext) -> Result<Vec<Student>, AppError> {
        self.store.list_students(tenant.0).await
    }

    /// 404 se não existe; 403 se existe em outra instituição.
    pub async fn get_student(&self, tenant: &TenantContext, id: Uuid) -> Result<Student, AppError> {
        let student = self
            .store
            .find_student(id)
            .await?
            .ok_or(AppError::NotFound("Student"))?;

        tenant.authorize(Some(student.institution_id))?;
        Ok(student)
    }

    pub async fn delete_student(&self, tenant: &TenantContext, id: Uuid) -> Result<(), AppError> {
        // Mesma checagem do get: primeiro existência, depois dono.
        self.get_student(tenant, id).await?;
        self.store.delete_student(id).await?;

        tracing::info!("🗑️ Estudante {} removido pela instituição {}", id, tenant.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;

    fn payload(name: &str) -> CreateStudentPayload {
        CreateStudentPayload {
            name: name.into(),
            email: Some(format!("{}@college.edu", name.to_lowercase())),
            enrollment_year: Some(2023),
            program: Some("CS".into()),
        }
    }

    #[tokio::test]
    async fn tenant_b_never_lists_tenant_a_students() {
        let svc = StudentService::new(Arc::new(MemoryStore::default()));
        let a = TenantContext(Uuid::new_v4());
        let b = TenantContext(Uuid::new_v4());

        let created = svc.create_student(&a, payload("Alice")).await.unwrap();

        let listed_by_b = svc.list_students(&b).await.unwrap();
        assert!(listed_by_b.iter().all(|s| s.institution_id != a.0));
        assert!(listed_by_b.is_empty());

        let listed_by_a = svc.list_students(&a).await.unwrap();
        assert_eq!(listed_by_a.iter().map(|s| s.id).collect::<Vec<_>>(), vec![created.id]);
    }

    #[tokio::test]
    async fn whitespace_only_name_is_rejected() {
        let svc = StudentService::new(Arc::new(MemoryStore::default()));
        let a = TenantContext(Uuid::new_v4());
        let blank = CreateStudentPayload { name: "   ".into(), email: None, enrollment_year: None, program: None };

        match svc.create_student(&a, blank).await {
            Err(AppError::ValidationError(errors)) => assert!(errors.field_errors().contains_key("name")),
            other => panic!("esperava erro de validação, veio {other:?}"),
        }
        assert!(svc.list_students(&a).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn cross_tenant_access_is_forbidden_not_empty() {
        let svc = StudentService::new(Arc::new(MemoryStore::default()));
        let a = TenantContext(Uuid::new_v4());
        let b = TenantContext(Uuid::new_v4());
        let student = svc.create_student(&a, payload("Bob")).await.unwrap();

        assert!(matches!(svc.get_student(&b, student.id).await, Err(AppError::CrossTenantAccess)));
        assert!(matches!(svc.delete_student(&b, student.id).await, Err(AppError::CrossTenantAccess)));
        // Continua lá para o dono
        assert_eq!(svc.get_student(&a, student.id).await.unwrap().id, student.id);
    }

    #[tokio::test]
    async fn missing_student_is_not_found() {
        let svc = StudentService::new(Arc::new(MemoryStore::default()));
        let a = TenantContext(Uuid::new_v4());

        assert!(matches!(svc.get_student(&a, Uuid::new_v4()).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn owner_can_delete() {
        let svc = StudentService::new(Arc::new(MemoryStore::default()));
        let a = TenantContext(Uuid::new_v4());
        let student = svc.create_student(&a, payload("Carol")).await.unwrap();

        svc.delete_student(&a, student.id).await.unwrap();
        assert!(svc.list_students(&a).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let svc = StudentService::new(Arc::new(MemoryStore::default()));
        let a = TenantContext(Uuid::new_v4());
        let mut bad = payload("Dan");
        bad.email = Some("not-an-email".into());

        assert!(matches!(svc.create_student(&a, bad).await, Err(AppError::ValidationError(_))));
    }
}
