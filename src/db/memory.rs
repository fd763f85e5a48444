// Armazenamento em memória para os testes (mesma semântica do Postgres).

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AdminStore, AlumniStore, DirectoryFilter, StudentStore},
    models::{
        admin::{Admin, Institution, NewAdmin},
        alumni::{AlumniRecord, ConsentRecord, NewAlumni},
        student::{NewStudent, Student},
    },
};

#[derive(Default)]
pub struct MemoryStore {
    alumni: Mutex<Vec<AlumniRecord>>,
    institutions: Mutex<Vec<Institution>>,
    admins: Mutex<Vec<Admin>>,
    students: Mutex<Vec<Student>>,
}

impl MemoryStore {
    /// Insere um registro pronto (permite controlar created_at nos testes).
    pub fn push_alumni(&self, record: AlumniRecord) {
        self.alumni.lock().unwrap().push(record);
    }
}

#[async_trait]
impl AlumniStore for MemoryStore {
    async fn insert_alumni(&self, new: NewAlumni) -> Result<AlumniRecord, AppError> {
        let now = Utc::now();
        let record = AlumniRecord {
            id: Uuid::new_v4(),
            institution_id: new.institution_id,
            name: new.name,
            graduation_year: new.graduation_year,
            company: new.company,
            role: new.role,
            skills: new.skills,
            city: new.city,
            state: new.state,
            location: new.location,
            display_point: new.display_point,
            location_visibility: new.location_visibility,
            consent: new.consent,
            created_at: now,
            updated_at: now,
        };
        self.alumni.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn search_alumni(&self, filter: &DirectoryFilter) -> Result<Vec<AlumniRecord>, AppError> {
        let mut hits: Vec<AlumniRecord> = self
            .alumni
            .lock()
            .unwrap()
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();

        hits.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        hits.truncate(filter.limit);
        Ok(hits)
    }

    async fn find_alumni(&self, id: Uuid) -> Result<Option<AlumniRecord>, AppError> {
        Ok(self.alumni.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn update_consent(&self, id: Uuid, consent: ConsentRecord) -> Result<(), AppError> {
        let mut alumni = self.alumni.lock().unwrap();
        let record = alumni
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::NotFound("Alumni"))?;
        record.consent = consent;
        record.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl AdminStore for MemoryStore {
    async fn find_or_create_institution(&self, name: &str) -> Result<Institution, AppError> {
        let mut institutions = self.institutions.lock().unwrap();
        if let Some(existing) = institutions.iter().find(|i| i.name == name) {
            return Ok(existing.clone());
        }
        let institution = Institution { id: Uuid::new_v4(), name: name.to_string(), created_at: Utc::now() };
        institutions.push(institution.clone());
        Ok(institution)
    }

    async fn create_admin(&self, new: NewAdmin) -> Result<Admin, AppError> {
        let mut admins = self.admins.lock().unwrap();
        if admins.iter().any(|a| a.email == new.email) {
            return Err(AppError::EmailAlreadyExists);
        }
        let now = Utc::now();
        let admin = Admin {
            id: Uuid::new_v4(),
            institution_id: new.institution_id,
            email: new.email,
            name: new.name,
            password_hash: new.password_hash,
            created_at: now,
            updated_at: now,
        };
        admins.push(admin.clone());
        Ok(admin)
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, AppError> {
        Ok(self.admins.lock().unwrap().iter().find(|a| a.email == email).cloned())
    }

    async fn find_admin_by_id(&self, id: Uuid) -> Result<Option<Admin>, AppError> {
        Ok(self.admins.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn insert_student(&self, new: NewStudent) -> Result<Student, AppError> {
        let now = Utc::now();
        let student = Student {
            id: Uuid::new_v4(),
            institution_id: new.institution_id,
            name: new.name,
            email: new.email,
            enrollment_year: new.enrollment_year,
            program: new.program,
            created_at: now,
            updated_at: now,
        };
        self.students.lock().unwrap().push(student.clone());
        Ok(student)
    }

    async fn list_students(&self, institution_id: Uuid) -> Result<Vec<Student>, AppError> {
        Ok(self
            .students
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.institution_id == institution_id)
            .cloned()
            .collect())
    }

    async fn find_student(&self, id: Uuid) -> Result<Option<Student>, AppError> {
        Ok(self.students.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn delete_student(&self, id: Uuid) -> Result<(), AppError> {
        let mut students = self.students.lock().unwrap();
        let before = students.len();
        students.retain(|s| s.id != id);
        if students.len() == before {
            return Err(AppError::NotFound("Student"));
        }
        Ok(())
    }
}
