// src/handlers/students.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    models::student::{CreateStudentPayload, Student},
};

// POST /api/admin/students
#[utoipa::path(
    post,
    path = "/api/admin/students",
    tag = "Students",
    request_body = CreateStudentPayload,
    responses(
        (status = 201, description = "Estudante criado na instituição do admin", body = Student),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_student(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Json(payload): Json<CreateStudentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let student = app_state
        .student_service
        .create_student(&tenant, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(student)))
}

// GET /api/admin/students
#[utoipa::path(
    get,
    path = "/api/admin/students",
    tag = "Students",
    responses(
        (status = 200, description = "Estudantes da instituição", body = Vec<Student>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_students(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let students = app_state
        .student_service
        .list_students(&tenant)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(students)))
}

// GET /api/admin/students/{id}
#[utoipa::path(
    get,
    path = "/api/admin/students/{id}",
    tag = "Students",
    params(("id" = Uuid, Path, description = "ID do estudante")),
    responses(
        (status = 200, description = "Estudante", body = Student),
        (status = 403, description = "Estudante de outra instituição"),
        (status = 404, description = "Estudante não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_student(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let student = app_state
        .student_service
        .get_student(&tenant, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(student)))
}

// DELETE /api/admin/students/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/students/{id}",
    tag = "Students",
    params(("id" = Uuid, Path, description = "ID do estudante")),
    responses(
        (status = 204, description = "Estudante removido"),
        (status = 403, description = "Estudante de outra instituição"),
        (status = 404, description = "Estudante não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_student(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .student_service
        .delete_student(&tenant, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
