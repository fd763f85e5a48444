// src/handlers/alumni.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    models::alumni::{
        AdminDirectoryParams, ConnectResponse, CreateAlumniPayload, CreateAlumniResponse,
        ConsentRecord, DirectoryEntry, DirectoryParams, UpdateConsentPayload,
    },
    services::directory_service::DirectoryService,
};

// =============================================================================
//  ÁREA 1: DIRETÓRIO PÚBLICO
// =============================================================================

// GET /api/alumni?bbox=west,south,east,north
#[utoipa::path(
    get,
    path = "/api/alumni",
    tag = "Alumni",
    params(DirectoryParams),
    responses(
        (status = 200, description = "Ex-alunos com consentimento, já com a visibilidade aplicada", body = Vec<DirectoryEntry>),
        (status = 400, description = "bbox malformada")
    )
)]
pub async fn search_alumni(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(params): Query<DirectoryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let bbox = DirectoryService::parse_bbox(params.bbox.as_deref()).map_err(to_api)?;

    // O diretório público exige consentimento, sempre.
    let entries = app_state
        .directory_service
        .search(bbox, true, None)
        .await
        .map_err(to_api)?;

    Ok((StatusCode::OK, Json(entries)))
}

// POST /api/alumni
// Rota anônima: o registro nasce sem instituição.
#[utoipa::path(
    post,
    path = "/api/alumni",
    tag = "Alumni",
    request_body = CreateAlumniPayload,
    responses(
        (status = 200, description = "Ex-aluno cadastrado", body = CreateAlumniResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 500, description = "Falha no armazenamento")
    )
)]
pub async fn create_alumni(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateAlumniPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let id = app_state
        .directory_service
        .create(payload, None)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(CreateAlumniResponse { ok: true, id })))
}

// POST /api/alumni/connect
// Só registra o pedido no log; não há envio de notificação.
#[utoipa::path(
    post,
    path = "/api/alumni/connect",
    tag = "Alumni",
    responses(
        (status = 200, description = "Pedido de conexão registrado", body = ConnectResponse)
    )
)]
pub async fn connect(Json(body): Json<Value>) -> impl IntoResponse {
    tracing::info!("🤝 Pedido de conexão recebido: {}", body);

    Json(ConnectResponse { ok: true, message: "Connection request sent".to_string() })
}

// =============================================================================
//  ÁREA 2: GESTÃO PELO ADMIN (escopo da instituição)
// =============================================================================

// GET /api/admin/alumni
#[utoipa::path(
    get,
    path = "/api/admin/alumni",
    tag = "Admin Alumni",
    params(AdminDirectoryParams),
    responses(
        (status = 200, description = "Ex-alunos da instituição do admin", body = Vec<DirectoryEntry>),
        (status = 400, description = "bbox malformada"),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn search_institution_alumni(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(params): Query<AdminDirectoryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let bbox = DirectoryService::parse_bbox(params.bbox.as_deref()).map_err(to_api)?;

    let entries = app_state
        .directory_service
        .search(bbox, !params.include_withdrawn, Some(&tenant))
        .await
        .map_err(to_api)?;

    Ok((StatusCode::OK, Json(entries)))
}

// POST /api/admin/alumni
#[utoipa::path(
    post,
    path = "/api/admin/alumni",
    tag = "Admin Alumni",
    request_body = CreateAlumniPayload,
    responses(
        (status = 200, description = "Ex-aluno cadastrado na instituição do admin", body = CreateAlumniResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_institution_alumni(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Json(payload): Json<CreateAlumniPayload>,
) -> Result<impl IntoResponse, ApiError> {
    // A instituição vem do token.
    let id = app_state
        .directory_service
        .create(payload, Some(tenant.0))
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(CreateAlumniResponse { ok: true, id })))
}

// PATCH /api/admin/alumni/{id}/consent
#[utoipa::path(
    patch,
    path = "/api/admin/alumni/{id}/consent",
    tag = "Admin Alumni",
    request_body = UpdateConsentPayload,
    params(("id" = Uuid, Path, description = "ID do ex-aluno")),
    responses(
        (status = 200, description = "Consentimento atualizado", body = ConsentRecord),
        (status = 403, description = "Ex-aluno de outra instituição"),
        (status = 404, description = "Ex-aluno não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_consent(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateConsentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let consent = app_state
        .directory_service
        .update_consent(&tenant, id, payload.opt_in)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(consent)))
}
