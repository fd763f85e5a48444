use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::{CurrentAdmin, InternalApiKey},
        i18n::Locale,
    },
    models::admin::{Admin, AuthResponse, LoginAdminPayload, RegisterAdminPayload},
};

// Handler de registro (rota privilegiada: exige x-internal-api-key)
#[utoipa::path(
    post,
    path = "/api/admin/register",
    tag = "Admin Auth",
    request_body = RegisterAdminPayload,
    params(("x-internal-api-key" = String, Header, description = "Chave interna de provisionamento")),
    responses(
        (status = 201, description = "Admin registrado", body = AuthResponse),
        (status = 403, description = "Chave interna ausente ou inválida"),
        (status = 409, description = "E-mail já em uso")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    locale: Locale,
    InternalApiKey(key): InternalApiKey,
    Json(payload): Json<RegisterAdminPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    app_state.auth_service.check_internal_key(key.as_deref()).map_err(to_api)?;

    let token = app_state
        .auth_service
        .register_admin(payload)
        .await
        .map_err(to_api)?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

// Handler de login
#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "Admin Auth",
    request_body = LoginAdminPayload,
    responses(
        (status = 200, description = "Login efetuado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<LoginAdminPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    payload.validate().map_err(|e| to_api(AppError::ValidationError(e)))?;

    let token = app_state
        .auth_service
        .login_admin(&payload.email, &payload.password)
        .await
        .map_err(to_api)?;

    Ok((StatusCode::OK, Json(AuthResponse { token })))
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub admin: Admin,
    pub institution_id: Uuid,
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/admin/me",
    tag = "Admin Auth",
    responses(
        (status = 200, description = "Admin autenticado", body = MeResponse),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(CurrentAdmin(ctx): CurrentAdmin) -> Json<MeResponse> {
    Json(MeResponse { institution_id: ctx.institution_id, admin: ctx.admin })
}
