use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::{common::error::AppError, config::AppState, models::admin::AdminContext};

const INTERNAL_API_KEY_HEADER: &str = "x-internal-api-key";

// O middleware em si: valida o Bearer token e injeta o AdminContext
pub async fn admin_guard(
    State(app_state): State<AppState>,
    mut request: axum::extract::Request,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AppError::InvalidToken)?;

    let ctx = app_state.auth_service.validate_token(bearer.token()).await?;

    // Insere o admin nos "extensions" da requisição
    request.extensions_mut().insert(ctx);
    Ok(next.run(request).await)
}

// Extrator para obter o admin autenticado diretamente nos handlers
pub struct CurrentAdmin(pub AdminContext);

impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminContext>()
            .cloned()
            .map(CurrentAdmin)
            .ok_or(AppError::InvalidToken)
    }
}

// Valor cru do cabeçalho x-internal-api-key (a comparação fica no AuthService)
pub struct InternalApiKey(pub Option<String>);

impl<S> FromRequestParts<S> for InternalApiKey
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(INTERNAL_API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(InternalApiKey(key))
    }
}
