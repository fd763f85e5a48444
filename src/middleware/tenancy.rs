// src/middleware/tenancy.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{common::error::AppError, models::admin::AdminContext};

// A instituição em nome da qual o admin está agindo.
// Não vem de cabeçalho: é derivada do token validado pelo `admin_guard`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TenantContext(pub Uuid);

impl TenantContext {
    /// Garante que o recurso pertence a esta instituição.
    /// Recurso de outra instituição é rejeitado (403), nunca "escondido".
    pub fn authorize(&self, owner: Option<Uuid>) -> Result<(), AppError> {
        match owner {
            Some(owner) if owner == self.0 => Ok(()),
            _ => Err(AppError::CrossTenantAccess),
        }
    }
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminContext>()
            .map(|ctx| TenantContext(ctx.institution_id))
            .ok_or(AppError::InvalidToken)
    }
}
