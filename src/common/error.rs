use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale, models::geo::BoundingBoxError};

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Bounding box inválida: {0}")]
    InvalidBoundingBox(#[from] BoundingBoxError),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Chave interna rejeitada")]
    InternalKeyRejected,

    // Recurso existe, mas pertence a outra instituição
    #[error("Acesso a recurso de outra instituição")]
    CrossTenantAccess,

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

/// O erro que de fato vai para o cliente (já traduzido).
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidBoundingBox(_) => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::InternalKeyRejected | AppError::CrossTenantAccess => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Chave da mensagem no I18nStore
    fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation",
            AppError::InvalidBoundingBox(_) => "invalid_bbox",
            AppError::EmailAlreadyExists => "email_exists",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::InternalKeyRejected => "internal_key_rejected",
            AppError::CrossTenantAccess => "cross_tenant",
            AppError::NotFound(_) => "not_found",
            _ => "internal",
        }
    }

    /// Converte para a resposta final, no idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status();
        let message = store.translate(&locale.0, self.message_key());

        let details = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details: HashMap<String, Vec<String>> = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(m) => m.to_string(),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                // Erros aninhados (ex: location.lat) não aparecem em field_errors()
                for field in errors.errors().keys() {
                    details.entry(field.to_string()).or_default();
                }
                Some(json!(details))
            }
            AppError::InvalidBoundingBox(reason) => Some(json!(reason.to_string())),
            AppError::NotFound(resource) => Some(json!(resource)),
            _ => None,
        };

        // Para falhas do armazenamento, a mensagem do banco segue para o cliente.
        let error = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("🔥 Erro Interno do Servidor: {}", self);
            self.to_string()
        } else {
            message
        };

        ApiError { status, error, details }
    }
}

// Usado pelos middlewares, que não têm acesso ao Locale: responde em inglês.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), &I18nStore::default()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_keep_auth_failures_apart_from_absence() {
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::CrossTenantAccess.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::InternalKeyRejected.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("Student").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::InvalidBoundingBox(BoundingBoxError::WrongArity(3)).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn store_failures_carry_the_underlying_message() {
        let err = AppError::DatabaseError(sqlx::Error::PoolTimedOut);
        let api = err.to_api_error(&Locale::default(), &I18nStore::default());

        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(api.error.contains("pool timed out"), "got: {}", api.error);
    }

    #[test]
    fn messages_follow_the_client_locale() {
        let store = I18nStore::default();
        let en = AppError::CrossTenantAccess.to_api_error(&Locale("en".into()), &store);
        let pt = AppError::CrossTenantAccess.to_api_error(&Locale("pt".into()), &store);

        assert_ne!(en.error, pt.error);
        assert_eq!(en.status, pt.status);
    }
}
