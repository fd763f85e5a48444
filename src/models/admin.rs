// src/models/admin.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// 1. Institution (o "Tenant")
// ---
// A faculdade: a unidade de isolamento entre administradores
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    pub id: Uuid,
    #[schema(example = "Universidade Federal")]
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// ---
// 2. Admin (pertence a exatamente uma instituição)
// ---
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: Uuid,
    pub institution_id: Uuid,
    #[schema(example = "admin@faculdade.edu")]
    pub email: String,
    pub name: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub institution_id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

// Dados para registro de um novo admin (rota privilegiada)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterAdminPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[validate(length(min = 2, message = "O nome da instituição deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Universidade Federal")]
    pub institution: String,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginAdminPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do admin)
    pub tid: Uuid,  // Tenant (ID da instituição)
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued At
}

/// O admin autenticado, já com a instituição validada.
/// O middleware insere isto nos "extensions" da requisição.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub admin: Admin,
    pub institution_id: Uuid,
}
