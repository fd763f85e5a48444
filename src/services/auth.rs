// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::AdminStore,
    models::admin::{Admin, AdminContext, Claims, NewAdmin, RegisterAdminPayload},
};

const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AuthService {
    admin_store: Arc<dyn AdminStore>,
    jwt_secret: String,
    internal_api_key: Option<String>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        admin_store: Arc<dyn AdminStore>,
        jwt_secret: String,
        internal_api_key: Option<String>,
        bcrypt_cost: u32,
    ) -> Self {
        Self { admin_store, jwt_secret, internal_api_key, bcrypt_cost }
    }

    /// O registro de admin só é aceito com a chave interna correta.
    /// Sem INTERNAL_API_KEY configurada, o registro fica desligado.
    pub fn check_internal_key(&self, provided: Option<&str>) -> Result<(), AppError> {
        match (self.internal_api_key.as_deref(), provided) {
            (Some(expected), Some(provided)) if expected == provided => Ok(()),
            _ => Err(AppError::InternalKeyRejected),
        }
    }

    pub async fn register_admin(&self, payload: RegisterAdminPayload) -> Result<String, AppError> {
        payload.validate()?;

        // 1. Hashing num thread separado (bcrypt é CPU-bound)
        let password = payload.password.clone();
        let cost = self.bcrypt_cost;
        let password_hash = tokio::task::spawn_blocking(move || hash(&password, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // 2. Instituição (cria se ainda não existir)
        let institution = self
            .admin_store
            .find_or_create_institution(payload.institution.trim())
            .await?;

        // 3. Admin vinculado a exatamente uma instituição
        let admin = self
            .admin_store
            .create_admin(NewAdmin {
                institution_id: institution.id,
                email: payload.email.to_lowercase(),
                name: payload.name,
                password_hash,
            })
            .await?;

        tracing::info!("🔐 Admin {} registrado na instituição '{}'", admin.id, institution.name);

        self.create_token(&admin)
    }

    pub async fn login_admin(&self, email: &str, password: &str) -> Result<String, AppError> {
        let admin = self
            .admin_store
            .find_admin_by_email(&email.to_lowercase())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = admin.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(&admin)
    }

    /// Token -> AdminContext. O admin é recarregado do banco e a instituição
    /// do token precisa bater com a atual.
    pub async fn validate_token(&self, token: &str) -> Result<AdminContext, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        let admin = self
            .admin_store
            .find_admin_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if admin.institution_id != token_data.claims.tid {
            return Err(AppError::InvalidToken);
        }

        Ok(AdminContext { institution_id: admin.institution_id, admin })
    }

    fn create_token(&self, admin: &Admin) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(TOKEN_TTL_DAYS);

        let claims = Claims {
            sub: admin.id,
            tid: admin.institution_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
