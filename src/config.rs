// src/config.rs

use anyhow::Context;
use sqlx::PgPool;
use std::{env, sync::Arc};

use crate::{
    common::i18n::I18nStore,
    db::{AdminRepository, AdminStore, AlumniRepository, AlumniStore, StudentRepository, StudentStore},
    services::{auth::AuthService, directory_service::DirectoryService, student_service::StudentService},
};

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuração resolvida UMA vez no start e compartilhada só para leitura.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub internal_api_key: Option<String>,
    // Consentimento assumido quando o cadastro não informa nenhum
    pub default_opt_in: bool,
    pub bcrypt_cost: u32,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // O .env é opcional (em produção as variáveis vêm do ambiente)
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de qualquer fonte chave -> valor.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = match non_empty("DATABASE_URL") {
            Some(url) => url,
            None => legacy_database_url(&non_empty)?,
        };
        let jwt_secret = non_empty("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let port = match non_empty("PORT") {
            Some(raw) => raw.trim().parse::<u16>().with_context(|| format!("PORT inválida: '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        let default_opt_in = match non_empty("DEFAULT_OPT_IN") {
            Some(raw) => parse_bool(&raw).with_context(|| format!("DEFAULT_OPT_IN inválido: '{raw}'"))?,
            None => true,
        };

        let bcrypt_cost = match non_empty("BCRYPT_COST") {
            Some(raw) => raw.trim().parse::<u32>().with_context(|| format!("BCRYPT_COST inválido: '{raw}'"))?,
            None => bcrypt::DEFAULT_COST,
        };

        let db_max_connections = match non_empty("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: '{raw}'"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            port,
            internal_api_key: non_empty("INTERNAL_API_KEY"),
            default_opt_in,
            bcrypt_cost,
            db_max_connections,
        })
    }
}

// Nomes antigos da variável de conexão. Só valem se apontarem para um Postgres.
const LEGACY_DATABASE_VARS: [&str; 2] = ["MONGO_URI", "MONGODB_URI"];

fn legacy_database_url<F>(non_empty: &F) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    for key in LEGACY_DATABASE_VARS {
        if let Some(url) = non_empty(key) {
            let scheme = url.trim().split("://").next().unwrap_or_default().to_ascii_lowercase();
            if scheme == "postgres" || scheme == "postgresql" {
                tracing::warn!("⚠️ {key} está obsoleta; use DATABASE_URL");
                return Ok(url);
            }
            anyhow::bail!("{key} não aponta para um Postgres ('{scheme}://'); defina DATABASE_URL");
        }
    }
    anyhow::bail!("DATABASE_URL deve ser definida")
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("esperado true/false, recebeu '{other}'"),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub i18n_store: Arc<I18nStore>,
    pub auth_service: AuthService,
    pub directory_service: DirectoryService,
    pub student_service: StudentService,
}

impl AppState {
    /// Monta o gráfico de dependências sobre o Postgres.
    pub fn from_pool(config: &Config, pool: PgPool) -> Self {
        Self::with_stores(
            config,
            Arc::new(AlumniRepository::new(pool.clone())),
            Arc::new(AdminRepository::new(pool.clone())),
            Arc::new(StudentRepository::new(pool)),
        )
    }

    pub fn with_stores(
        config: &Config,
        alumni_store: Arc<dyn AlumniStore>,
        admin_store: Arc<dyn AdminStore>,
        student_store: Arc<dyn StudentStore>,
    ) -> Self {
        let auth_service = AuthService::new(
            admin_store,
            config.jwt_secret.clone(),
            config.internal_api_key.clone(),
            config.bcrypt_cost,
        );
        let directory_service = DirectoryService::new(alumni_store, config.default_opt_in);
        let student_service = StudentService::new(student_store);

        Self {
            i18n_store: Arc::new(I18nStore::default()),
            auth_service,
            directory_service,
            student_service,
        }
    }
}
