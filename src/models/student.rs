// src/models/student.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_not_blank;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub institution_id: Uuid,
    #[schema(example = "João Lima")]
    pub name: String,
    pub email: Option<String>,
    #[schema(example = 2022)]
    pub enrollment_year: Option<i32>,
    #[schema(example = "Engenharia de Computação")]
    pub program: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub institution_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub enrollment_year: Option<i32>,
    pub program: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    #[validate(range(min = 1900, max = 2100, message = "Ano de ingresso inválido."))]
    pub enrollment_year: Option<i32>,

    pub program: Option<String>,
}
