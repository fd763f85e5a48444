// src/models/alumni.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::validation::validate_not_blank,
    models::geo::{GeoPoint, LatLng},
};

// --- ENUMS ---

// Mapeia o CREATE TYPE location_visibility do banco
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "location_visibility", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LocationVisibility {
    Exact,
    #[default]
    City,
    Country,
    Hidden,
}

// --- CONSENTIMENTO ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConsentRecord {
    pub opt_in: bool,
    pub timestamp: DateTime<Utc>,
}

// O que o cliente pode mandar: o timestamp é opcional (assume "agora").
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct ConsentInput {
    #[schema(example = true)]
    pub opt_in: bool,
    pub timestamp: Option<DateTime<Utc>>,
}

// --- O REGISTRO COMPLETO (nunca sai pela API) ---

#[derive(Debug, Clone)]
pub struct AlumniRecord {
    pub id: Uuid,
    pub institution_id: Option<Uuid>,

    pub name: String,
    pub graduation_year: Option<i32>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub skills: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,

    // Localização verdadeira: usada apenas no filtro geográfico
    pub location: Option<GeoPoint>,
    // Ponto de exibição: o único que pode ser revelado
    pub display_point: Option<GeoPoint>,

    pub location_visibility: LocationVisibility,
    pub consent: ConsentRecord,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AlumniRecord {
    /// Ponto revelado de acordo com o nível de visibilidade.
    pub fn disclosed_point(&self) -> Option<GeoPoint> {
        match self.location_visibility {
            LocationVisibility::Exact | LocationVisibility::City | LocationVisibility::Country => {
                self.display_point
            }
            LocationVisibility::Hidden => None,
        }
    }
}

// Linha "achatada" da tabela alumni
#[derive(Debug, FromRow)]
pub struct AlumniRow {
    pub id: Uuid,
    pub institution_id: Option<Uuid>,
    pub name: String,
    pub graduation_year: Option<i32>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub skills: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub location_lng: Option<f64>,
    pub location_lat: Option<f64>,
    pub display_lng: Option<f64>,
    pub display_lat: Option<f64>,
    pub location_visibility: LocationVisibility,
    pub consent_opt_in: bool,
    pub consent_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AlumniRow> for AlumniRecord {
    fn from(row: AlumniRow) -> Self {
        AlumniRecord {
            id: row.id,
            institution_id: row.institution_id,
            name: row.name,
            graduation_year: row.graduation_year,
            company: row.company,
            role: row.role,
            skills: row.skills,
            city: row.city,
            state: row.state,
            location: GeoPoint::from_columns(row.location_lng, row.location_lat),
            display_point: GeoPoint::from_columns(row.display_lng, row.display_lat),
            location_visibility: row.location_visibility,
            consent: ConsentRecord { opt_in: row.consent_opt_in, timestamp: row.consent_at },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Dados já normalizados, prontos para o armazenamento.
#[derive(Debug, Clone)]
pub struct NewAlumni {
    pub institution_id: Option<Uuid>,
    pub name: String,
    pub graduation_year: Option<i32>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub skills: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub location: Option<GeoPoint>,
    pub display_point: Option<GeoPoint>,
    pub location_visibility: LocationVisibility,
    pub consent: ConsentRecord,
}

// --- A SAÍDA DO DIRETÓRIO ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DirectoryEntry {
    pub id: Uuid,
    #[schema(example = "Ana Souza")]
    pub name: String,
    #[schema(example = 2015)]
    pub graduation_year: Option<i32>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub location_visibility: LocationVisibility,
    // `null` quando a visibilidade é `hidden`
    pub display_point: Option<LatLng>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl From<&AlumniRecord> for DirectoryEntry {
    fn from(record: &AlumniRecord) -> Self {
        DirectoryEntry {
            id: record.id,
            name: record.name.clone(),
            graduation_year: record.graduation_year,
            company: record.company.clone(),
            role: record.role.clone(),
            location_visibility: record.location_visibility,
            display_point: record.disclosed_point().map(LatLng::from),
            city: record.city.clone(),
            state: record.state.clone(),
        }
    }
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAlumniPayload {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Ana Souza")]
    pub name: String,

    #[validate(range(min = 1900, max = 2100, message = "Ano de formatura inválido."))]
    #[schema(example = 2015)]
    pub graduation_year: Option<i32>,

    pub company: Option<String>,
    pub role: Option<String>,

    #[serde(default)]
    pub skills: Vec<String>,

    pub city: Option<String>,
    pub state: Option<String>,

    #[validate(nested)]
    pub location: Option<LatLng>,

    #[validate(nested)]
    #[serde(rename = "displayPoint", alias = "display_point")]
    pub display_point: Option<LatLng>,

    #[serde(default)]
    pub location_visibility: LocationVisibility,

    pub consent_record: Option<ConsentInput>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateAlumniResponse {
    pub ok: bool,
    pub id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConnectResponse {
    pub ok: bool,
    #[schema(example = "Connection request sent")]
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateConsentPayload {
    pub opt_in: bool,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DirectoryParams {
    /// `west,south,east,north` em graus
    #[param(example = "77,12,78,13")]
    pub bbox: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AdminDirectoryParams {
    /// `west,south,east,north` em graus
    pub bbox: Option<String>,
    /// Inclui registros sem consentimento (só da própria instituição)
    #[serde(default)]
    pub include_withdrawn: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(visibility: LocationVisibility) -> AlumniRecord {
        let now = Utc::now();
        AlumniRecord {
            id: Uuid::new_v4(),
            institution_id: None,
            name: "Ana".into(),
            graduation_year: Some(2015),
            company: Some("Acme".into()),
            role: Some("Engineer".into()),
            skills: vec!["rust".into()],
            city: Some("Bengaluru".into()),
            state: Some("KA".into()),
            location: Some(GeoPoint::new(77.6101, 12.9716)),
            display_point: Some(GeoPoint::new(77.6, 12.9)),
            location_visibility: visibility,
            consent: ConsentRecord { opt_in: true, timestamp: now },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn visible_tiers_disclose_the_display_point_never_the_true_location() {
        for tier in [LocationVisibility::Exact, LocationVisibility::City, LocationVisibility::Country] {
            let entry = DirectoryEntry::from(&record(tier));
            assert_eq!(entry.display_point, Some(LatLng { lat: 12.9, lng: 77.6 }));
        }
    }

    #[test]
    fn hidden_tier_discloses_nothing() {
        let entry = DirectoryEntry::from(&record(LocationVisibility::Hidden));
        assert_eq!(entry.display_point, None);
    }

    #[test]
    fn missing_display_point_is_not_replaced_by_true_location() {
        let mut rec = record(LocationVisibility::Exact);
        rec.display_point = None;
        assert_eq!(DirectoryEntry::from(&rec).display_point, None);
    }

    #[test]
    fn entry_json_never_carries_location_or_consent() {
        let json = serde_json::to_value(DirectoryEntry::from(&record(LocationVisibility::City))).unwrap();
        let obj = json.as_object().unwrap();

        assert!(obj.contains_key("display_point"));
        assert!(!obj.contains_key("location"));
        assert!(!obj.contains_key("consent_record"));
        assert!(!obj.contains_key("skills"));
        assert_eq!(obj["location_visibility"], "city");
    }

    #[test]
    fn hidden_entry_serializes_null_point() {
        let json = serde_json::to_value(DirectoryEntry::from(&record(LocationVisibility::Hidden))).unwrap();
        assert!(json["display_point"].is_null());
    }

    #[test]
    fn payload_accepts_camel_case_display_point() {
        let payload: CreateAlumniPayload = serde_json::from_value(serde_json::json!({
            "name": "Ana",
            "location": { "lat": 12.9, "lng": 77.6 },
            "displayPoint": { "lat": 13.0, "lng": 77.5 },
            "location_visibility": "exact"
        }))
        .unwrap();

        assert_eq!(payload.display_point, Some(LatLng { lat: 13.0, lng: 77.5 }));
        assert_eq!(payload.location_visibility, LocationVisibility::Exact);
        assert!(payload.consent_record.is_none());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn payload_rejects_whitespace_only_name() {
        let payload: CreateAlumniPayload = serde_json::from_value(serde_json::json!({ "name": "   " })).unwrap();

        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn payload_ignores_client_supplied_institution() {
        // O dono do registro nunca vem do corpo da requisição.
        let payload: CreateAlumniPayload = serde_json::from_value(serde_json::json!({
            "name": "Ana",
            "institutionId": Uuid::new_v4()
        }))
        .unwrap();

        assert_eq!(payload.name, "Ana");
    }

    #[test]
    fn payload_rejects_out_of_range_coordinates() {
        let payload: CreateAlumniPayload = serde_json::from_value(serde_json::json!({
            "name": "Ana",
            "location": { "lat": 120.0, "lng": 77.6 }
        }))
        .unwrap();

        assert!(payload.validate().is_err());
    }
}
