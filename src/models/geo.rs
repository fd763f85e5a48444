// src/models/geo.rs

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use validator::Validate;

// ---
// 1. GeoPoint (representação interna)
// ---
// Sempre (longitude, latitude), na mesma ordem do predicado geográfico no banco.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lng: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Monta o ponto a partir de duas colunas opcionais do banco.
    /// Só existe ponto quando as duas coordenadas estão presentes.
    pub fn from_columns(lng: Option<f64>, lat: Option<f64>) -> Option<Self> {
        match (lng, lat) {
            (Some(lng), Some(lat)) => Some(Self::new(lng, lat)),
            _ => None,
        }
    }
}

// ---
// 2. LatLng (o formato que vem e vai pela API)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct LatLng {
    #[validate(range(min = -90.0, max = 90.0, message = "A latitude deve estar entre -90 e 90."))]
    #[schema(example = 12.9)]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "A longitude deve estar entre -180 e 180."))]
    #[schema(example = 77.6)]
    pub lng: f64,
}

// Conversões explícitas: é aqui que os eixos NUNCA podem ser trocados.
impl From<LatLng> for GeoPoint {
    fn from(value: LatLng) -> Self {
        GeoPoint { lng: value.lng, lat: value.lat }
    }
}

impl From<GeoPoint> for LatLng {
    fn from(value: GeoPoint) -> Self {
        LatLng { lat: value.lat, lng: value.lng }
    }
}

// ---
// 3. BoundingBox (o filtro do diretório)
// ---
/// Retângulo em graus: `west,south,east,north`. As bordas são inclusivas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundingBoxError {
    WrongArity(usize),
    NotANumber(String),
    OutOfRange,
    Inverted,
}

impl fmt::Display for BoundingBoxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongArity(n) => write!(f, "bbox precisa de 4 valores (west,south,east,north), recebeu {n}"),
            Self::NotANumber(raw) => write!(f, "valor de bbox não numérico: '{raw}'"),
            Self::OutOfRange => write!(f, "bbox fora dos limites de longitude/latitude"),
            Self::Inverted => write!(f, "bbox invertida: west > east ou south > north"),
        }
    }
}

impl std::error::Error for BoundingBoxError {}

impl BoundingBox {
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lng >= self.west
            && point.lng <= self.east
            && point.lat >= self.south
            && point.lat <= self.north
    }
}

impl FromStr for BoundingBox {
    type Err = BoundingBoxError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BoundingBoxError::WrongArity(parts.len()));
        }

        let mut values = [0.0_f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            let value: f64 = part
                .parse()
                .map_err(|_| BoundingBoxError::NotANumber(part.to_string()))?;
            // "NaN" e "inf" passam no parse do Rust, mas não são coordenadas.
            if !value.is_finite() {
                return Err(BoundingBoxError::NotANumber(part.to_string()));
            }
            *slot = value;
        }

        let [west, south, east, north] = values;

        let lng_ok = |v: f64| (-180.0..=180.0).contains(&v);
        let lat_ok = |v: f64| (-90.0..=90.0).contains(&v);
        if !(lng_ok(west) && lng_ok(east) && lat_ok(south) && lat_ok(north)) {
            return Err(BoundingBoxError::OutOfRange);
        }

        if west > east || south > north {
            return Err(BoundingBoxError::Inverted);
        }

        Ok(BoundingBox { west, south, east, north })
    }
}
