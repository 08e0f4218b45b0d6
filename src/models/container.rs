//! Modelo de Container
//!
//! Contenedores de residuos monitoreados y su nivel de llenado.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Estado operativo del contenedor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerStatus {
    Active,
    Inactive,
}

/// Clasificación del llenado respecto al umbral de alerta
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FillLevel {
    Normal,
    Warning,
    Critical,
}

fn default_limit() -> f64 {
    80.0
}

/// Contenedor tal como lo devuelve `GET /containers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub guid: String,
    /// Porcentaje de llenado actual
    pub capacity: f64,
    pub status: ContainerStatus,
    pub name: String,
    #[serde(default, rename = "isFavorite", alias = "is_favorite")]
    pub is_favorite: bool,
    #[serde(default = "default_limit", deserialize_with = "limit_or_default")]
    pub limit: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub latitude: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub longitude: f64,
}

impl Container {
    pub fn fill_level(&self) -> FillLevel {
        if self.capacity >= self.limit {
            FillLevel::Critical
        } else if self.capacity >= self.limit * 0.75 {
            FillLevel::Warning
        } else {
            FillLevel::Normal
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ContainerStatus::Active
    }
}

/// Contenedor con la hora local en que el cliente lo refrescó
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSnapshot {
    pub container: Container,
    pub last_updated_client: DateTime<Utc>,
}

/// Body para crear o actualizar un contenedor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerPayload {
    pub name: String,
    pub capacity: f64,
    pub status: ContainerStatus,
    pub limit: f64,
    pub latitude: f64,
    pub longitude: f64,
}

// El backend serializa las coordenadas a veces como string
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn limit_or_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_else(default_limit))
}
