//! Modelo de Simulation
//!
//! Una simulación es una ruta de recolección calculada por el backend:
//! secuencia de contenedores a visitar y su resumen de distancia/duración.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::validation::validate_datetime;

/// Ruta de recolección calculada por el backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    /// Único y creciente; es la única clave de orden
    pub id: i64,
    /// Solo informativo, nunca se usa para ordenar
    pub created_at: String,
    pub total_distance_km: f64,
    pub duration_min: f64,
    /// GUIDs de contenedores en orden de visita
    pub route: Vec<String>,
    /// Distancias por tramo serializadas, se pasan tal cual
    #[serde(default)]
    pub distances: String,
}

impl Simulation {
    pub fn created_at_parsed(&self) -> Option<DateTime<Utc>> {
        validate_datetime(&self.created_at).ok()
    }

    pub fn stop_count(&self) -> usize {
        self.route.len()
    }

    /// Una simulación válida tiene al menos una parada
    pub fn is_valid(&self) -> bool {
        !self.route.is_empty()
    }
}

/// Body de `POST /simulation/generate-simulation`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSimulationRequest {
    pub container_guids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl GenerateSimulationRequest {
    pub fn new(container_guids: Vec<String>) -> Self {
        Self {
            container_guids,
            created_at: None,
        }
    }

    pub fn scheduled_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }
}
