//! Lectura periódica de simulaciones
//!
//! Cada ciclo de polling pide la lista completa de simulaciones. Un fallo
//! nunca se propaga: se registra y el ciclo se salta, el siguiente reintenta.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::models::Simulation;
use crate::utils::errors::AppResult;

/// Origen de las simulaciones (el backend en producción, un doble en tests)
#[async_trait]
pub trait SimulationSource: Send + Sync {
    async fn fetch_all(&self) -> AppResult<Vec<Simulation>>;
}

#[async_trait]
impl<T: SimulationSource + ?Sized> SimulationSource for Arc<T> {
    async fn fetch_all(&self) -> AppResult<Vec<Simulation>> {
        (**self).fetch_all().await
    }
}

pub struct SimulationFetcher<S> {
    source: S,
}

impl<S: SimulationSource> SimulationFetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Un ciclo best-effort: `None` si la petición falló
    pub async fn fetch_cycle(&self) -> Option<Vec<Simulation>> {
        match self.source.fetch_all().await {
            Ok(simulations) => {
                debug!("📥 {} simulaciones recibidas", simulations.len());
                Some(simulations)
            }
            Err(e) => {
                warn!(transient = e.is_transient(), "⚠️ Ciclo de polling omitido: {}", e);
                None
            }
        }
    }
}
