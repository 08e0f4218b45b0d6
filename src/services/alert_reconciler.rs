//! Reconciliación de alertas de rutas nuevas
//!
//! Compara cada lista recibida con la marca de agua (el mayor `id` ya
//! atendido por esta sesión) y decide si existe una simulación nueva.
//! La marca de agua nunca retrocede, así que como mucho se emite una
//! alerta por `id`.

use tracing::{debug, info, warn};

use crate::models::Simulation;

#[derive(Debug, Clone, Default)]
pub struct AlertReconciler {
    watermark: i64,
    cached: Vec<Simulation>,
    /// El primer ciclo exitoso solo fija la marca de agua, sin alertar
    prime_pending: bool,
}

impl AlertReconciler {
    /// Marca de agua en 0: la primera simulación observada ya genera alerta
    pub fn new() -> Self {
        Self::default()
    }

    /// Tras recargar la vista, las simulaciones históricas no generan alertas
    pub fn primed_on_first_load() -> Self {
        Self {
            prime_pending: true,
            ..Self::default()
        }
    }

    pub fn watermark(&self) -> i64 {
        self.watermark
    }

    pub fn cached(&self) -> &[Simulation] {
        &self.cached
    }

    pub fn latest_cached(&self) -> Option<&Simulation> {
        latest(&self.cached)
    }

    /// Un ciclo de reconciliación. Devuelve la simulación a notificar, si la hay.
    ///
    /// La lista vacía significa "sin datos", nunca "todo fue borrado". Las
    /// simulaciones sin paradas se descartan antes de elegir la más reciente.
    pub fn reconcile(&mut self, fetched: Vec<Simulation>) -> Option<Simulation> {
        // Cualquier ciclo exitoso cierra el cebado, aunque no traiga datos
        let priming = std::mem::take(&mut self.prime_pending);

        let received = fetched.len();
        let fetched: Vec<Simulation> = fetched.into_iter().filter(Simulation::is_valid).collect();
        if fetched.len() < received {
            warn!(
                discarded = received - fetched.len(),
                "⚠️ Simulaciones sin paradas ignoradas"
            );
        }

        let newest = latest(&fetched)?.clone();

        if priming {
            self.watermark = self.watermark.max(newest.id);
            self.cached = fetched;
            info!(watermark = self.watermark, "📌 Marca de agua inicial fijada");
            return None;
        }

        if newest.id <= self.watermark {
            debug!(watermark = self.watermark, latest = newest.id, "Sin simulaciones nuevas");
            return None;
        }

        self.watermark = newest.id;
        self.cached = fetched;
        info!(id = newest.id, stops = newest.stop_count(), "🆕 Nueva ruta de recolección");
        Some(newest)
    }

    /// La propia sesión creó la simulación: se adelanta la marca de agua
    /// para que el siguiente ciclo no la notifique. Nunca emite.
    pub fn record_origination(&mut self, simulation: Simulation) {
        // Equivale a un ciclo con una lista de un solo elemento
        if simulation.id > self.watermark {
            self.watermark = simulation.id;
            self.cached = vec![simulation];
        }
        // Ya conocemos una simulación; no hay nada histórico que silenciar
        self.prime_pending = false;
        debug!(watermark = self.watermark, "Simulación originada por esta sesión");
    }
}

/// argmax por `id`; nunca se confía en el orden del servidor
fn latest(simulations: &[Simulation]) -> Option<&Simulation> {
    simulations.iter().max_by_key(|s| s.id)
}
