//! Presentación de alertas de rutas nuevas
//!
//! Sin cola ni reintentos: una alerta nueva reemplaza a la que se estuviera
//! mostrando, y descartarla no toca la marca de agua.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use crate::models::Simulation;

pub trait NotificationPresenter: Send + Sync {
    fn present(&self, simulation: &Simulation);
    fn dismiss(&self);
}

impl<T: NotificationPresenter + ?Sized> NotificationPresenter for Arc<T> {
    fn present(&self, simulation: &Simulation) {
        (**self).present(simulation)
    }

    fn dismiss(&self) {
        (**self).dismiss()
    }
}

#[derive(Debug, Default)]
struct SlotInner {
    current: Option<Simulation>,
    presented: usize,
}

/// Ranura de una sola alerta visible
#[derive(Debug, Clone, Default)]
pub struct AlertSlot {
    inner: Arc<Mutex<SlotInner>>,
}

impl AlertSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Simulation> {
        self.lock().current.clone()
    }

    /// Total de alertas emitidas desde que se creó la ranura
    pub fn presented_count(&self) -> usize {
        self.lock().presented
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SlotInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationPresenter for AlertSlot {
    fn present(&self, simulation: &Simulation) {
        let mut inner = self.lock();
        inner.current = Some(simulation.clone());
        inner.presented += 1;
    }

    fn dismiss(&self) {
        self.lock().current = None;
    }
}

/// Presentador del daemon: escribe la alerta en el log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotificationPresenter;

impl NotificationPresenter for LogNotificationPresenter {
    fn present(&self, simulation: &Simulation) {
        info!(
            id = simulation.id,
            created_at = %simulation.created_at,
            "🔔 Nueva ruta de recolección: {:.2} km, {:.0} min, {} paradas",
            simulation.total_distance_km,
            simulation.duration_min,
            simulation.stop_count()
        );
    }

    fn dismiss(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim(id: i64) -> Simulation {
        Simulation {
            id,
            created_at: String::new(),
            total_distance_km: 1.0,
            duration_min: 1.0,
            route: vec!["c-1".to_string()],
            distances: String::new(),
        }
    }

    #[test]
    fn test_new_alert_supersedes_current() {
        let slot = AlertSlot::new();
        slot.present(&sim(1));
        slot.present(&sim(2));

        assert_eq!(slot.current().map(|s| s.id), Some(2));
        assert_eq!(slot.presented_count(), 2);
    }

    #[test]
    fn test_dismiss_clears_view_only() {
        let slot = AlertSlot::new();
        slot.present(&sim(1));
        slot.dismiss();

        assert!(slot.current().is_none());
        assert_eq!(slot.presented_count(), 1);
    }
}
