//! Bucle de polling de alertas de rutas
//!
//! Lanza una tarea tokio que pide las simulaciones al instante y luego cada
//! `period`, reconcilia contra la marca de agua y entrega las rutas nuevas al
//! presentador. Los ciclos son secuenciales dentro de la tarea.
//!
//! `PollerHandle::cancel` espera a que la tarea termine: al volver, ninguna
//! petición en vuelo puede mutar ya el estado compartido.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::models::Simulation;
use crate::services::alert_reconciler::AlertReconciler;
use crate::services::notification::NotificationPresenter;
use crate::services::simulation_fetcher::{SimulationFetcher, SimulationSource};

pub type SharedReconciler = Arc<RwLock<AlertReconciler>>;

pub struct RouteAlertPoller;

impl RouteAlertPoller {
    pub fn spawn<S, P>(
        source: S,
        presenter: P,
        reconciler: SharedReconciler,
        period: Duration,
    ) -> PollerHandle
    where
        S: SimulationSource + 'static,
        P: NotificationPresenter + 'static,
    {
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let fetcher = SimulationFetcher::new(source);
        let state = reconciler.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(period_secs = period.as_secs_f64(), "🔄 Polling de rutas iniciado");

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {}
                }

                // La petición en vuelo se descarta si llega la cancelación
                let fetched = tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => break,
                    fetched = fetcher.fetch_cycle() => fetched,
                };

                let Some(fetched) = fetched else { continue };
                let alert = state.write().await.reconcile(fetched);

                if let Some(simulation) = alert {
                    presenter.present(&simulation);
                }
            }

            info!("⏹️ Polling de rutas detenido");
        });

        PollerHandle {
            reconciler,
            shutdown,
            task: Some(task),
        }
    }
}

/// Handle del bucle de polling; soltarlo también detiene el bucle
pub struct PollerHandle {
    reconciler: SharedReconciler,
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn reconciler(&self) -> SharedReconciler {
        self.reconciler.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub async fn record_origination(&self, simulation: Simulation) {
        self.reconciler.write().await.record_origination(simulation);
    }

    /// Detener el bucle y esperar a que la tarea termine
    pub async fn cancel(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("⚠️ La tarea de polling terminó con error: {}", e);
            }
        }
        debug!("Handle de polling cancelado");
    }
}
