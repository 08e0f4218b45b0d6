//! Servicio de contenedores
//!
//! Listado con nivel de llenado, refresco periódico y reportes de avería.

use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::client::BackendClient;
use crate::models::{ContainerSnapshot, FillLevel, ReportPayload, ReportResponse};
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::validate_not_empty;

#[derive(Clone)]
pub struct ContainerService {
    client: BackendClient,
}

impl ContainerService {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Todos los contenedores, sellados con la hora del cliente
    pub async fn list_containers(&self) -> AppResult<Vec<ContainerSnapshot>> {
        let containers = self.client.get_all_containers().await?;
        let now = Utc::now();

        Ok(containers
            .into_iter()
            .map(|container| ContainerSnapshot {
                container,
                last_updated_client: now,
            })
            .collect())
    }

    /// Solo los activos, como los muestra el mapa
    pub async fn list_active_containers(&self) -> AppResult<Vec<ContainerSnapshot>> {
        let mut snapshots = self.list_containers().await?;
        snapshots.retain(|s| s.container.is_active());
        Ok(snapshots)
    }

    pub async fn critical_containers(&self) -> AppResult<Vec<ContainerSnapshot>> {
        let mut snapshots = self.list_containers().await?;
        snapshots.retain(|s| s.container.fill_level() == FillLevel::Critical);
        Ok(snapshots)
    }

    /// Reportar una avería; una razón vacía cancela el reporte
    pub async fn report_malfunction(&self, container_guid: &str, reason: &str) -> AppResult<Value> {
        validate_not_empty(reason)
            .map_err(|_| validation_error("reason", "a reason is required to report a malfunction"))?;

        let payload = ReportPayload::new(reason);
        let response = self.client.report_malfunction(container_guid, &payload).await?;
        info!(container = container_guid, "📝 Reporte de avería enviado");
        Ok(response)
    }

    pub async fn pending_reports(&self) -> AppResult<Vec<ReportResponse>> {
        let mut reports = self.client.get_malfunction_reports().await?;
        reports.retain(ReportResponse::is_pending);
        Ok(reports)
    }

    pub async fn resolve_report(&self, report_guid: &str) -> AppResult<ReportResponse> {
        let report = self.client.resolve_malfunction_report(report_guid).await?;
        info!(report = report_guid, "✅ Reporte resuelto");
        Ok(report)
    }
}

/// Refresco periódico de la lista de contenedores (best-effort)
pub struct ContainerWatcher {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ContainerWatcher {
    pub fn spawn<F>(service: ContainerService, period: Duration, sink: F) -> Self
    where
        F: Fn(Vec<ContainerSnapshot>) + Send + Sync + 'static,
    {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {}
                }

                let result = tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => break,
                    result = service.list_containers() => result,
                };

                match result {
                    Ok(snapshots) => {
                        debug!("📦 {} contenedores refrescados", snapshots.len());
                        sink(snapshots);
                    }
                    Err(e) => warn!("⚠️ Error al obtener los contenedores: {}", e),
                }
            }
        });

        Self { shutdown, task }
    }

    pub async fn cancel(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            warn!("⚠️ La tarea de contenedores terminó con error: {}", e);
        }
    }
}
