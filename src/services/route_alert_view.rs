//! Vista anfitriona de las alertas de rutas
//!
//! Es dueña exclusiva de la marca de agua y de la lista en caché mientras
//! está montada. El polling solo corre para roles que reciben alertas; el
//! flujo de "programar recolección" comunica la simulación creada mediante
//! `record_origination` para no alertarse a sí mismo.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::models::{GenerateSimulationRequest, Simulation, UserRole};
use crate::services::alert_reconciler::AlertReconciler;
use crate::services::notification::NotificationPresenter;
use crate::services::route_alert_poller::{PollerHandle, RouteAlertPoller, SharedReconciler};
use crate::state::SessionState;
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::{format_schedule_timestamp, validate_guid_list};

pub struct RouteAlertView<P> {
    session: SessionState,
    presenter: P,
    reconciler: SharedReconciler,
    poller: Option<PollerHandle>,
}

impl<P> RouteAlertView<P>
where
    P: NotificationPresenter + Clone + 'static,
{
    pub fn new(session: SessionState, presenter: P) -> Self {
        let reconciler = if session.config.alert_on_first_load {
            AlertReconciler::new()
        } else {
            AlertReconciler::primed_on_first_load()
        };

        Self {
            session,
            presenter,
            reconciler: Arc::new(RwLock::new(reconciler)),
            poller: None,
        }
    }

    pub fn reconciler(&self) -> SharedReconciler {
        self.reconciler.clone()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(PollerHandle::is_running)
    }

    /// Montar la vista: arranca el polling si el rol activo lo permite
    pub async fn mount(&mut self) -> bool {
        let role = self.session.role().await;
        self.apply_role(role).await
    }

    pub async fn on_role_change(&mut self, role: Option<UserRole>) -> bool {
        self.session.set_role(role).await;
        self.apply_role(role).await
    }

    /// Desmontar: al volver, el bucle ya no puede mutar el estado
    pub async fn unmount(mut self) {
        self.stop_polling().await;
    }

    async fn apply_role(&mut self, role: Option<UserRole>) -> bool {
        let should_poll = role.is_some_and(|r| r.polls_route_alerts());

        if should_poll && !self.is_polling() {
            self.start_polling();
        } else if !should_poll {
            self.stop_polling().await;
        }

        should_poll
    }

    fn start_polling(&mut self) {
        info!("👀 Vista de alertas montada, iniciando polling");
        let handle = RouteAlertPoller::spawn(
            self.session.client.clone(),
            self.presenter.clone(),
            self.reconciler.clone(),
            self.session.config.route_poll_interval,
        );
        self.poller = Some(handle);
    }

    async fn stop_polling(&mut self) {
        if let Some(handle) = self.poller.take() {
            handle.cancel().await;
        }
    }

    /// Programar recolección: genera la ruta óptima para los contenedores dados.
    ///
    /// En caso de éxito la marca de agua avanza antes del siguiente ciclo;
    /// en caso de error no se toca.
    pub async fn schedule_collection(
        &self,
        container_guids: Vec<String>,
        scheduled_at: Option<NaiveDateTime>,
    ) -> AppResult<Simulation> {
        validate_guid_list(&container_guids)
            .map_err(|_| validation_error("container_guids", "at least one container is required"))?;

        let mut request = GenerateSimulationRequest::new(container_guids);
        if let Some(at) = scheduled_at {
            request = request.scheduled_at(format_schedule_timestamp(at.date(), at.time()));
        }

        // El lock se mantiene durante la petición: ningún ciclo de polling puede
        // reconciliar la simulación nueva antes de registrarla como propia.
        // Mientras tanto los ciclos quedan bloqueados hasta `http_timeout`.
        let mut reconciler = self.reconciler.write().await;

        match self.session.client.generate_simulation(&request).await {
            Ok(simulation) => {
                info!(id = simulation.id, "✅ Ruta generada por esta sesión");
                reconciler.record_origination(simulation.clone());
                Ok(simulation)
            }
            Err(e) => {
                error!("❌ Error al generar la ruta: {}", e);
                Err(e)
            }
        }
    }
}
