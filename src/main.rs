use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use wastetrack_monitor::config::environment::EnvironmentConfig;
use wastetrack_monitor::models::FillLevel;
use wastetrack_monitor::services::{
    ContainerService, ContainerWatcher, GeocodingService, LogNotificationPresenter,
    RouteAlertView,
};
use wastetrack_monitor::state::SessionState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env();

    // Configurar logging
    let level = match &config {
        Ok(config) if !config.is_development() => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🗑️ WasteTrack - Monitor de contenedores y rutas");
    info!("================================================");

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuración inválida: {}", e);
            return Err(anyhow::anyhow!("Error de configuración: {}", e));
        }
    };

    info!("🌐 Backend: {}", config.backend_url);
    info!("   Polling de rutas cada {:?}", config.route_poll_interval);
    info!("   Refresco de contenedores cada {:?}", config.container_poll_interval);

    let session = SessionState::new(config.clone())?;

    let containers = ContainerService::new(session.client.clone());

    // Direcciones de los contenedores activos, solo informativo
    if config.google_maps_api_key.is_some() {
        match containers.list_active_containers().await {
            Ok(snapshots) => {
                let geocoding = GeocodingService::new(config.google_maps_api_key.clone())?;
                let active: Vec<_> = snapshots.into_iter().map(|s| s.container).collect();
                for entry in geocoding.enrich_containers(&active).await {
                    info!("📍 {} -> {}", entry.guid, entry.address);
                }
            }
            Err(e) => warn!("⚠️ No se pudieron cargar los contenedores: {}", e),
        }
    }

    let mut view = RouteAlertView::new(session.clone(), LogNotificationPresenter);
    if !view.mount().await {
        warn!("⚠️ El rol actual no recibe alertas de rutas; solo se monitorean contenedores");
    }

    let watcher = ContainerWatcher::spawn(
        containers,
        config.container_poll_interval,
        |snapshots| {
            for snapshot in snapshots
                .iter()
                .filter(|s| s.container.fill_level() == FillLevel::Critical)
            {
                warn!(
                    guid = %snapshot.container.guid,
                    "🚨 {} al {:.0}% (umbral {:.0}%)",
                    snapshot.container.name,
                    snapshot.container.capacity,
                    snapshot.container.limit
                );
            }
        },
    );

    signal::ctrl_c().await?;
    info!("🛑 Señal de apagado recibida");

    view.unmount().await;
    watcher.cancel().await;

    info!("✅ Monitor detenido");
    Ok(())
}
