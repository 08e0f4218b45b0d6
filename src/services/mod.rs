//! Services module
//!
//! Este módulo contiene la lógica del cliente: polling y reconciliación de
//! alertas de rutas, contenedores, reportes y geocodificación.

pub mod alert_reconciler;
pub mod container_service;
pub mod geocoding_service;
pub mod notification;
pub mod route_alert_poller;
pub mod route_alert_view;
pub mod simulation_fetcher;

pub use alert_reconciler::*;
pub use container_service::*;
pub use geocoding_service::*;
pub use notification::*;
pub use route_alert_poller::*;
pub use route_alert_view::*;
pub use simulation_fetcher::*;
