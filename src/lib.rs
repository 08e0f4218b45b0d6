//! Cliente de monitoreo WasteTrack
//!
//! Alertas de rutas de recolección nuevas, estado de contenedores y
//! reportes de avería contra el backend REST de WasteTrack.

pub mod client;
pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
