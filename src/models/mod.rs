//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos tal como los expone
//! la API REST del backend de WasteTrack.

pub mod auth;
pub mod container;
pub mod report;
pub mod simulation;

pub use auth::*;
pub use container::*;
pub use report::*;
pub use simulation::*;
