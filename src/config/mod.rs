//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno y la configuración del cliente.

pub mod environment;

pub use environment::*;
