//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::models::auth::UserRole;
use crate::utils::errors::{config_error, AppResult};

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub backend_url: String,
    pub route_poll_interval: Duration,
    pub container_poll_interval: Duration,
    pub http_timeout: Duration,
    pub user_role: Option<UserRole>,
    pub access_token: Option<String>,
    pub alert_on_first_load: bool,
    pub google_maps_api_key: Option<String>,
}

impl EnvironmentConfig {
    /// Construir una configuración mínima apuntando a un backend concreto
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            environment: "development".to_string(),
            backend_url: backend_url.into().trim_end_matches('/').to_string(),
            route_poll_interval: Duration::from_secs(10),
            container_poll_interval: Duration::from_secs(5),
            http_timeout: Duration::from_secs(10),
            user_role: None,
            access_token: None,
            alert_on_first_load: false,
            google_maps_api_key: None,
        }
    }

    /// Leer la configuración desde el entorno (llamar a `dotenv()` antes)
    pub fn from_env() -> AppResult<Self> {
        let backend_url =
            env::var("BACKEND_URL").map_err(|_| config_error("BACKEND_URL", "must be set"))?;

        let mut config = Self::new(backend_url);
        config.environment = env::var("ENVIRONMENT").unwrap_or(config.environment);
        config.route_poll_interval = Duration::from_secs(parse_var("ROUTE_POLL_INTERVAL_SECS", 10)?);
        config.container_poll_interval =
            Duration::from_secs(parse_var("CONTAINER_POLL_INTERVAL_SECS", 5)?);
        config.http_timeout = Duration::from_secs(parse_var("HTTP_TIMEOUT_SECS", 10)?);
        config.alert_on_first_load = parse_var("ALERT_ON_FIRST_LOAD", false)?;
        config.user_role = match env::var("USER_ROLE") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.parse::<UserRole>()
                    .map_err(|_| config_error("USER_ROLE", "expected citizen or worker"))?,
            ),
            _ => None,
        };
        config.access_token = non_empty_var("ACCESS_TOKEN");
        config.google_maps_api_key = non_empty_var("GOOGLE_MAPS_API_KEY");

        if config.route_poll_interval.is_zero() || config.container_poll_interval.is_zero() {
            return Err(config_error("*_POLL_INTERVAL_SECS", "must be greater than zero"));
        }

        Ok(config)
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// URL absoluta de un endpoint del backend
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.backend_url, path.trim_start_matches('/'))
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| config_error(name, "invalid value")),
        _ => Ok(default),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
