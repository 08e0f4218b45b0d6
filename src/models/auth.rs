use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Citizen,
    Worker,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Citizen => "citizen",
            UserRole::Worker => "worker",
        }
    }

    /// Solo el ciudadano recibe alertas de rutas nuevas; el trabajador las origina
    pub fn polls_route_alerts(&self) -> bool {
        matches!(self, UserRole::Citizen)
    }
}

impl FromStr for UserRole {
    type Err = String;

    // Acepta "Citizen", "WORKER" y también el valor JSON guardado por el navegador ("\"citizen\"")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_matches('"').to_lowercase();
        match normalized.as_str() {
            "citizen" => Ok(UserRole::Citizen),
            "worker" => Ok(UserRole::Worker),
            _ => Err(format!("unknown role '{}'", s)),
        }
    }
}

/// Request de login (`POST /auth/signin`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request de registro (`POST /auth/signup`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    pub role: UserRole,
    pub address: String,
    pub phone: String,
}

/// Respuesta de login; el backend omite campos según el resultado
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, alias = "detail")]
    pub message: Option<String>,
}

impl LoginResponse {
    pub fn role(&self) -> Option<UserRole> {
        self.role.as_deref().and_then(|r| r.parse().ok())
    }
}
