//! Estado de sesión
//!
//! Este módulo define la sesión que se pasa explícitamente a cada vista:
//! configuración, cliente del backend, rol y token de acceso. Se crea al
//! montar la vista y se descarta al desmontarla; nada se persiste.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::client::BackendClient;
use crate::config::environment::EnvironmentConfig;
use crate::models::{LoginRequest, UserRole};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct SessionState {
    pub config: EnvironmentConfig,
    pub client: BackendClient,
    role: Arc<RwLock<Option<UserRole>>>,
}

impl SessionState {
    pub fn new(config: EnvironmentConfig) -> AppResult<Self> {
        let client = BackendClient::new(config.clone())?;
        let role = Arc::new(RwLock::new(config.user_role));

        Ok(Self {
            config,
            client,
            role,
        })
    }

    pub async fn role(&self) -> Option<UserRole> {
        *self.role.read().await
    }

    pub async fn set_role(&self, role: Option<UserRole>) {
        *self.role.write().await = role;
    }

    pub async fn is_authenticated(&self) -> bool {
        self.client.access_token().await.is_some()
    }

    /// Iniciar sesión; el rol devuelto por el backend reemplaza al configurado
    pub async fn login(&self, request: &LoginRequest) -> AppResult<Option<UserRole>> {
        let response = self.client.signin(request).await?;
        if let Some(role) = response.role() {
            self.set_role(Some(role)).await;
        }
        Ok(self.role().await)
    }

    pub async fn logout(&self) {
        log::info!("👋 Cerrando sesión");
        self.client.set_access_token(None).await;
        self.set_role(None).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_role_from_config_and_logout() {
        let mut config = EnvironmentConfig::new("http://localhost:8000");
        config.user_role = Some(UserRole::Citizen);
        config.access_token = Some("tok".to_string());

        let session = SessionState::new(config).unwrap();
        assert_eq!(session.role().await, Some(UserRole::Citizen));
        assert!(session.is_authenticated().await);

        session.logout().await;
        assert_eq!(session.role().await, None);
        assert!(!session.is_authenticated().await);
    }
}
