//! Cliente HTTP para el backend de WasteTrack
//!
//! Este módulo contiene el cliente REST que usan todas las vistas:
//! contenedores, simulaciones de rutas, reportes de avería y autenticación.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::models::{
    Container, ContainerPayload, GenerateSimulationRequest, LoginRequest, LoginResponse,
    RegisterRequest, ReportPayload, ReportResponse, Simulation,
};
use crate::services::simulation_fetcher::SimulationSource;
use crate::utils::errors::{backend_error, AppError, AppResult};

/// Cliente HTTP del backend (contenedores + simulaciones + reportes + auth)
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    config: EnvironmentConfig,
    access_token: Arc<RwLock<Option<String>>>,
}

impl BackendClient {
    /// Crear nuevo cliente HTTP con el timeout configurado
    pub fn new(config: EnvironmentConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .user_agent("WasteTrackMonitor/1.0")
            .build()?;

        let access_token = Arc::new(RwLock::new(config.access_token.clone()));

        Ok(Self {
            client,
            config,
            access_token,
        })
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    pub async fn set_access_token(&self, token: Option<String>) {
        *self.access_token.write().await = token;
    }

    pub async fn access_token(&self) -> Option<String> {
        self.access_token.read().await.clone()
    }

    async fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.access_token.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = self.config.endpoint(path);
        log::debug!("🌐 GET {}", url);
        let response = self.authorized(self.client.get(&url)).await.send().await?;
        parse_json(response).await
    }

    // ===== Simulaciones =====

    /// `GET /simulation/get-all-simulations` - sin orden garantizado
    pub async fn get_all_simulations(&self) -> AppResult<Vec<Simulation>> {
        self.get_json("/simulation/get-all-simulations").await
    }

    /// `POST /simulation/generate-simulation`
    pub async fn generate_simulation(
        &self,
        request: &GenerateSimulationRequest,
    ) -> AppResult<Simulation> {
        let url = self.config.endpoint("/simulation/generate-simulation");
        log::info!(
            "🚛 Generando simulación para {} contenedores",
            request.container_guids.len()
        );
        let response = self
            .authorized(self.client.post(&url).json(request))
            .await
            .send()
            .await?;
        parse_json(response).await
    }

    // ===== Contenedores =====

    pub async fn get_all_containers(&self) -> AppResult<Vec<Container>> {
        self.get_json("/containers").await
    }

    pub async fn get_container(&self, guid: &str) -> AppResult<Container> {
        self.get_json(&format!("/containers/{}", guid)).await
    }

    pub async fn create_container(&self, payload: &ContainerPayload) -> AppResult<Container> {
        let url = self.config.endpoint("/containers");
        let response = self
            .authorized(self.client.post(&url).json(payload))
            .await
            .send()
            .await?;
        parse_json(response).await
    }

    pub async fn update_container(
        &self,
        guid: &str,
        payload: &ContainerPayload,
    ) -> AppResult<Container> {
        let url = self.config.endpoint(&format!("/containers/{}", guid));
        let response = self
            .authorized(self.client.put(&url).json(payload))
            .await
            .send()
            .await?;
        parse_json(response).await
    }

    pub async fn delete_container(&self, guid: &str) -> AppResult<()> {
        let url = self.config.endpoint(&format!("/containers/{}", guid));
        let response = self.authorized(self.client.delete(&url)).await.send().await?;
        ensure_success(response).await.map(|_| ())
    }

    // ===== Reportes de avería =====

    /// `POST /containers/{guid}/report`
    pub async fn report_malfunction(
        &self,
        guid: &str,
        payload: &ReportPayload,
    ) -> AppResult<Value> {
        payload.validate()?;
        let url = self.config.endpoint(&format!("/containers/{}/report", guid));
        let response = self
            .authorized(self.client.post(&url).json(payload))
            .await
            .send()
            .await?;
        parse_json(response).await
    }

    /// `GET /api/v1/reports/all`
    pub async fn get_malfunction_reports(&self) -> AppResult<Vec<ReportResponse>> {
        self.get_json("/api/v1/reports/all").await
    }

    /// `PUT /api/v1/reports/{guid}/resolve`
    pub async fn resolve_malfunction_report(&self, guid: &str) -> AppResult<ReportResponse> {
        let url = self.config.endpoint(&format!("/api/v1/reports/{}/resolve", guid));
        let response = self.authorized(self.client.put(&url)).await.send().await?;
        parse_json(response).await
    }

    // ===== Autenticación =====

    /// `POST /auth/signin`; guarda el token si el backend lo devuelve
    pub async fn signin(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;
        let url = self.config.endpoint("/auth/signin");
        let response = self.client.post(&url).json(request).send().await?;
        let login: LoginResponse = parse_json(response).await?;

        match login.access_token.clone() {
            Some(token) => {
                log::info!("✅ Sesión iniciada para {}", request.email);
                self.set_access_token(Some(token)).await;
                Ok(login)
            }
            None => Err(AppError::Unauthorized(
                login
                    .message
                    .unwrap_or_else(|| "missing access token".to_string()),
            )),
        }
    }

    /// `POST /auth/signup`
    pub async fn signup(&self, request: &RegisterRequest) -> AppResult<Value> {
        request.validate()?;
        let url = self.config.endpoint("/auth/signup");
        let response = self.client.post(&url).json(request).send().await?;
        parse_json(response).await
    }
}

#[async_trait]
impl SimulationSource for BackendClient {
    async fn fetch_all(&self) -> AppResult<Vec<Simulation>> {
        self.get_all_simulations().await
    }
}

async fn ensure_success(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    log::error!("❌ Backend respondió {}: {}", status, body);
    Err(backend_error(status, error_message(&body)))
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let response = ensure_success(response).await?;
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// Extraer `detail` o `message` del cuerpo de error si es JSON
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("detail")
                .or_else(|| json.get("message"))
                .and_then(|v| v.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| body.to_string())
}
