use serde::Deserialize;
use std::time::Duration;

use crate::models::Container;
use crate::utils::errors::AppResult;

pub const ADDRESS_NOT_FOUND: &str = "Dirección no encontrada";
pub const ADDRESS_UNAVAILABLE: &str = "Dirección no disponible";
pub const ADDRESS_LOAD_ERROR: &str = "Error al cargar dirección";
pub const API_KEY_MISSING: &str = "Clave de API no configurada";

const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Debug, Deserialize)]
struct GoogleGeocodingResponse {
    status: String,
    #[serde(default)]
    results: Vec<GoogleResult>,
}

#[derive(Debug, Deserialize)]
struct GoogleResult {
    formatted_address: String,
}

/// Dirección resuelta para un contenedor
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerAddress {
    pub guid: String,
    pub address: String,
}

pub struct GeocodingService {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl GeocodingService {
    pub fn new(api_key: Option<String>) -> AppResult<Self> {
        Self::with_base_url(api_key, GOOGLE_GEOCODE_URL)
    }

    pub fn with_base_url(api_key: Option<String>, base_url: &str) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            api_key,
            base_url: base_url.to_string(),
            client,
        })
    }

    /// Dirección legible para unas coordenadas; nunca falla, devuelve un texto de respaldo
    pub async fn reverse_geocode(&self, lat: f64, lng: f64) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            log::error!("❌ Google Maps API key no está configurada");
            return API_KEY_MISSING.to_string();
        };

        let url = format!(
            "{}?latlng={},{}&key={}",
            self.base_url,
            lat,
            lng,
            urlencoding::encode(api_key)
        );

        match self.request(&url).await {
            Ok(response) => match response.status.as_str() {
                "OK" => response
                    .results
                    .into_iter()
                    .next()
                    .map(|r| r.formatted_address)
                    .unwrap_or_else(|| ADDRESS_UNAVAILABLE.to_string()),
                "ZERO_RESULTS" => ADDRESS_NOT_FOUND.to_string(),
                other => {
                    log::warn!("⚠️ Error de Google Geocoding: {}", other);
                    ADDRESS_UNAVAILABLE.to_string()
                }
            },
            Err(e) => {
                log::error!("❌ Error al contactar Google Geocoding API: {}", e);
                ADDRESS_LOAD_ERROR.to_string()
            }
        }
    }

    async fn request(&self, url: &str) -> AppResult<GoogleGeocodingResponse> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// Resolver las direcciones de todos los contenedores en paralelo
    pub async fn enrich_containers(&self, containers: &[Container]) -> Vec<ContainerAddress> {
        log::info!("🗺️ Resolviendo direcciones de {} contenedores", containers.len());

        let mut results = Vec::with_capacity(containers.len());

        // Procesar en lotes de 10 para no sobrecargar la API
        for chunk in containers.chunks(10) {
            let futures = chunk
                .iter()
                .map(|c| self.reverse_geocode(c.latitude, c.longitude));

            let addresses = futures::future::join_all(futures).await;

            results.extend(chunk.iter().zip(addresses).map(|(c, address)| ContainerAddress {
                guid: c.guid.clone(),
                address,
            }));
        }

        results
    }
}
