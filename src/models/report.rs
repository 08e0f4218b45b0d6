//! Reportes de avería de contenedores

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Estado de un reporte de avería
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Resolved,
}

/// Body de `POST /containers/{guid}/report`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReportPayload {
    #[validate(length(min = 1, max = 500))]
    pub reason: String,
}

impl ReportPayload {
    pub fn new(reason: &str) -> Self {
        Self {
            reason: reason.trim().to_string(),
        }
    }
}

/// Respuesta de `/api/v1/reports`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub guid: String,
    pub container_guid: String,
    pub reason: String,
    pub status: ReportStatus,
    pub reported_at: String,
    pub reported_by_guid: String,
}

impl ReportResponse {
    pub fn is_pending(&self) -> bool {
        self.status == ReportStatus::Pending
    }
}
