//! Utilidades de validación
//!
//! Funciones helper para validar datos antes de enviarlos al backend.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use validator::ValidationError;

/// Validar y convertir string a datetime
pub fn validate_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    // El backend devuelve timestamps sin zona horaria
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339".to_string());
            error
        })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que ningún elemento de la lista esté vacío y que la lista tenga elementos
pub fn validate_guid_list(values: &[String]) -> Result<(), ValidationError> {
    if values.is_empty() || values.iter().any(|v| v.trim().is_empty()) {
        let mut error = ValidationError::new("guid_list");
        error.add_param("count".into(), &values.len());
        return Err(error);
    }
    Ok(())
}

/// Fecha + hora del formulario de programación -> `YYYY-MM-DDTHH:MM:00`
pub fn format_schedule_timestamp(date: NaiveDate, time: NaiveTime) -> String {
    format!("{}T{}:00", date.format("%Y-%m-%d"), time.format("%H:%M"))
}
