//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos de los reportes de daños.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use validator::ValidationError;

/// Formato de texto con el que SQLite guarda `CURRENT_TIMESTAMP`
pub const SQLITE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_enum<T: PartialEq + std::fmt::Display + std::fmt::Debug + Serialize>(
    value: T,
    allowed_values: &[T],
) -> Result<(), ValidationError> {
    if !allowed_values.contains(&value) {
        let mut error = ValidationError::new("enum");
        error.add_param("value".into(), &value);
        error.add_param("allowed_values".into(), &format!("{:?}", allowed_values));
        return Err(error);
    }
    Ok(())
}

/// Validar y convertir string a datetime (UTC, sin zona)
///
/// Acepta RFC3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` y `YYYY-MM-DD`.
pub fn validate_datetime(value: &str) -> Result<NaiveDateTime, ValidationError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc).naive_utc());
    }

    for format in [SQLITE_DATETIME_FORMAT, "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }

    if let Some(dt) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(dt);
    }

    let mut error = ValidationError::new("datetime");
    error.add_param("value".into(), &value.to_string());
    error.add_param("format".into(), &"RFC3339 or YYYY-MM-DD[ HH:MM:SS]".to_string());
    Err(error)
}

/// Convertir el identificador de vehículo recibido en JSON.
///
/// `Ok(None)` significa "ausente": null, 0, "", false o el campo omitido.
pub fn parse_vehicle_id(value: Option<&Value>) -> Result<Option<i64>, ValidationError> {
    let invalid = |value: &Value| {
        let mut error = ValidationError::new("vehicle_id");
        error.add_param("value".into(), value);
        error
    };

    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(v @ Value::Number(n)) => match n.as_i64() {
            Some(0) => Ok(None),
            Some(id) if id > 0 => Ok(Some(id)),
            _ => Err(invalid(v)),
        },
        Some(v @ Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            match s.parse::<i64>() {
                Ok(0) => Ok(None),
                Ok(id) if id > 0 => Ok(Some(id)),
                _ => Err(invalid(v)),
            }
        }
        Some(other) => Err(invalid(other)),
    }
}
