use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{ValidationError, ValidationErrors};

use crate::models::damage::{
    ChangeValue, DamageCategory, DamageChange, DamageRecord, NewDamageRecord, UpdatableColumn,
    NO_DAMAGE,
};
use crate::utils::errors::{bad_request_error, validation_error, AppError, AppResult};
use crate::utils::validation::{parse_vehicle_id, validate_datetime, validate_enum};

// Request para registrar un reporte de daños: un objeto JSON campo → valor
//
// Se guarda sin tipar para que un tipo incorrecto sea un error de validación
// y no un rechazo del extractor.
#[derive(Debug, Default)]
pub struct CreateDamageRequest {
    pub fields: Map<String, Value>,
}

impl From<Value> for CreateDamageRequest {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }
}

const CAR_ID_KEYS: [&str; 3] = ["car_id", "vehicleId", "vehicle_id"];
const DATE_REPORTED_KEYS: [&str; 2] = ["date_reported", "reportedAt"];

impl CreateDamageRequest {
    /// Primer valor no nulo entre las claves aceptadas
    fn field(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .filter_map(|key| self.fields.get(*key))
            .find(|value| !value.is_null())
    }

    /// Validar el payload antes de tocar la base de datos.
    ///
    /// Las categorías ausentes quedan en "none" y `date_reported` ausente
    /// toma `now`.
    pub fn into_new_record(self, now: NaiveDateTime) -> AppResult<NewDamageRecord> {
        let car_id = match parse_vehicle_id(self.field(&CAR_ID_KEYS)) {
            Ok(Some(id)) => id,
            Ok(None) => return Err(validation_error("car_id", "required", "car_id is required")),
            Err(_) => {
                return Err(validation_error(
                    "car_id",
                    "vehicle_id",
                    "car_id must be a positive integer",
                ))
            }
        };

        let mut errors = ValidationErrors::new();

        let date_reported = match self.field(&DATE_REPORTED_KEYS) {
            None => now,
            Some(value) => match parse_change(UpdatableColumn::DateReported, value) {
                Ok(ChangeValue::Timestamp(Some(dt))) => dt,
                Ok(_) => now,
                Err(e) => {
                    errors.add("date_reported", e);
                    now
                }
            },
        };

        let damages = DamageCategory::ALL.map(|category| match self.fields.get(category.column()) {
            None | Some(Value::Null) => NO_DAMAGE.to_string(),
            Some(value) => parse_category(category, value).unwrap_or_else(|e| {
                errors.add(category.column(), e);
                NO_DAMAGE.to_string()
            }),
        });

        if !errors.errors().is_empty() {
            return Err(AppError::Validation(errors));
        }

        Ok(NewDamageRecord {
            car_id,
            date_reported,
            damages,
        })
    }
}

/// Payload del update parcial: un objeto JSON campo → valor
#[derive(Debug, Default)]
pub struct UpdateDamageRequest {
    pub fields: Map<String, Value>,
}

impl From<Value> for UpdateDamageRequest {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }
}

impl UpdateDamageRequest {
    /// Filtrar a las columnas actualizables y validar sus valores.
    ///
    /// Las claves desconocidas se ignoran en silencio.
    pub fn into_changes(self) -> AppResult<Vec<DamageChange>> {
        let recognized: Vec<(UpdatableColumn, Value)> = self
            .fields
            .into_iter()
            .filter_map(|(key, value)| UpdatableColumn::from_key(&key).map(|column| (column, value)))
            .collect();

        if recognized.is_empty() {
            return Err(bad_request_error("No valid fields to update"));
        }

        let mut errors = ValidationErrors::new();
        let mut changes = Vec::with_capacity(recognized.len());

        for (column, value) in recognized {
            match parse_change(column, &value) {
                Ok(value) => changes.push(DamageChange { column, value }),
                Err(e) => errors.add(column.column(), e),
            }
        }

        if !errors.errors().is_empty() {
            return Err(AppError::Validation(errors));
        }

        Ok(changes)
    }
}

fn parse_change(column: UpdatableColumn, value: &Value) -> Result<ChangeValue, ValidationError> {
    match (column, value) {
        (UpdatableColumn::DateReported, Value::Null) => Ok(ChangeValue::Timestamp(None)),
        (UpdatableColumn::DateReported, Value::String(raw)) => validate_datetime(raw)
            .map(|dt| ChangeValue::Timestamp(Some(dt)))
            .map_err(|e| with_message(e, format!("Invalid date_reported '{}'", raw))),
        (UpdatableColumn::Category(category), value) => parse_category(category, value).map(ChangeValue::Text),
        (column, other) => Err(type_error(column.column(), other)),
    }
}

/// Una categoría debe ser un string de su vocabulario
fn parse_category(category: DamageCategory, value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::String(raw) => validate_category(category, raw).map(|_| raw.clone()),
        other => Err(type_error(category.column(), other)),
    }
}

fn type_error(column: &str, value: &Value) -> ValidationError {
    let mut error = ValidationError::new("type");
    error.add_param("value".into(), value);
    with_message(error, format!("{} must be a string", column))
}

fn validate_category(category: DamageCategory, value: &str) -> Result<(), ValidationError> {
    validate_enum(value, category.allowed_values()).map_err(|e| {
        with_message(
            e,
            format!(
                "Invalid value '{}' for {}. Allowed values: {}",
                value,
                category.column(),
                category.allowed_values().join(", ")
            ),
        )
    })
}

fn with_message(mut error: ValidationError, message: String) -> ValidationError {
    error.message = Some(message.into());
    error
}

// Response de reporte de daños
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageResponse {
    pub damage_id: i64,
    pub car_id: i64,
    pub date_reported: Option<NaiveDateTime>,
    pub engine_damage: String,
    pub tire_damage: String,
    pub brake_damage: String,
    pub bodywork_damage: String,
    pub interior_damage: String,
    pub electronic_damage: String,
    pub glass_damage: String,
    pub undercarriage_damage: String,
    pub light_damage: String,
}

impl From<DamageRecord> for DamageResponse {
    fn from(record: DamageRecord) -> Self {
        Self {
            damage_id: record.damage_id,
            car_id: record.car_id,
            date_reported: record.date_reported,
            engine_damage: record.engine_damage,
            tire_damage: record.tire_damage,
            brake_damage: record.brake_damage,
            bodywork_damage: record.bodywork_damage,
            interior_damage: record.interior_damage,
            electronic_damage: record.electronic_damage,
            glass_damage: record.glass_damage,
            undercarriage_damage: record.undercarriage_damage,
            light_damage: record.light_damage,
        }
    }
}

// Response genérica con mensaje
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage_id: Option<i64>,
}

impl MessageResponse {
    pub fn success(message: String) -> Self {
        Self {
            success: true,
            message,
            damage_id: None,
        }
    }

    pub fn created(damage_id: i64) -> Self {
        Self {
            success: true,
            message: "Damage registered successfully".to_string(),
            damage_id: Some(damage_id),
        }
    }
}
