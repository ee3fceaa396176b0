//! Modelo de Damage
//!
//! Este módulo contiene el struct DamageRecord y las nueve categorías de daño
//! con su vocabulario fijo. Mapea exactamente a la tabla `damage` de SQLite.

use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Valor por defecto de toda categoría de daño
pub const NO_DAMAGE: &str = "none";

/// Categorías de daño - cada una con su columna y vocabulario propio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DamageCategory {
    Engine,
    Tire,
    Brake,
    Bodywork,
    Interior,
    Electronic,
    Glass,
    Undercarriage,
    Light,
}

impl DamageCategory {
    pub const ALL: [DamageCategory; 9] = [
        DamageCategory::Engine,
        DamageCategory::Tire,
        DamageCategory::Brake,
        DamageCategory::Bodywork,
        DamageCategory::Interior,
        DamageCategory::Electronic,
        DamageCategory::Glass,
        DamageCategory::Undercarriage,
        DamageCategory::Light,
    ];

    /// Nombre de la columna en la tabla `damage` (y clave JSON)
    pub fn column(self) -> &'static str {
        match self {
            DamageCategory::Engine => "engine_damage",
            DamageCategory::Tire => "tire_damage",
            DamageCategory::Brake => "brake_damage",
            DamageCategory::Bodywork => "bodywork_damage",
            DamageCategory::Interior => "interior_damage",
            DamageCategory::Electronic => "electronic_damage",
            DamageCategory::Glass => "glass_damage",
            DamageCategory::Undercarriage => "undercarriage_damage",
            DamageCategory::Light => "light_damage",
        }
    }

    /// Vocabulario permitido; siempre incluye "none"
    pub fn allowed_values(self) -> &'static [&'static str] {
        match self {
            DamageCategory::Engine | DamageCategory::Electronic => &["none", "minor", "major"],
            DamageCategory::Tire => &["none", "puncture", "worn out", "bald"],
            DamageCategory::Brake => &["none", "squealing", "broken"],
            DamageCategory::Bodywork => &["none", "dent", "scratched"],
            DamageCategory::Interior => &["none", "scratched", "torn", "stained"],
            DamageCategory::Glass => &["none", "cracked", "shattered"],
            DamageCategory::Undercarriage => &["none", "scraped", "dented"],
            DamageCategory::Light => &["none", "broken", "not working"],
        }
    }

    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.column() == column)
    }

    pub fn is_allowed(self, value: &str) -> bool {
        self.allowed_values().contains(&value)
    }
}

/// Columnas que el update puede tocar: `damage_id` y `car_id` quedan fuera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatableColumn {
    DateReported,
    Category(DamageCategory),
}

impl UpdatableColumn {
    pub fn from_key(key: &str) -> Option<Self> {
        if key == "date_reported" {
            return Some(UpdatableColumn::DateReported);
        }
        DamageCategory::from_column(key).map(UpdatableColumn::Category)
    }

    pub fn column(self) -> &'static str {
        match self {
            UpdatableColumn::DateReported => "date_reported",
            UpdatableColumn::Category(category) => category.column(),
        }
    }
}

/// Valor ya validado para una columna del update
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeValue {
    Text(String),
    Timestamp(Option<NaiveDateTime>),
}

/// Un par columna → valor del SET del update parcial
#[derive(Debug, Clone, PartialEq)]
pub struct DamageChange {
    pub column: UpdatableColumn,
    pub value: ChangeValue,
}

/// Reporte de daños - mapea exactamente a la tabla damage
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DamageRecord {
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

/// Datos ya validados para insertar un reporte
#[derive(Debug, Clone)]
pub struct NewDamageRecord {
    pub car_id: i64,
    pub date_reported: NaiveDateTime,
    /// Un valor por categoría, en el orden de `DamageCategory::ALL`
    pub damages: [String; 9],
}
