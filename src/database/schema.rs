//! Definición del schema SQLite

/// Tabla de reportes de daños. Cada categoría tiene su CHECK con el vocabulario fijo.
pub const CREATE_DAMAGE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS damage (
    damage_id INTEGER PRIMARY KEY AUTOINCREMENT,
    car_id INTEGER NOT NULL,
    date_reported DATETIME DEFAULT CURRENT_TIMESTAMP,
    engine_damage TEXT NOT NULL CHECK(engine_damage IN ('none', 'minor', 'major')) DEFAULT 'none',
    tire_damage TEXT NOT NULL CHECK(tire_damage IN ('none', 'puncture', 'worn out', 'bald')) DEFAULT 'none',
    brake_damage TEXT NOT NULL CHECK(brake_damage IN ('none', 'squealing', 'broken')) DEFAULT 'none',
    bodywork_damage TEXT NOT NULL CHECK(bodywork_damage IN ('none', 'dent', 'scratched')) DEFAULT 'none',
    interior_damage TEXT NOT NULL CHECK(interior_damage IN ('none', 'scratched', 'torn', 'stained')) DEFAULT 'none',
    electronic_damage TEXT NOT NULL CHECK(electronic_damage IN ('none', 'minor', 'major')) DEFAULT 'none',
    glass_damage TEXT NOT NULL CHECK(glass_damage IN ('none', 'cracked', 'shattered')) DEFAULT 'none',
    undercarriage_damage TEXT NOT NULL CHECK(undercarriage_damage IN ('none', 'scraped', 'dented')) DEFAULT 'none',
    light_damage TEXT NOT NULL CHECK(light_damage IN ('none', 'broken', 'not working')) DEFAULT 'none'
)
"#;

/// Índices
pub const CREATE_INDEXES: &[&str] = &["CREATE INDEX IF NOT EXISTS idx_damage_car_id ON damage(car_id)"];
