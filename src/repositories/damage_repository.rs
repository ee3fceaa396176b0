use sqlx::pool::PoolConnection;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::damage::{ChangeValue, DamageChange, DamageRecord, NewDamageRecord};
use crate::utils::errors::AppError;
use crate::utils::validation::SQLITE_DATETIME_FORMAT;

// Una tabla previa sin DEFAULT puede tener NULL en las categorías
const SELECT_DAMAGE: &str = r#"
    SELECT damage_id, COALESCE(car_id, 0) AS car_id, date_reported,
           COALESCE(engine_damage, 'none') AS engine_damage,
           COALESCE(tire_damage, 'none') AS tire_damage,
           COALESCE(brake_damage, 'none') AS brake_damage,
           COALESCE(bodywork_damage, 'none') AS bodywork_damage,
           COALESCE(interior_damage, 'none') AS interior_damage,
           COALESCE(electronic_damage, 'none') AS electronic_damage,
           COALESCE(glass_damage, 'none') AS glass_damage,
           COALESCE(undercarriage_damage, 'none') AS undercarriage_damage,
           COALESCE(light_damage, 'none') AS light_damage
    FROM damage
"#;

/// Repositorio de reportes de daños.
///
/// Cada instancia retiene una sola conexión del pool; vuelve al pool al hacer drop.
pub struct DamageRepository {
    conn: PoolConnection<Sqlite>,
}

impl DamageRepository {
    pub async fn acquire(pool: &SqlitePool) -> Result<Self, AppError> {
        let conn = pool.acquire().await?;
        Ok(Self { conn })
    }

    pub async fn create(&mut self, record: &NewDamageRecord) -> Result<i64, AppError> {
        let mut query = sqlx::query(
            r#"
            INSERT INTO damage (car_id, date_reported, engine_damage, tire_damage, brake_damage,
                                bodywork_damage, interior_damage, electronic_damage, glass_damage,
                                undercarriage_damage, light_damage)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.car_id)
        .bind(record.date_reported.format(SQLITE_DATETIME_FORMAT).to_string());

        for damage in &record.damages {
            query = query.bind(damage.as_str());
        }

        let result = query.execute(&mut *self.conn).await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_all(&mut self) -> Result<Vec<DamageRecord>, AppError> {
        let records = sqlx::query_as::<_, DamageRecord>(&format!("{} ORDER BY damage_id", SELECT_DAMAGE))
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(records)
    }

    pub async fn find_by_car(&mut self, car_id: i64) -> Result<Vec<DamageRecord>, AppError> {
        let records = sqlx::query_as::<_, DamageRecord>(&format!(
            "{} WHERE car_id = ? ORDER BY damage_id",
            SELECT_DAMAGE
        ))
        .bind(car_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(records)
    }

    /// Update parcial en una sola sentencia. Devuelve las filas afectadas.
    ///
    /// Sólo los nombres de columna (de la allow-list) entran al texto SQL;
    /// todos los valores van como parámetros.
    pub async fn update(&mut self, damage_id: i64, changes: &[DamageChange]) -> Result<u64, AppError> {
        if changes.is_empty() {
            return Err(AppError::BadRequest("No valid fields to update".to_string()));
        }

        let mut builder = build_update(damage_id, changes);
        let result = builder.build().execute(&mut *self.conn).await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&mut self, damage_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM damage WHERE damage_id = ?")
            .bind(damage_id)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected())
    }
}

fn build_update(damage_id: i64, changes: &[DamageChange]) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new("UPDATE damage SET ");

    let mut set = builder.separated(", ");
    for change in changes {
        set.push(change.column.column());
        set.push_unseparated(" = ");
        match &change.value {
            ChangeValue::Text(value) => {
                set.push_bind_unseparated(value.clone());
            }
            ChangeValue::Timestamp(value) => {
                set.push_bind_unseparated(value.map(|dt| dt.format(SQLITE_DATETIME_FORMAT).to_string()));
            }
        }
    }

    builder.push(" WHERE damage_id = ");
    builder.push_bind(damage_id);
    builder
}
