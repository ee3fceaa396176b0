//! Conexión a SQLite
//!
//! Este módulo abre el pool y asegura que el schema exista al arrancar.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::schema::{CREATE_DAMAGE_TABLE, CREATE_INDEXES};

pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    /// Abrir el pool e inicializar el schema. Cualquier fallo aborta el arranque.
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let pool = config
            .create_pool()
            .await
            .with_context(|| format!("no se pudo abrir la base de datos '{}'", config.path))?;

        let connection = Self { pool };
        connection.initialize_schema().await?;

        info!("✅ Base de datos lista en {}", config.path);
        Ok(connection)
    }

    /// Crear la tabla `damage` si no existe; una tabla existente no se toca
    pub async fn initialize_schema(&self) -> Result<()> {
        sqlx::query(CREATE_DAMAGE_TABLE)
            .execute(&self.pool)
            .await
            .context("no se pudo crear la tabla damage")?;

        for &index in CREATE_INDEXES {
            sqlx::query(index)
                .execute(&self.pool)
                .await
                .with_context(|| format!("no se pudo crear el índice: {}", index))?;
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
