use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::dto::damage_dto::{CreateDamageRequest, DamageResponse, MessageResponse, UpdateDamageRequest};
use crate::repositories::damage_repository::DamageRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct DamageController {
    pool: SqlitePool,
}

impl DamageController {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateDamageRequest) -> Result<MessageResponse, AppError> {
        // Validar antes de pedir conexión
        let record = request.into_new_record(Utc::now().naive_utc())?;

        let mut repository = DamageRepository::acquire(&self.pool).await?;
        let damage_id = repository.create(&record).await?;

        info!("📝 Reporte {} registrado para el vehículo {}", damage_id, record.car_id);
        Ok(MessageResponse::created(damage_id))
    }

    pub async fn list_all(&self) -> Result<Vec<DamageResponse>, AppError> {
        let mut repository = DamageRepository::acquire(&self.pool).await?;
        let records = repository.find_all().await?;

        Ok(records.into_iter().map(DamageResponse::from).collect())
    }

    /// A diferencia de `list_all`, un resultado vacío es 404
    pub async fn list_by_car(&self, car_id: i64) -> Result<Vec<DamageResponse>, AppError> {
        let mut repository = DamageRepository::acquire(&self.pool).await?;
        let records = repository.find_by_car(car_id).await?;

        if records.is_empty() {
            return Err(not_found_error("No damage data found for this car"));
        }

        Ok(records.into_iter().map(DamageResponse::from).collect())
    }

    pub async fn update(
        &self,
        damage_id: i64,
        request: UpdateDamageRequest,
    ) -> Result<MessageResponse, AppError> {
        let changes = request.into_changes()?;

        let mut repository = DamageRepository::acquire(&self.pool).await?;
        if repository.update(damage_id, &changes).await? == 0 {
            return Err(not_found_error(format!("No report found with id {}", damage_id)));
        }

        info!("✏️ Reporte {} actualizado ({} campos)", damage_id, changes.len());
        Ok(MessageResponse::success(format!(
            "Damage report {} updated successfully",
            damage_id
        )))
    }

    pub async fn delete(&self, damage_id: i64) -> Result<MessageResponse, AppError> {
        let mut repository = DamageRepository::acquire(&self.pool).await?;
        if repository.delete(damage_id).await? == 0 {
            return Err(not_found_error(format!(
                "No damage report found with id {}",
                damage_id
            )));
        }

        info!("🗑️ Reporte {} eliminado", damage_id);
        Ok(MessageResponse::success(format!(
            "Damage report {} deleted successfully",
            damage_id
        )))
    }
}
