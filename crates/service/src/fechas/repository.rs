use async_trait::async_trait;

use crate::errors::ServiceError;
use super::model::{Fecha, FechaInput, FechaPatch};

/// Trait abstraction for fechas storage (list/get/create/update/delete).
/// Implementations can be file-backed or in-memory.
#[async_trait]
pub trait FechaRepository: Send + Sync {
    async fn list(&self) -> Vec<Fecha>;
    async fn get(&self, id: i64) -> Result<Fecha, ServiceError>;
    async fn create(&self, input: FechaInput) -> Result<Fecha, ServiceError>;
    async fn update(&self, id: i64, patch: FechaPatch) -> Result<Fecha, ServiceError>;
    async fn delete(&self, id: i64) -> Result<Fecha, ServiceError>;
}
