use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::errors::ServiceError;
use crate::storage::json_document_store::JsonDocumentStore;
use super::document::{self, FechasDocument};
use super::model::{Fecha, FechaInput, FechaPatch};
use super::repository::FechaRepository;

/// File-backed fechas store.
///
/// Holds no collection state: each operation loads the document, and each
/// successful mutation rewrites it. Mutations within one process are
/// serialised so their read-modify-write cycles don't interleave.
pub struct FechaStore {
    document: JsonDocumentStore,
    write_lock: Mutex<()>,
}

impl FechaStore {
    /// Create a store over `path`. The file doesn't need to exist yet.
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { document: JsonDocumentStore::new(path), write_lock: Mutex::new(()) })
    }

    async fn load(&self) -> Vec<Fecha> {
        match self.document.read().await {
            Some(doc) => document::normalize(doc),
            None => Vec::new(),
        }
    }

    /// Write failures are logged, not returned: the caller still gets the
    /// result of the operation it asked for.
    async fn save(&self, fechas: &[Fecha]) {
        if let Err(e) = self.document.write(&FechasDocument { fechas }).await {
            error!(path = %self.document.path().display(), error = %e, "failed to persist fechas");
        }
    }

    pub async fn list(&self) -> Vec<Fecha> {
        self.load().await
    }

    pub async fn get(&self, id: i64) -> Result<Fecha, ServiceError> {
        self.load()
            .await
            .into_iter()
            .find(|f| f.id == id)
            .ok_or_else(|| ServiceError::not_found("fecha"))
    }

    pub async fn create(&self, input: FechaInput) -> Result<Fecha, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut fechas = self.load().await;
        let fecha = Fecha::from_input(document::next_id(&fechas)?, input);
        fechas.push(fecha.clone());
        self.save(&fechas).await;
        info!(id = fecha.id, count = fechas.len(), "fecha created");
        Ok(fecha)
    }

    pub async fn update(&self, id: i64, patch: FechaPatch) -> Result<Fecha, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut fechas = self.load().await;
        let existing = fechas
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| ServiceError::not_found("fecha"))?;
        existing.apply(patch);
        let updated = existing.clone();
        self.save(&fechas).await;
        info!(id, "fecha updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<Fecha, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut fechas = self.load().await;
        let index = fechas
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| ServiceError::not_found("fecha"))?;
        let removed = fechas.remove(index);
        self.save(&fechas).await;
        info!(id, count = fechas.len(), "fecha deleted");
        Ok(removed)
    }
}

#[async_trait]
impl FechaRepository for FechaStore {
    async fn list(&self) -> Vec<Fecha> { self.list().await }
    async fn get(&self, id: i64) -> Result<Fecha, ServiceError> { self.get(id).await }
    async fn create(&self, input: FechaInput) -> Result<Fecha, ServiceError> { self.create(input).await }
    async fn update(&self, id: i64, patch: FechaPatch) -> Result<Fecha, ServiceError> { self.update(id, patch).await }
    async fn delete(&self, id: i64) -> Result<Fecha, ServiceError> { self.delete(id).await }
}
