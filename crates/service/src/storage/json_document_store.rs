use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tokio::fs;
use tracing::{debug, warn};

use crate::errors::ServiceError;

/// Whole-document JSON file store.
///
/// Every read parses the full file and every write replaces it. Nothing is
/// cached between calls. Reads fail soft: a missing, unreadable or malformed
/// file reads as `None` so callers can start from an empty document.
#[derive(Clone, Debug)]
pub struct JsonDocumentStore {
    file_path: PathBuf,
}

impl JsonDocumentStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read and parse the document. Returns `None` if the file is absent,
    /// unreadable or not valid JSON; the reason is logged.
    pub async fn read(&self) -> Option<Value> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "document missing");
                return None;
            }
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "document unreadable");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "document is not valid JSON");
                None
            }
        }
    }

    /// Serialize `doc` pretty-printed and replace the file.
    ///
    /// The bytes go to a sibling temp file which is then renamed over the
    /// document, so readers never observe a partially written file.
    pub async fn write<T: Serialize + ?Sized>(&self, doc: &T) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(doc).map_err(|e| ServiceError::Persistence(e.to_string()))?;
        let tmp = self.tmp_path()?;
        fs::write(&tmp, data).await.map_err(|e| ServiceError::Persistence(e.to_string()))?;
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::Persistence(e.to_string()));
        }
        debug!(path = %self.file_path.display(), "document written");
        Ok(())
    }

    fn tmp_path(&self) -> Result<PathBuf, ServiceError> {
        let name = self
            .file_path
            .file_name()
            .ok_or_else(|| ServiceError::Persistence(format!("{} has no file name", self.file_path.display())))?;
        let mut tmp_name = std::ffi::OsString::from(".");
        tmp_name.push(name);
        tmp_name.push(".tmp");
        Ok(self.file_path.with_file_name(tmp_name))
    }
}
