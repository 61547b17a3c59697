//! Service layer for the fechas resource.
//! - `fechas`: domain model, load-time normalisation and the file-backed store.
//! - `storage`: whole-document JSON persistence shared by stores.
//! - `errors`: error kinds surfaced to the HTTP layer.

pub mod errors;
pub mod storage;
pub mod fechas;
