//! The fechas resource: dated items persisted as one JSON document.

pub mod model;
pub mod document;
pub mod repository;
pub mod store;

pub use model::{Fecha, FechaInput, FechaPatch};
pub use repository::FechaRepository;
pub use store::FechaStore;
