//! Storage abstractions for service layer
//!
//! Contains the file-backed JSON document store used by resource stores that
//! persist their whole collection as one document.

pub mod json_document_store;
