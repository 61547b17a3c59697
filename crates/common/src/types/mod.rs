use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Plain confirmation/error body: `{"mensaje": "..."}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub mensaje: String,
}

impl Message {
    pub fn new(mensaje: impl Into<String>) -> Self {
        Self { mensaje: mensaje.into() }
    }
}
