use serde::{Deserialize, Serialize};

/// A dated item: name, link, start/close dates and hosting platform.
///
/// Descriptive fields are free-form strings and may be absent; absent fields
/// are omitted from the JSON output.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Fecha {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_inicio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_cierre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plataforma: Option<String>,
}

/// Create input: every field but `id`, which the store assigns.
/// An `id` sent by the client is ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FechaInput {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub fecha_inicio: Option<String>,
    #[serde(default)]
    pub fecha_cierre: Option<String>,
    #[serde(default)]
    pub plataforma: Option<String>,
}

/// Update input: fields present here overwrite the stored ones, absent
/// fields are left as they are.
pub type FechaPatch = FechaInput;

impl Fecha {
    pub fn from_input(id: i64, input: FechaInput) -> Self {
        Self {
            id,
            nombre: input.nombre,
            url: input.url,
            fecha_inicio: input.fecha_inicio,
            fecha_cierre: input.fecha_cierre,
            plataforma: input.plataforma,
        }
    }

    /// Merge `patch` over this record. `id` never changes.
    pub fn apply(&mut self, patch: FechaPatch) {
        if let Some(v) = patch.nombre { self.nombre = Some(v); }
        if let Some(v) = patch.url { self.url = Some(v); }
        if let Some(v) = patch.fecha_inicio { self.fecha_inicio = Some(v); }
        if let Some(v) = patch.fecha_cierre { self.fecha_cierre = Some(v); }
        if let Some(v) = patch.plataforma { self.plataforma = Some(v); }
    }
}
