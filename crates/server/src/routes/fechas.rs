use axum::{extract::{rejection::JsonRejection, Path, State}, http::StatusCode, Json};
use common::types::Message;
use service::fechas::{Fecha, FechaInput, FechaPatch};
use tracing::{debug, info};

use crate::errors::JsonApiError;
use super::AppState;

/// Read the leading integer of a path id (`"1.0"` and `"12abc"` are 1 and 12).
/// Ids without one match nothing, so they are a 404 like any other unknown id.
fn parse_id(raw: &str) -> Result<i64, JsonApiError> {
    let s = raw.trim_start();
    let sign = usize::from(s.starts_with(|c| c == '+' || c == '-'));
    let digits = s[sign..].bytes().take_while(u8::is_ascii_digit).count();
    s[..sign + digits].parse::<i64>().map_err(|_| {
        debug!(id = %raw, "non-integer fecha id");
        JsonApiError::not_found()
    })
}

/// List every fecha in stored order.
pub async fn list_fechas(State(state): State<AppState>) -> Json<Vec<Fecha>> {
    let list = state.fechas.list().await;
    info!(count = list.len(), "list fechas");
    Json(list)
}

pub async fn get_fecha(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Fecha>, JsonApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.fechas.get(id).await?))
}

pub async fn create_fecha(
    State(state): State<AppState>,
    Json(input): Json<FechaInput>,
) -> Result<(StatusCode, Json<Fecha>), JsonApiError> {
    let created = state.fechas.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Fields present in the body overwrite the stored ones; `id` is kept.
/// An unknown id is a 404 whatever the body; a bad body on a known id is
/// reported with the extractor's status.
pub async fn update_fecha(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<FechaPatch>, JsonRejection>,
) -> Result<Json<Fecha>, JsonApiError> {
    let id = parse_id(&id)?;
    state.fechas.get(id).await?;
    let Json(patch) = body?;
    Ok(Json(state.fechas.update(id, patch).await?))
}

pub async fn delete_fecha(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, JsonApiError> {
    let id = parse_id(&id)?;
    state.fechas.delete(id).await?;
    Ok(Json(Message::new("Fecha eliminada")))
}
