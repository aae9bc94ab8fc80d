use std::time::Instant;

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::StatusCode,
    Form, Json,
};
use serde_json::json;
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    models::{MedicineForm, MedicineName},
    AppState,
};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_medicines(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let start = Instant::now();
    let medicines = state.store.fetch_all_medicines().await?;

    info!(
        count = medicines.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Listed medicines"
    );

    Ok((StatusCode::OK, Json(json!({ "medicines": medicines }))))
}

// ── Get by name ───────────────────────────────────────────────────────────────

pub async fn get_medicine(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let medicine = state.store.fetch_medicine_by_name(&name).await?;

    info!(name = %medicine.name, "Fetched medicine");

    Ok((StatusCode::OK, Json(json!(medicine))))
}

// ── Average ───────────────────────────────────────────────────────────────────

/// Always answers 200 for a missing store or an empty catalog, with the reason
/// in an `error` field. `AppError::NoMedicines` renders that body itself.
pub async fn average_price(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    match state.store.average_price().await {
        Ok(average) => {
            info!(average_price = average, "Computed average price");
            Ok((StatusCode::OK, Json(json!({ "average_price": average }))))
        }
        Err(e @ AppError::StoreMissing(_)) => {
            info!(reason = %e, "Average price unavailable");
            Ok((StatusCode::OK, Json(json!({ "error": e.to_string() }))))
        }
        Err(e) => Err(e),
    }
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_medicine(
    State(state): State<AppState>,
    form: Result<Form<MedicineForm>, FormRejection>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let Form(payload) = form?;
    payload.validate().map_err(AppError::BadRequest)?;

    let start = Instant::now();
    let medicine = state.store.insert_medicine(&payload).await?;

    info!(
        name = %medicine.name,
        price = payload.price,
        elapsed_ms = start.elapsed().as_millis(),
        "Created medicine"
    );

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": format!("Medicine '{}' created successfully", payload.name),
        })),
    ))
}

// ── Update ────────────────────────────────────────────────────────────────────

pub async fn update_medicine(
    State(state): State<AppState>,
    form: Result<Form<MedicineForm>, FormRejection>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let Form(payload) = form?;
    payload.validate().map_err(AppError::BadRequest)?;

    let start = Instant::now();
    let medicine = state
        .store
        .update_medicine_price(&payload.name, payload.price)
        .await?;

    info!(
        name = %medicine.name,
        price = payload.price,
        elapsed_ms = start.elapsed().as_millis(),
        "Updated medicine"
    );

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": format!("Medicine '{}' updated successfully", payload.name),
        })),
    ))
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_medicine(
    State(state): State<AppState>,
    form: Result<Form<MedicineName>, FormRejection>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let Form(payload) = form?;
    let start = Instant::now();
    let removed = state.store.delete_medicine(&payload.name).await?;

    info!(
        name = %removed.name,
        elapsed_ms = start.elapsed().as_millis(),
        "Deleted medicine"
    );

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": format!("Medicine '{}' deleted successfully", payload.name),
        })),
    ))
}
