pub mod medicines;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;

use crate::AppState;

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let present = state.store.exists().await;
    let count = state.store.count_medicines().await.ok();

    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "medicine-service",
            "store_present": present,
            "medicines": count,
        })),
    )
}
