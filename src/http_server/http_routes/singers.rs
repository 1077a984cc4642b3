use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::http_server::{error::Report, state::AppState};

#[derive(Serialize)]
pub struct SingerResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateSingerRequest {
    pub name: String,
}

pub async fn list_singers(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<SingerResponse>>, Report> {
    let singers = app_state.db.list_singers().await?;
    Ok(Json(
        singers
            .into_iter()
            .map(|singer| SingerResponse {
                id: singer.id,
                name: singer.name,
            })
            .collect(),
    ))
}

pub async fn create_singer(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateSingerRequest>,
) -> Result<(StatusCode, Json<SingerResponse>), Report> {
    let singer = app_state.db.create_singer(&payload.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(SingerResponse {
            id: singer.id,
            name: singer.name,
        }),
    ))
}
