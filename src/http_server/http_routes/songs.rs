use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::database::NewSong;
use crate::entities;
use crate::http_server::{error::Report, state::AppState};
use crate::services::display::song_summary;

#[derive(Serialize)]
pub struct SongResponse {
    pub id: i64,
    pub singer_id: i64,
    pub name: String,
    pub date_release: Option<NaiveDate>,
    pub genre_id: Option<i64>,
    pub is_album: bool,
    pub ref_vk: Option<String>,
    pub ref_yandex: Option<String>,
    pub ref_spotify: Option<String>,
    pub ref_apple: Option<String>,
    pub ref_youtube: Option<String>,
    pub ref_deezer: Option<String>,
    /// Admin-style one-liner, e.g. "Кино -> Группа крови | Альбом".
    pub display: String,
}

impl SongResponse {
    fn from_model(song: entities::song::Model, singer_name: &str) -> Self {
        let display = song_summary(singer_name, &song);
        Self {
            id: song.id,
            singer_id: song.singer_id,
            name: song.name,
            date_release: song.date_release,
            genre_id: song.genre_id,
            is_album: song.is_album,
            ref_vk: song.ref_vk,
            ref_yandex: song.ref_yandex,
            ref_spotify: song.ref_spotify,
            ref_apple: song.ref_apple,
            ref_youtube: song.ref_youtube,
            ref_deezer: song.ref_deezer,
            display,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateSongRequest {
    pub singer_id: i64,
    pub name: String,
    #[serde(default)]
    pub date_release: Option<NaiveDate>,
    #[serde(default)]
    pub genre_id: Option<i64>,
    #[serde(default)]
    pub is_album: bool,
    #[serde(default)]
    pub ref_vk: Option<String>,
    #[serde(default)]
    pub ref_yandex: Option<String>,
    #[serde(default)]
    pub ref_spotify: Option<String>,
    #[serde(default)]
    pub ref_apple: Option<String>,
    #[serde(default)]
    pub ref_youtube: Option<String>,
    #[serde(default)]
    pub ref_deezer: Option<String>,
}

pub async fn list_songs(State(app_state): State<Arc<AppState>>) -> Result<Response, Report> {
    let songs = app_state.db.list_songs().await?;
    let response: Vec<SongResponse> = songs
        .into_iter()
        .map(|(song, singer)| {
            let singer_name = singer.map(|s| s.name).unwrap_or_default();
            SongResponse::from_model(song, &singer_name)
        })
        .collect();
    Ok(Json(response).into_response())
}

pub async fn create_song(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateSongRequest>,
) -> Result<Response, Report> {
    let Some(singer) = app_state.db.get_singer(payload.singer_id).await? else {
        return Ok((
            StatusCode::NOT_FOUND,
            format!("Singer not found: {}", payload.singer_id),
        )
            .into_response());
    };

    // The embed-height rewrite runs inside the save hook.
    let song = app_state
        .db
        .create_song(NewSong {
            singer_id: payload.singer_id,
            name: payload.name,
            date_release: payload.date_release,
            genre_id: payload.genre_id,
            is_album: payload.is_album,
            ref_vk: payload.ref_vk,
            ref_yandex: payload.ref_yandex,
            ref_spotify: payload.ref_spotify,
            ref_apple: payload.ref_apple,
            ref_youtube: payload.ref_youtube,
            ref_deezer: payload.ref_deezer,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SongResponse::from_model(song, &singer.name)),
    )
        .into_response())
}
