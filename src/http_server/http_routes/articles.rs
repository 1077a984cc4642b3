use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities;
use crate::http_server::{error::Report, state::AppState};
use crate::services::article::ArticleQuery;

#[derive(Serialize)]
pub struct ArticlePreview {
    pub id: i64,
    pub name: String,
    pub section_id: Option<i64>,
    pub image: String,
    pub image_caption: Option<String>,
    pub date_release: DateTime<Utc>,
}

impl From<entities::article::Model> for ArticlePreview {
    fn from(article: entities::article::Model) -> Self {
        Self {
            id: article.id,
            name: article.name,
            section_id: article.section_id,
            image: article.image,
            image_caption: article.image_caption,
            date_release: article.date_release,
        }
    }
}

#[derive(Deserialize)]
pub struct PreviewParams {
    /// Free-text search; absent or empty means the plain published listing.
    pub q: Option<String>,
}

/// Published-article previews, newest first, optionally narrowed by `?q=`.
pub async fn preview_articles(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<PreviewParams>,
) -> Result<Json<Vec<ArticlePreview>>, Report> {
    let articles = ArticleQuery::new(app_state.db.clone())
        .search(Utc::now(), params.q.as_deref())
        .await?;

    Ok(Json(articles.into_iter().map(ArticlePreview::from).collect()))
}
