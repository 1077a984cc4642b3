use std::sync::Arc;

use chrono::{DateTime, Utc};
use color_eyre::Result;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};

use crate::database::Database;
use crate::entities;
use crate::transform::contains_ci;

/// Read-side view over articles. The current time is always passed in by
/// the caller; nothing here reads the wall clock.
pub struct ArticleQuery {
    db: Arc<Database>,
}

impl ArticleQuery {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// The public listing: active articles whose release time has passed,
    /// newest first.
    pub async fn published(&self, now: DateTime<Utc>) -> Result<Vec<entities::article::Model>> {
        let articles = entities::article::Entity::find()
            .filter(
                Condition::all()
                    .add(entities::article::Column::IsActive.eq(true))
                    .add(entities::article::Column::DateRelease.lte(now)),
            )
            .order_by_desc(entities::article::Column::DateRelease)
            .all(&self.db.conn)
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Failed to fetch published articles: {}", e))?;

        Ok(articles)
    }

    /// Free-text search over the published view: keep articles whose name
    /// or image caption contains the query, case-insensitively. An empty or
    /// absent query returns the base view untouched.
    pub async fn search(
        &self,
        now: DateTime<Utc>,
        query: Option<&str>,
    ) -> Result<Vec<entities::article::Model>> {
        let base = self.published(now).await?;

        let query = match query {
            Some(q) if !q.is_empty() => q,
            _ => return Ok(base),
        };

        Ok(base
            .into_iter()
            .filter(|article| {
                contains_ci(&article.name, query)
                    || article
                        .image_caption
                        .as_deref()
                        .is_some_and(|caption| contains_ci(caption, query))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::NewArticle;
    use crate::test_utils::test_db;
    use chrono::Duration;

    fn article(name: &str, caption: Option<&str>, released: DateTime<Utc>, active: bool) -> NewArticle {
        NewArticle {
            name: name.to_string(),
            section_id: None,
            image: None,
            image_caption: caption.map(str::to_string),
            slider_id: None,
            song_id: None,
            date_release: released,
            is_active: active,
        }
    }

    #[tokio::test]
    async fn test_published_excludes_inactive_and_future() {
        let db = test_db().await;
        let now = Utc::now();

        db.create_article(article("старая", None, now - Duration::days(3), true))
            .await
            .unwrap();
        db.create_article(article("неактивная", None, now - Duration::days(2), false))
            .await
            .unwrap();
        db.create_article(article("будущая", None, now + Duration::days(2), true))
            .await
            .unwrap();
        db.create_article(article("свежая", None, now - Duration::hours(1), true))
            .await
            .unwrap();

        let view = ArticleQuery::new(db).published(now).await.unwrap();
        let names: Vec<_> = view.iter().map(|a| a.name.as_str()).collect();

        // Newest release first; inactive and future articles never appear.
        assert_eq!(names, vec!["свежая", "старая"]);
    }

    #[tokio::test]
    async fn test_inactive_article_hidden_regardless_of_date() {
        let db = test_db().await;
        let now = Utc::now();

        db.create_article(article("черновик", None, now - Duration::days(100), false))
            .await
            .unwrap();

        let view = ArticleQuery::new(db).published(now).await.unwrap();
        assert!(view.is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_returns_base_view() {
        let db = test_db().await;
        let now = Utc::now();

        db.create_article(article("первая", None, now - Duration::days(2), true))
            .await
            .unwrap();
        db.create_article(article("вторая", None, now - Duration::days(1), true))
            .await
            .unwrap();

        let query = ArticleQuery::new(db);
        let base = query.published(now).await.unwrap();
        let none = query.search(now, None).await.unwrap();
        let empty = query.search(now, Some("")).await.unwrap();

        assert_eq!(base, none);
        assert_eq!(base, empty);
    }

    #[tokio::test]
    async fn test_search_matches_name_and_caption() {
        let db = test_db().await;
        let now = Utc::now();

        db.create_article(article(
            "Интервью с группой",
            None,
            now - Duration::days(1),
            true,
        ))
        .await
        .unwrap();
        db.create_article(article(
            "Рецензия",
            Some("группа на сцене"),
            now - Duration::days(2),
            true,
        ))
        .await
        .unwrap();
        db.create_article(article("Новости", None, now - Duration::days(3), true))
            .await
            .unwrap();

        let found = ArticleQuery::new(db)
            .search(now, Some("ГРУПП"))
            .await
            .unwrap();
        let names: Vec<_> = found.iter().map(|a| a.name.as_str()).collect();

        assert_eq!(names, vec!["Интервью с группой", "Рецензия"]);
    }

    #[tokio::test]
    async fn test_search_does_not_surface_unpublished_matches() {
        let db = test_db().await;
        let now = Utc::now();

        db.create_article(article("скрытая группа", None, now - Duration::days(1), false))
            .await
            .unwrap();

        let found = ArticleQuery::new(db)
            .search(now, Some("группа"))
            .await
            .unwrap();
        assert!(found.is_empty());
    }
}
