use std::collections::HashMap;
use std::sync::Arc;

use color_eyre::Result;
use sea_orm::{EntityTrait, QueryOrder};

use crate::database::Database;
use crate::entities;
use crate::transform::contains_ci;

/// Free-text search over text blocks. Deliberately unfiltered by article
/// visibility: this is the administrative search surface.
pub struct TextBlockQuery {
    db: Arc<Database>,
}

impl TextBlockQuery {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Keep blocks whose body, or whose subdivision's song name, genre name
    /// or singer name contains the query, case-insensitively. An empty or
    /// absent query returns every block.
    pub async fn search(&self, query: Option<&str>) -> Result<Vec<entities::text_block::Model>> {
        let blocks = entities::text_block::Entity::find()
            .order_by_asc(entities::text_block::Column::Id)
            .all(&self.db.conn)
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Failed to fetch text blocks: {}", e))?;

        let query = match query {
            Some(q) if !q.is_empty() => q,
            _ => return Ok(blocks),
        };

        // Materialize the catalog side once; matching is done in Rust so
        // Cyrillic case-folding works.
        let subdivisions = Self::by_id(
            entities::subdivision::Entity::find()
                .all(&self.db.conn)
                .await
                .map_err(|e| color_eyre::eyre::eyre!("Failed to fetch subdivisions: {}", e))?,
            |s: &entities::subdivision::Model| s.id,
        );
        let songs = Self::by_id(
            entities::song::Entity::find()
                .all(&self.db.conn)
                .await
                .map_err(|e| color_eyre::eyre::eyre!("Failed to fetch songs: {}", e))?,
            |s: &entities::song::Model| s.id,
        );
        let genres = Self::by_id(
            entities::genre::Entity::find()
                .all(&self.db.conn)
                .await
                .map_err(|e| color_eyre::eyre::eyre!("Failed to fetch genres: {}", e))?,
            |g: &entities::genre::Model| g.id,
        );
        let singers = Self::by_id(
            entities::singer::Entity::find()
                .all(&self.db.conn)
                .await
                .map_err(|e| color_eyre::eyre::eyre!("Failed to fetch singers: {}", e))?,
            |s: &entities::singer::Model| s.id,
        );

        let matches = |block: &entities::text_block::Model| -> bool {
            if contains_ci(&block.text, query) {
                return true;
            }
            let Some(subdivision) = subdivisions.get(&block.subdivision_id) else {
                return false;
            };
            let Some(song_id) = subdivision.song_id else {
                return false;
            };
            let Some(song) = songs.get(&song_id) else {
                return false;
            };
            contains_ci(&song.name, query)
                || song
                    .genre_id
                    .and_then(|id| genres.get(&id))
                    .is_some_and(|genre| contains_ci(&genre.name, query))
                || singers
                    .get(&song.singer_id)
                    .is_some_and(|singer| contains_ci(&singer.name, query))
        };

        Ok(blocks.into_iter().filter(|b| matches(b)).collect())
    }

    fn by_id<T>(items: Vec<T>, id: impl Fn(&T) -> i64) -> HashMap<i64, T> {
        items.into_iter().map(|item| (id(&item), item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{NewArticle, NewSong};
    use crate::entities::text_block::TextClass;
    use crate::test_utils::test_db;
    use chrono::Utc;

    async fn fixture(db: &Database) -> (i64, i64) {
        let singer = db.create_singer("Кино").await.unwrap();
        let genre = db.create_genre("рок").await.unwrap();
        let song = db
            .create_song(NewSong {
                singer_id: singer.id,
                name: "Группа крови".to_string(),
                genre_id: Some(genre.id),
                ..Default::default()
            })
            .await
            .unwrap();

        let article = db
            .create_article(NewArticle {
                name: "Разбор".to_string(),
                section_id: None,
                image: None,
                image_caption: None,
                slider_id: None,
                song_id: None,
                date_release: Utc::now(),
                is_active: true,
            })
            .await
            .unwrap();

        let with_song = db
            .create_subdivision(article.id, Some("О песне".to_string()), Some(song.id))
            .await
            .unwrap();
        let plain = db
            .create_subdivision(article.id, Some("Прочее".to_string()), None)
            .await
            .unwrap();
        (with_song.id, plain.id)
    }

    #[tokio::test]
    async fn test_empty_query_returns_all_blocks() {
        let db = test_db().await;
        let (sub_a, sub_b) = fixture(&db).await;
        db.create_text_block(sub_a, "раз", None, TextClass::Center)
            .await
            .unwrap();
        db.create_text_block(sub_b, "два", None, TextClass::Center)
            .await
            .unwrap();

        let query = TextBlockQuery::new(db);
        assert_eq!(query.search(None).await.unwrap().len(), 2);
        assert_eq!(query.search(Some("")).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_search_matches_body_text() {
        let db = test_db().await;
        let (sub_a, sub_b) = fixture(&db).await;
        db.create_text_block(sub_a, "Текст про альбом", None, TextClass::Center)
            .await
            .unwrap();
        db.create_text_block(sub_b, "Другое", None, TextClass::Center)
            .await
            .unwrap();

        let found = TextBlockQuery::new(db)
            .search(Some("АЛЬБОМ"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "Текст про альбом");
    }

    #[tokio::test]
    async fn test_search_matches_through_song_relations() {
        let db = test_db().await;
        let (sub_with_song, sub_plain) = fixture(&db).await;
        db.create_text_block(sub_with_song, "просто текст", None, TextClass::Center)
            .await
            .unwrap();
        db.create_text_block(sub_plain, "просто текст", None, TextClass::Center)
            .await
            .unwrap();

        let query = TextBlockQuery::new(db);

        // Song name, genre name and singer name all reach the block through
        // its subdivision.
        for q in ["крови", "рок", "кино"] {
            let found = query.search(Some(q)).await.unwrap();
            assert_eq!(found.len(), 1, "query {:?}", q);
            assert_eq!(found[0].subdivision_id, sub_with_song);
        }
    }

    #[tokio::test]
    async fn test_search_ignores_unrelated_blocks() {
        let db = test_db().await;
        let (_, sub_plain) = fixture(&db).await;
        db.create_text_block(sub_plain, "ничего общего", None, TextClass::Center)
            .await
            .unwrap();

        let found = TextBlockQuery::new(db)
            .search(Some("джаз"))
            .await
            .unwrap();
        assert!(found.is_empty());
    }
}
