use color_eyre::{Result, eyre::Context};
use migration::MigratorTrait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectOptions, ConnectionTrait,
    Database as SeaDatabase, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};

use crate::entities;

pub struct Database {
    pub conn: DatabaseConnection,
}

/// Fields needed to create a song; the embed-height rewrite happens in the
/// entity save hook, not here.
#[derive(Debug, Clone, Default)]
pub struct NewSong {
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
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub name: String,
    pub section_id: Option<i64>,
    /// Media path; `None` falls back to the schema's placeholder default.
    pub image: Option<String>,
    pub image_caption: Option<String>,
    pub slider_id: Option<i64>,
    pub song_id: Option<i64>,
    pub date_release: DateTime<Utc>,
    pub is_active: bool,
}

impl Database {
    /// Open or create a database at the given path
    pub async fn open(path: &Path) -> Result<Self> {
        log::debug!("Opening database at: {}", path.display());

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context(format!(
                "Failed to create database directory: {}",
                parent.display()
            ))?;
        }

        let url = format!("sqlite://{}?mode=rwc", path.display());

        let mut opt = ConnectOptions::new(url);
        opt.max_connections(100)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(8))
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(8))
            .max_lifetime(Duration::from_secs(8))
            .sqlx_logging(false);

        let conn = SeaDatabase::connect(opt)
            .await
            .context(format!("Failed to open database: {}", path.display()))?;

        // The cascade/nullify rules live in the schema; sqlite only honors
        // them with foreign keys switched on.
        conn.execute_unprepared("PRAGMA foreign_keys = ON")
            .await
            .context("Failed to enable foreign keys")?;

        log::debug!("Running database migrations");
        migration::Migrator::up(&conn, None)
            .await
            .context("Failed to run database migrations")?;

        log::info!("Database ready at: {}", path.display());
        Ok(Database { conn })
    }

    // ========== Singer Methods ==========

    pub async fn create_singer(&self, name: &str) -> Result<entities::singer::Model> {
        log::debug!("Creating singer: '{}'", name);
        let singer = entities::singer::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        };
        singer
            .insert(&self.conn)
            .await
            .context(format!("Failed to create singer: {}", name))
    }

    pub async fn get_singer(&self, id: i64) -> Result<Option<entities::singer::Model>> {
        entities::singer::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to fetch singer")
    }

    pub async fn list_singers(&self) -> Result<Vec<entities::singer::Model>> {
        entities::singer::Entity::find()
            .order_by_asc(entities::singer::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list singers")
    }

    pub async fn delete_singer(&self, id: i64) -> Result<()> {
        log::debug!("Deleting singer {} (cascades to its songs)", id);
        entities::singer::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete singer")?;
        Ok(())
    }

    // ========== Genre Methods ==========

    pub async fn create_genre(&self, name: &str) -> Result<entities::genre::Model> {
        log::debug!("Creating genre: '{}'", name);
        let genre = entities::genre::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        };
        genre
            .insert(&self.conn)
            .await
            .context(format!("Failed to create genre: {}", name))
    }

    pub async fn list_genres(&self) -> Result<Vec<entities::genre::Model>> {
        entities::genre::Entity::find()
            .order_by_asc(entities::genre::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list genres")
    }

    /// Deleting a genre detaches it from songs instead of deleting them.
    pub async fn delete_genre(&self, id: i64) -> Result<()> {
        log::debug!("Deleting genre {}", id);
        entities::genre::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete genre")?;
        Ok(())
    }

    // ========== Song Methods ==========

    pub async fn create_song(&self, new: NewSong) -> Result<entities::song::Model> {
        log::debug!("Creating song: '{}' (singer {})", new.name, new.singer_id);
        let song = entities::song::ActiveModel {
            singer_id: ActiveValue::Set(new.singer_id),
            name: ActiveValue::Set(new.name),
            date_release: ActiveValue::Set(new.date_release),
            genre_id: ActiveValue::Set(new.genre_id),
            is_album: ActiveValue::Set(new.is_album),
            ref_vk: ActiveValue::Set(new.ref_vk),
            ref_yandex: ActiveValue::Set(new.ref_yandex),
            ref_spotify: ActiveValue::Set(new.ref_spotify),
            ref_apple: ActiveValue::Set(new.ref_apple),
            ref_youtube: ActiveValue::Set(new.ref_youtube),
            ref_deezer: ActiveValue::Set(new.ref_deezer),
            ..Default::default()
        };
        song.insert(&self.conn)
            .await
            .context("Failed to create song")
    }

    pub async fn get_song(&self, id: i64) -> Result<Option<entities::song::Model>> {
        entities::song::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to fetch song")
    }

    /// Songs with their singers, ordered by singer name then song name.
    pub async fn list_songs(
        &self,
    ) -> Result<Vec<(entities::song::Model, Option<entities::singer::Model>)>> {
        let mut songs = entities::song::Entity::find()
            .find_also_related(entities::singer::Entity)
            .all(&self.conn)
            .await
            .context("Failed to list songs")?;
        songs.sort_by(|(a, singer_a), (b, singer_b)| {
            let name_a = singer_a.as_ref().map(|s| s.name.as_str()).unwrap_or("");
            let name_b = singer_b.as_ref().map(|s| s.name.as_str()).unwrap_or("");
            name_a.cmp(name_b).then_with(|| a.name.cmp(&b.name))
        });
        Ok(songs)
    }

    /// Update a song through its save hook, re-running the embed rewrite.
    pub async fn update_song(
        &self,
        song: entities::song::ActiveModel,
    ) -> Result<entities::song::Model> {
        song.update(&self.conn)
            .await
            .context("Failed to update song")
    }

    pub async fn delete_song(&self, id: i64) -> Result<()> {
        log::debug!(
            "Deleting song {} (cascades to articles and subdivisions)",
            id
        );
        entities::song::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete song")?;
        Ok(())
    }

    // ========== Section Methods ==========

    pub async fn create_section(
        &self,
        name: &str,
        name_for_url: &str,
    ) -> Result<entities::section::Model> {
        log::debug!("Creating section: '{}' ({})", name, name_for_url);
        let section = entities::section::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            name_for_url: ActiveValue::Set(name_for_url.to_string()),
            ..Default::default()
        };
        section
            .insert(&self.conn)
            .await
            .context(format!("Failed to create section: {}", name))
    }

    pub async fn list_sections(&self) -> Result<Vec<entities::section::Model>> {
        entities::section::Entity::find()
            .order_by_asc(entities::section::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list sections")
    }

    /// Articles keep living when their section goes away; the reference is
    /// nulled by the schema.
    pub async fn delete_section(&self, id: i64) -> Result<()> {
        log::debug!("Deleting section {}", id);
        entities::section::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete section")?;
        Ok(())
    }

    // ========== Article Methods ==========

    pub async fn create_article(&self, new: NewArticle) -> Result<entities::article::Model> {
        log::debug!("Creating article: '{}'", new.name);
        let mut article = entities::article::ActiveModel {
            name: ActiveValue::Set(new.name),
            section_id: ActiveValue::Set(new.section_id),
            image_caption: ActiveValue::Set(new.image_caption),
            slider_id: ActiveValue::Set(new.slider_id),
            song_id: ActiveValue::Set(new.song_id),
            date_release: ActiveValue::Set(new.date_release),
            is_active: ActiveValue::Set(new.is_active),
            ..Default::default()
        };
        // Leave the column unset so the placeholder default applies.
        if let Some(image) = new.image {
            article.image = ActiveValue::Set(image);
        }
        article
            .insert(&self.conn)
            .await
            .context("Failed to create article")
    }

    pub async fn get_article(&self, id: i64) -> Result<Option<entities::article::Model>> {
        entities::article::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to fetch article")
    }

    /// Administrative listing: every article regardless of state, newest
    /// release first. Public listing goes through the published view.
    pub async fn list_articles(&self) -> Result<Vec<entities::article::Model>> {
        entities::article::Entity::find()
            .order_by_desc(entities::article::Column::DateRelease)
            .all(&self.conn)
            .await
            .context("Failed to list articles")
    }

    /// Update an article, stamping its last-change time.
    pub async fn update_article(
        &self,
        mut article: entities::article::ActiveModel,
    ) -> Result<entities::article::Model> {
        article.date_change = ActiveValue::Set(Some(Utc::now()));
        article
            .update(&self.conn)
            .await
            .context("Failed to update article")
    }

    pub async fn delete_article(&self, id: i64) -> Result<()> {
        log::debug!("Deleting article {} (cascades to subdivisions)", id);
        entities::article::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete article")?;
        Ok(())
    }

    // ========== Subdivision Methods ==========

    pub async fn create_subdivision(
        &self,
        article_id: i64,
        name: Option<String>,
        song_id: Option<i64>,
    ) -> Result<entities::subdivision::Model> {
        let subdivision = entities::subdivision::ActiveModel {
            article_id: ActiveValue::Set(article_id),
            name: ActiveValue::Set(name),
            song_id: ActiveValue::Set(song_id),
            ..Default::default()
        };
        subdivision
            .insert(&self.conn)
            .await
            .context("Failed to create subdivision")
    }

    pub async fn list_subdivisions(
        &self,
        article_id: i64,
    ) -> Result<Vec<entities::subdivision::Model>> {
        entities::subdivision::Entity::find()
            .filter(entities::subdivision::Column::ArticleId.eq(article_id))
            .order_by_asc(entities::subdivision::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list subdivisions")
    }

    pub async fn delete_subdivision(&self, id: i64) -> Result<()> {
        entities::subdivision::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete subdivision")?;
        Ok(())
    }

    // ========== TextBlock Methods ==========

    pub async fn create_text_block(
        &self,
        subdivision_id: i64,
        text: &str,
        slider_id: Option<i64>,
        text_class: entities::text_block::TextClass,
    ) -> Result<entities::text_block::Model> {
        let block = entities::text_block::ActiveModel {
            subdivision_id: ActiveValue::Set(subdivision_id),
            text: ActiveValue::Set(text.to_string()),
            slider_id: ActiveValue::Set(slider_id),
            text_class: ActiveValue::Set(text_class),
            ..Default::default()
        };
        block
            .insert(&self.conn)
            .await
            .context("Failed to create text block")
    }

    pub async fn get_text_block(&self, id: i64) -> Result<Option<entities::text_block::Model>> {
        entities::text_block::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to fetch text block")
    }

    pub async fn list_text_blocks(
        &self,
        subdivision_id: i64,
    ) -> Result<Vec<entities::text_block::Model>> {
        entities::text_block::Entity::find()
            .filter(entities::text_block::Column::SubdivisionId.eq(subdivision_id))
            .order_by_asc(entities::text_block::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list text blocks")
    }

    /// Update a text block through its save hook, re-running the pseudo-tag
    /// translation on the body.
    pub async fn update_text_block(
        &self,
        block: entities::text_block::ActiveModel,
    ) -> Result<entities::text_block::Model> {
        block
            .update(&self.conn)
            .await
            .context("Failed to update text block")
    }

    pub async fn delete_text_block(&self, id: i64) -> Result<()> {
        entities::text_block::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete text block")?;
        Ok(())
    }

    // ========== Slider Methods ==========

    pub async fn create_slider(&self, name: &str) -> Result<entities::image_slider::Model> {
        log::debug!("Creating image slider: '{}'", name);
        let slider = entities::image_slider::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        };
        slider
            .insert(&self.conn)
            .await
            .context(format!("Failed to create slider: {}", name))
    }

    pub async fn get_slider(&self, id: i64) -> Result<Option<entities::image_slider::Model>> {
        entities::image_slider::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to fetch slider")
    }

    pub async fn list_sliders(&self) -> Result<Vec<entities::image_slider::Model>> {
        entities::image_slider::Entity::find()
            .order_by_asc(entities::image_slider::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list sliders")
    }

    pub async fn delete_slider(&self, id: i64) -> Result<()> {
        log::debug!("Deleting slider {} (cascades to its images and owner)", id);
        entities::image_slider::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete slider")?;
        Ok(())
    }

    pub async fn add_image_unit(
        &self,
        slider_id: i64,
        image: &str,
    ) -> Result<entities::image_unit::Model> {
        let unit = entities::image_unit::ActiveModel {
            slider_id: ActiveValue::Set(slider_id),
            image: ActiveValue::Set(image.to_string()),
            ..Default::default()
        };
        unit.insert(&self.conn)
            .await
            .context("Failed to add image to slider")
    }

    /// Images of a slider in creation order; display positions derive from
    /// this ordering.
    pub async fn list_image_units(
        &self,
        slider_id: i64,
    ) -> Result<Vec<entities::image_unit::Model>> {
        entities::image_unit::Entity::find()
            .filter(entities::image_unit::Column::SliderId.eq(slider_id))
            .order_by_asc(entities::image_unit::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list slider images")
    }

    pub async fn delete_image_unit(&self, id: i64) -> Result<()> {
        entities::image_unit::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete slider image")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::text_block::TextClass;
    use crate::test_utils::test_db;

    const YANDEX_EMBED: &str =
        r#"<iframe frameborder="0" style="border:none;width:100%;" width="100%" height="180" src="https://music.yandex.ru/iframe/#track/1/1"></iframe>"#;

    fn song_with_refs(singer_id: i64, is_album: bool) -> NewSong {
        NewSong {
            singer_id,
            name: "Песня".to_string(),
            is_album,
            ref_vk: Some(r#"<iframe height="300" src="vk"></iframe>"#.to_string()),
            ref_yandex: Some(YANDEX_EMBED.to_string()),
            ref_spotify: Some(r#"height="200""#.to_string()),
            ref_apple: Some(r#"<iframe height='450' src='apple'></iframe>"#.to_string()),
            ref_youtube: Some(r#"<iframe height="315" src="yt"></iframe>"#.to_string()),
            ref_deezer: None,
            ..Default::default()
        }
    }

    // ========================================================================
    // Save-time transforms
    // ========================================================================

    #[tokio::test]
    async fn test_song_save_rewrites_heights_for_track() {
        let db = test_db().await;
        let singer = db.create_singer("Кино").await.unwrap();

        let song = db.create_song(song_with_refs(singer.id, false)).await.unwrap();

        assert!(song.ref_yandex.unwrap().contains(r#"height="150""#));
        assert_eq!(song.ref_spotify.unwrap(), r#"height="150""#);
        assert!(song.ref_apple.unwrap().contains(r#"height="150""#));
        // vk and youtube keep whatever the editor pasted.
        assert!(song.ref_vk.unwrap().contains(r#"height="300""#));
        assert!(song.ref_youtube.unwrap().contains(r#"height="315""#));
    }

    #[tokio::test]
    async fn test_album_save_rewrites_heights_to_500() {
        let db = test_db().await;
        let singer = db.create_singer("Кино").await.unwrap();

        let song = db.create_song(song_with_refs(singer.id, true)).await.unwrap();

        assert!(song.ref_yandex.unwrap().contains(r#"height="500""#));
        assert_eq!(song.ref_spotify.unwrap(), r#"height="500""#);
        assert!(song.ref_apple.unwrap().contains(r#"height="500""#));
        assert!(song.ref_vk.unwrap().contains(r#"height="300""#));
    }

    #[tokio::test]
    async fn test_ref_without_height_token_is_untouched() {
        let db = test_db().await;
        let singer = db.create_singer("Кино").await.unwrap();

        let snippet = r#"<iframe width="100%" src="spotify"></iframe>"#;
        let song = db
            .create_song(NewSong {
                singer_id: singer.id,
                name: "Песня".to_string(),
                ref_spotify: Some(snippet.to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(song.ref_spotify.as_deref(), Some(snippet));
    }

    #[tokio::test]
    async fn test_song_update_runs_rewrite_again() {
        let db = test_db().await;
        let singer = db.create_singer("Кино").await.unwrap();
        let song = db
            .create_song(NewSong {
                singer_id: singer.id,
                name: "Песня".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let mut active: entities::song::ActiveModel = song.into();
        active.ref_yandex = ActiveValue::Set(Some(YANDEX_EMBED.to_string()));
        let updated = db.update_song(active).await.unwrap();

        assert!(updated.ref_yandex.unwrap().contains(r#"height="150""#));
    }

    #[tokio::test]
    async fn test_text_block_save_translates_pseudo_tags() {
        let db = test_db().await;
        let (_, subdivision) = article_with_subdivision(&db).await;

        let block = db
            .create_text_block(
                subdivision.id,
                "<ж>Привет</ж> <ц>мир</ц>",
                None,
                TextClass::Center,
            )
            .await
            .unwrap();

        assert_eq!(
            block.text,
            "<b>Привет</b> <blockquote class='decoration'>мир</blockquote>"
        );

        // Stored text no longer carries pseudo-tags, so a plain re-save is
        // a no-op on the body.
        let resaved = db
            .update_text_block(entities::text_block::ActiveModel {
                text: ActiveValue::Set(block.text.clone()),
                ..block.clone().into()
            })
            .await
            .unwrap();
        assert_eq!(resaved.text, block.text);
    }

    // ========================================================================
    // Referential integrity
    // ========================================================================

    async fn article_with_subdivision(
        db: &Database,
    ) -> (entities::article::Model, entities::subdivision::Model) {
        let article = db
            .create_article(NewArticle {
                name: "Статья".to_string(),
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
        let subdivision = db
            .create_subdivision(article.id, Some("Раздел".to_string()), None)
            .await
            .unwrap();
        (article, subdivision)
    }

    #[tokio::test]
    async fn test_article_image_defaults_to_placeholder() {
        let db = test_db().await;
        let (article, _) = article_with_subdivision(&db).await;
        assert_eq!(article.image, "default/article.jpg");
    }

    #[tokio::test]
    async fn test_deleting_singer_cascades_to_songs() {
        let db = test_db().await;
        let singer = db.create_singer("Кино").await.unwrap();
        let song = db
            .create_song(NewSong {
                singer_id: singer.id,
                name: "Песня".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        db.delete_singer(singer.id).await.unwrap();
        assert!(db.get_song(song.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deleting_genre_detaches_songs() {
        let db = test_db().await;
        let singer = db.create_singer("Кино").await.unwrap();
        let genre = db.create_genre("рок").await.unwrap();
        let song = db
            .create_song(NewSong {
                singer_id: singer.id,
                name: "Песня".to_string(),
                genre_id: Some(genre.id),
                ..Default::default()
            })
            .await
            .unwrap();

        db.delete_genre(genre.id).await.unwrap();

        let song = db.get_song(song.id).await.unwrap().unwrap();
        assert_eq!(song.genre_id, None);
    }

    #[tokio::test]
    async fn test_deleting_section_keeps_articles() {
        let db = test_db().await;
        let section = db.create_section("Обзоры", "reviews").await.unwrap();
        let article = db
            .create_article(NewArticle {
                name: "Статья".to_string(),
                section_id: Some(section.id),
                image: None,
                image_caption: None,
                slider_id: None,
                song_id: None,
                date_release: Utc::now(),
                is_active: true,
            })
            .await
            .unwrap();

        db.delete_section(section.id).await.unwrap();

        let article = db.get_article(article.id).await.unwrap().unwrap();
        assert_eq!(article.section_id, None);
    }

    #[tokio::test]
    async fn test_deleting_article_cascades_down() {
        let db = test_db().await;
        let (article, subdivision) = article_with_subdivision(&db).await;
        let block = db
            .create_text_block(subdivision.id, "текст", None, TextClass::Center)
            .await
            .unwrap();

        db.delete_article(article.id).await.unwrap();

        assert!(db.list_subdivisions(article.id).await.unwrap().is_empty());
        assert!(db.get_text_block(block.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deleting_slider_cascades_to_images() {
        let db = test_db().await;
        let slider = db.create_slider("Слайды").await.unwrap();
        db.add_image_unit(slider.id, "sliders/a.jpg").await.unwrap();
        db.add_image_unit(slider.id, "sliders/b.jpg").await.unwrap();

        db.delete_slider(slider.id).await.unwrap();
        assert!(db.list_image_units(slider.id).await.unwrap().is_empty());
    }
}
