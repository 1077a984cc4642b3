use async_trait::async_trait;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

use crate::transform;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "songs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub singer_id: i64,
    pub name: String,
    pub date_release: Option<Date>,
    pub genre_id: Option<i64>,
    pub is_album: bool,

    /// Streaming-service embed snippets. Yandex, Spotify and Apple get
    /// their player height rewritten on save; the rest are stored as-is.
    pub ref_vk: Option<String>,
    pub ref_yandex: Option<String>,
    pub ref_spotify: Option<String>,
    pub ref_apple: Option<String>,
    pub ref_youtube: Option<String>,
    pub ref_deezer: Option<String>,

    #[sea_orm(belongs_to, from = "singer_id", to = "id")]
    pub singer: Option<super::singer::Entity>,

    #[sea_orm(belongs_to, from = "genre_id", to = "id")]
    pub genre: Option<super::genre::Entity>,
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, sea_orm::DbErr>
    where
        C: ConnectionTrait,
    {
        let is_album = self.is_album.try_as_ref().copied().unwrap_or(false);
        let target = transform::embed_height_for(is_album);

        for field in [
            &mut self.ref_yandex,
            &mut self.ref_spotify,
            &mut self.ref_apple,
        ] {
            if let Some(Some(markup)) = field.try_as_ref() {
                let rewritten = transform::rewrite_embed_height(markup, target);
                *field = Set(Some(rewritten));
            }
        }

        Ok(self)
    }
}
