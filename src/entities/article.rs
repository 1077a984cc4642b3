use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub section_id: Option<i64>,
    /// Cover image path under the media root; the schema defaults it to
    /// the `default/article.jpg` placeholder.
    pub image: String,
    pub image_caption: Option<String>,
    pub slider_id: Option<i64>,
    pub song_id: Option<i64>,
    pub date_release: DateTime<Utc>,
    pub date_change: Option<DateTime<Utc>>,
    pub is_active: bool,

    #[sea_orm(belongs_to, from = "section_id", to = "id")]
    pub section: Option<super::section::Entity>,

    #[sea_orm(belongs_to, from = "slider_id", to = "id")]
    pub slider: Option<super::image_slider::Entity>,

    #[sea_orm(belongs_to, from = "song_id", to = "id")]
    pub song: Option<super::song::Entity>,

    #[sea_orm(has_many)]
    pub subdivisions: HasMany<super::subdivision::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
