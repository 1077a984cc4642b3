use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "subdivisions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub article_id: i64,
    pub name: Option<String>,
    pub song_id: Option<i64>,

    #[sea_orm(belongs_to, from = "article_id", to = "id")]
    pub article: Option<super::article::Entity>,

    #[sea_orm(belongs_to, from = "song_id", to = "id")]
    pub song: Option<super::song::Entity>,

    #[sea_orm(has_many)]
    pub text_blocks: HasMany<super::text_block::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
