use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "image_units")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub slider_id: i64,
    pub image: String,

    #[sea_orm(belongs_to, from = "slider_id", to = "id")]
    pub slider: Option<super::image_slider::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
