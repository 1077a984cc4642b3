use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "singers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,

    #[sea_orm(has_many)]
    pub songs: HasMany<super::song::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
