use async_trait::async_trait;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;

use crate::transform;

/// CSS alignment class for rendering a block.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum TextClass {
    #[sea_orm(string_value = "center")]
    Center,
    #[sea_orm(string_value = "left")]
    Left,
    #[sea_orm(string_value = "right")]
    Right,
}

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "text_blocks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subdivision_id: i64,
    pub text: String,
    pub slider_id: Option<i64>,
    pub text_class: TextClass,

    #[sea_orm(belongs_to, from = "subdivision_id", to = "id")]
    pub subdivision: Option<super::subdivision::Entity>,

    #[sea_orm(belongs_to, from = "slider_id", to = "id")]
    pub slider: Option<super::image_slider::Entity>,
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Pseudo-tags in the body are translated on every save. Literal
    /// occurrences of the source tags are always rewritten; stored text is
    /// stable only because translation removes them.
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, sea_orm::DbErr>
    where
        C: ConnectionTrait,
    {
        if let Some(text) = self.text.try_as_ref() {
            let translated = transform::translate_markup(text);
            self.text = Set(translated);
        }

        Ok(self)
    }
}
