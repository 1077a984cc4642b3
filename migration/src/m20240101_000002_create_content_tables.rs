use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_catalog_tables::Song;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create sections table
        manager
            .create_table(
                Table::create()
                    .table(Section::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Section::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Section::Name)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Section::NameForUrl)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create image_sliders table
        manager
            .create_table(
                Table::create()
                    .table(ImageSlider::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ImageSlider::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ImageSlider::Name).string_len(50).not_null())
                    .to_owned(),
            )
            .await?;

        // Create articles table
        // slider_id is unique: a slider belongs to at most one article.
        manager
            .create_table(
                Table::create()
                    .table(Article::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Article::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Article::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Article::SectionId).integer())
                    .col(
                        ColumnDef::new(Article::Image)
                            .string()
                            .not_null()
                            .default("default/article.jpg"),
                    )
                    .col(ColumnDef::new(Article::ImageCaption).string_len(200))
                    .col(ColumnDef::new(Article::SliderId).integer().unique_key())
                    .col(ColumnDef::new(Article::SongId).integer())
                    .col(
                        ColumnDef::new(Article::DateRelease)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Article::DateChange).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Article::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_articles_section_id")
                            .from(Article::Table, Article::SectionId)
                            .to(Section::Table, Section::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_articles_slider_id")
                            .from(Article::Table, Article::SliderId)
                            .to(ImageSlider::Table, ImageSlider::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_articles_song_id")
                            .from(Article::Table, Article::SongId)
                            .to(Song::Table, Song::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create subdivisions table
        manager
            .create_table(
                Table::create()
                    .table(Subdivision::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subdivision::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subdivision::ArticleId).integer().not_null())
                    .col(ColumnDef::new(Subdivision::Name).string_len(100))
                    .col(ColumnDef::new(Subdivision::SongId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subdivisions_article_id")
                            .from(Subdivision::Table, Subdivision::ArticleId)
                            .to(Article::Table, Article::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subdivisions_song_id")
                            .from(Subdivision::Table, Subdivision::SongId)
                            .to(Song::Table, Song::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create text_blocks table
        manager
            .create_table(
                Table::create()
                    .table(TextBlock::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TextBlock::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TextBlock::SubdivisionId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TextBlock::Text).text().not_null())
                    .col(ColumnDef::new(TextBlock::SliderId).integer().unique_key())
                    .col(
                        ColumnDef::new(TextBlock::TextClass)
                            .string_len(20)
                            .not_null()
                            .default("center"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_text_blocks_subdivision_id")
                            .from(TextBlock::Table, TextBlock::SubdivisionId)
                            .to(Subdivision::Table, Subdivision::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_text_blocks_slider_id")
                            .from(TextBlock::Table, TextBlock::SliderId)
                            .to(ImageSlider::Table, ImageSlider::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create image_units table
        manager
            .create_table(
                Table::create()
                    .table(ImageUnit::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ImageUnit::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ImageUnit::SliderId).integer().not_null())
                    .col(ColumnDef::new(ImageUnit::Image).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_image_units_slider_id")
                            .from(ImageUnit::Table, ImageUnit::SliderId)
                            .to(ImageSlider::Table, ImageSlider::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ImageUnit::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TextBlock::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subdivision::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Article::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ImageSlider::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Section::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Section {
    #[sea_orm(iden = "sections")]
    Table,
    Id,
    Name,
    NameForUrl,
}

#[derive(DeriveIden)]
enum Article {
    #[sea_orm(iden = "articles")]
    Table,
    Id,
    Name,
    SectionId,
    Image,
    ImageCaption,
    SliderId,
    SongId,
    DateRelease,
    DateChange,
    IsActive,
}

#[derive(DeriveIden)]
enum Subdivision {
    #[sea_orm(iden = "subdivisions")]
    Table,
    Id,
    ArticleId,
    Name,
    SongId,
}

#[derive(DeriveIden)]
enum TextBlock {
    #[sea_orm(iden = "text_blocks")]
    Table,
    Id,
    SubdivisionId,
    Text,
    SliderId,
    TextClass,
}

#[derive(DeriveIden)]
enum ImageSlider {
    #[sea_orm(iden = "image_sliders")]
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum ImageUnit {
    #[sea_orm(iden = "image_units")]
    Table,
    Id,
    SliderId,
    Image,
}
