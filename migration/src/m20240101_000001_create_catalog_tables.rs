use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create singers table
        manager
            .create_table(
                Table::create()
                    .table(Singer::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Singer::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Singer::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create genres table
        manager
            .create_table(
                Table::create()
                    .table(Genre::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Genre::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Genre::Name)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create songs table
        // Deleting a singer removes its songs; deleting a genre only detaches it.
        manager
            .create_table(
                Table::create()
                    .table(Song::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Song::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Song::SingerId).integer().not_null())
                    .col(ColumnDef::new(Song::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Song::DateRelease).date())
                    .col(ColumnDef::new(Song::GenreId).integer())
                    .col(
                        ColumnDef::new(Song::IsAlbum)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Song::RefVk).string_len(500))
                    .col(ColumnDef::new(Song::RefYandex).string_len(500))
                    .col(ColumnDef::new(Song::RefSpotify).string_len(500))
                    .col(ColumnDef::new(Song::RefApple).string_len(500))
                    .col(ColumnDef::new(Song::RefYoutube).string_len(500))
                    .col(ColumnDef::new(Song::RefDeezer).string_len(500))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_songs_singer_id")
                            .from(Song::Table, Song::SingerId)
                            .to(Singer::Table, Singer::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_songs_genre_id")
                            .from(Song::Table, Song::GenreId)
                            .to(Genre::Table, Genre::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Song::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genre::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Singer::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Singer {
    #[sea_orm(iden = "singers")]
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum Genre {
    #[sea_orm(iden = "genres")]
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum Song {
    #[sea_orm(iden = "songs")]
    Table,
    Id,
    SingerId,
    Name,
    DateRelease,
    GenreId,
    IsAlbum,
    RefVk,
    RefYandex,
    RefSpotify,
    RefApple,
    RefYoutube,
    RefDeezer,
}
