use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(pk_auto(Movies::Id))
                    .col(string_len(Movies::Category, 100))
                    .col(string_len(Movies::Title, 200))
                    .col(integer(Movies::Year))
                    .col(string_len(Movies::Director, 200))
                    .col(string_len(Movies::Rating, 10))
                    .col(boolean(Movies::Edited).default(false))
                    .col(string_len_null(Movies::LentTo, 100))
                    .col(string_len_null(Movies::Notes, 25))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_title")
                    .table(Movies::Table)
                    .col(Movies::Title)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    Category,
    Title,
    Year,
    Director,
    Rating,
    Edited,
    LentTo,
    Notes,
}
