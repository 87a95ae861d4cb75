use migration::Migrator;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryOrder, Set,
};
use sea_orm_migration::MigratorTrait;

use crate::{entities::movie, error::AppResult, models::NewMovie};

/// Owns all access to the movies table. Constructed once at startup and
/// cloned into request handlers; the underlying connection pool is shared.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the schema if absent and seeds the default collection when
    /// the table is empty. Safe to call on every process start.
    pub async fn initialize(&self) -> AppResult<()> {
        Migrator::up(&self.db, None).await?;

        let existing = movie::Entity::find().count(&self.db).await?;
        if existing == 0 {
            movie::Entity::insert_many(seed_movies().into_iter().map(to_active))
                .exec(&self.db)
                .await?;
            tracing::info!("seeded movie collection with default rows");
        }

        Ok(())
    }

    /// Every movie, ordered by title ascending (byte order), then by id so
    /// equal titles keep insertion order.
    pub async fn list_all(&self) -> AppResult<Vec<movie::Model>> {
        Ok(movie::Entity::find()
            .order_by_asc(movie::Column::Title)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Inserts one movie; the store assigns the id. Returns the persisted
    /// row.
    pub async fn append(&self, new: NewMovie) -> AppResult<movie::Model> {
        Ok(to_active(new).insert(&self.db).await?)
    }
}

fn to_active(new: NewMovie) -> movie::ActiveModel {
    movie::ActiveModel {
        id: NotSet,
        category: Set(new.category),
        title: Set(new.title),
        year: Set(new.year),
        director: Set(new.director),
        rating: Set(new.rating),
        edited: Set(new.edited),
        lent_to: Set(new.lent_to),
        notes: Set(new.notes),
    }
}

fn seed_movies() -> [NewMovie; 3] {
    [
        NewMovie {
            category: "Drama".to_string(),
            title: "The Shawshank Redemption".to_string(),
            year: 1994,
            director: "Frank Darabont".to_string(),
            rating: "R".to_string(),
            edited: false,
            lent_to: None,
            notes: None,
        },
        NewMovie {
            category: "Comedy".to_string(),
            title: "The Big Lebowski".to_string(),
            year: 1998,
            director: "Joel Coen, Ethan Coen".to_string(),
            rating: "R".to_string(),
            edited: false,
            lent_to: None,
            notes: None,
        },
        NewMovie {
            category: "Action/Adventure".to_string(),
            title: "Raiders of the Lost Ark".to_string(),
            year: 1981,
            director: "Steven Spielberg".to_string(),
            rating: "PG".to_string(),
            edited: false,
            lent_to: None,
            notes: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> MovieStore {
        let db = crate::db::connect("sqlite::memory:").await.expect("in-memory database");
        MovieStore::new(db)
    }

    fn sample(title: &str) -> NewMovie {
        NewMovie {
            category: "Drama".to_string(),
            title: title.to_string(),
            year: 2000,
            director: "Someone".to_string(),
            rating: "PG".to_string(),
            edited: false,
            lent_to: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn initialize_seeds_exactly_three_movies() {
        let store = memory_store().await;
        store.initialize().await.expect("initialize");

        let movies = store.list_all().await.expect("list");
        assert_eq!(movies.len(), 3);

        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert!(titles.contains(&"The Shawshank Redemption"));
        assert!(titles.contains(&"The Big Lebowski"));
        assert!(titles.contains(&"Raiders of the Lost Ark"));
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let store = memory_store().await;
        store.initialize().await.expect("first initialize");
        store.initialize().await.expect("second initialize");

        let movies = store.list_all().await.expect("list");
        assert_eq!(movies.len(), 3);
    }

    #[tokio::test]
    async fn list_all_orders_by_title_bytes() {
        let store = memory_store().await;
        store.initialize().await.expect("initialize");

        let appended = ["Zeta", "Alpha", "Mango"];
        for title in appended {
            store.append(sample(title)).await.expect("append");
        }

        let titles: Vec<String> = store
            .list_all()
            .await
            .expect("list")
            .into_iter()
            .map(|m| m.title)
            .filter(|title| appended.contains(&title.as_str()))
            .collect();
        assert_eq!(titles, vec!["Alpha", "Mango", "Zeta"]);
    }

    #[tokio::test]
    async fn equal_titles_keep_insertion_order() {
        let store = memory_store().await;
        store.initialize().await.expect("initialize");

        let first = store.append(sample("Solaris")).await.expect("append");
        let second = store
            .append(NewMovie { year: 2002, ..sample("Solaris") })
            .await
            .expect("append");
        assert!(first.id < second.id);

        let ids: Vec<i32> = store
            .list_all()
            .await
            .expect("list")
            .into_iter()
            .filter(|m| m.title == "Solaris")
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn append_assigns_a_fresh_id_and_preserves_existing_rows() {
        let store = memory_store().await;
        store.initialize().await.expect("initialize");

        let before = store.list_all().await.expect("list");
        let added = store.append(sample("Arrival")).await.expect("append");

        let after = store.list_all().await.expect("list");
        assert_eq!(after.len(), before.len() + 1);
        assert!(before.iter().all(|m| m.id != added.id));
        for row in &before {
            assert!(after.contains(row), "pre-existing row changed: {row:?}");
        }

        let stored = after.iter().find(|m| m.id == added.id).expect("inserted row");
        assert_eq!(stored.title, "Arrival");
        assert_eq!(stored.year, 2000);
    }
}
