use paperdesk_data::{DataError, Entity};
use paperdesk_data_sqlx::{connect, PoolSettings, SqlxErrorExt, SqlxRepository, Tx};
use sqlx::SqlitePool;

#[derive(Debug, sqlx::FromRow)]
struct Venue {
    id: i64,
    name: String,
}

impl Entity for Venue {
    type Id = i64;

    fn table_name() -> &'static str {
        "venues"
    }

    fn id_column() -> &'static str {
        "id"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name"]
    }

    fn id(&self) -> &i64 {
        &self.id
    }
}

async fn seeded_pool() -> SqlitePool {
    let pool = connect("sqlite::memory:", &PoolSettings::default()).await.unwrap();
    sqlx::query("CREATE TABLE venues (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL)")
        .execute(&pool)
        .await
        .unwrap();
    for name in ["Nature", "Science", "Nature Physics", "ICML"] {
        sqlx::query("INSERT INTO venues (name) VALUES (?)")
            .bind(name)
            .execute(&pool)
            .await
            .unwrap();
    }
    pool
}

#[tokio::test]
async fn count_and_fetch_with_filters() {
    let pool = seeded_pool().await;
    let repo = SqlxRepository::<Venue>::new();
    let mut tx = Tx::begin(&pool).await.unwrap();

    let query = repo.query().where_contains_ci("name", "nATure");
    assert_eq!(repo.count(tx.conn(), &query).await.unwrap(), 2);

    let page = query.order_by("id", true).limit(1).offset(1);
    let rows = repo.fetch_all(tx.conn(), &page).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Nature Physics");

    tx.commit().await.unwrap();
}

#[tokio::test]
async fn wildcards_are_literal_in_contains() {
    let pool = seeded_pool().await;
    let repo = SqlxRepository::<Venue>::new();
    let mut tx = Tx::begin(&pool).await.unwrap();
    let query = repo.query().where_contains_ci("name", "%");
    assert_eq!(repo.count(tx.conn(), &query).await.unwrap(), 0);
}

#[tokio::test]
async fn find_by_id_returns_none_when_missing() {
    let pool = seeded_pool().await;
    let repo = SqlxRepository::<Venue>::new();
    let mut tx = Tx::begin(&pool).await.unwrap();
    let found = repo.find_by_id(tx.conn(), 2).await.unwrap();
    assert_eq!(found.map(|v| v.name).as_deref(), Some("Science"));
    assert!(repo.find_by_id(tx.conn(), 99).await.unwrap().is_none());
}

#[tokio::test]
async fn dropped_transaction_rolls_back() {
    let pool = seeded_pool().await;
    {
        let mut tx = Tx::begin(&pool).await.unwrap();
        sqlx::query("DELETE FROM venues")
            .execute(tx.conn())
            .await
            .unwrap();
    }
    let repo = SqlxRepository::<Venue>::new();
    let mut tx = Tx::begin(&pool).await.unwrap();
    assert_eq!(repo.count(tx.conn(), &repo.query()).await.unwrap(), 4);
}

#[test]
fn row_not_found_maps_to_not_found() {
    assert!(matches!(
        sqlx::Error::RowNotFound.into_data_error(),
        DataError::NotFound(_)
    ));
}
