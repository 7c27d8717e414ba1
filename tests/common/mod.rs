#![allow(dead_code)]

use sqlx::sqlite::SqliteConnectOptions;
use uuid::Uuid;
use worldvote::db::{self, DbPool};

/// Fresh database file per test so parallel tests never share rows.
pub async fn test_pool() -> DbPool {
    let path = std::env::temp_dir().join(format!("worldvote-test-{}.db", Uuid::new_v4()));
    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);

    db::connect_with(options, 8)
        .await
        .expect("failed to open test database")
}

pub async fn row_count(pool: &DbPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("count query failed")
}

/// Creates a question and returns its id with its option ids in order.
pub async fn question_with(pool: &DbPool, text: &str, options: &[&str]) -> (i64, Vec<i64>) {
    let question_id = db::create_question(pool, text, options)
        .await
        .expect("question should be valid");
    let option_ids = db::get_question_options(pool, question_id)
        .await
        .expect("options should load")
        .into_iter()
        .map(|o| o.id)
        .collect();

    (question_id, option_ids)
}
