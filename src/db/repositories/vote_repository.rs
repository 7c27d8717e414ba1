use crate::db::connection::DbPool;
use crate::db::models::Vote;
use crate::db::repositories::question_repository::{get_option, get_question};
use crate::error::PollError;
use sqlx::types::chrono::Utc;
use std::collections::HashSet;
use tracing::{error, info};

/// Records one vote. The UNIQUE(question_id, voter_token) index decides
/// races: a second insert for the same pair fails inside SQLite and comes
/// back as `AlreadyVoted`.
pub async fn cast_vote(
    pool: &DbPool,
    question_id: i64,
    option_id: i64,
    voter_token: &str,
) -> Result<Vote, PollError> {
    get_question(pool, question_id).await?;

    get_option(pool, question_id, option_id)
        .await
        .map_err(|e| match e {
            PollError::OptionNotFound => PollError::InvalidOption,
            other => other,
        })?;

    let created_at = Utc::now();
    let result = sqlx::query(
        "INSERT INTO votes (question_id, option_id, voter_token, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(question_id)
    .bind(option_id)
    .bind(voter_token)
    .bind(created_at)
    .execute(pool)
    .await;

    match result {
        Ok(done) => {
            info!(question_id, option_id, "vote recorded");
            Ok(Vote {
                id: done.last_insert_rowid(),
                question_id,
                option_id,
                voter_token: voter_token.to_string(),
                created_at,
            })
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(PollError::AlreadyVoted)
        }
        Err(e) => {
            error!(question_id, option_id, "failed to record vote: {}", e);
            Err(e.into())
        }
    }
}

pub async fn has_voted(
    pool: &DbPool,
    question_id: i64,
    voter_token: &str,
) -> Result<bool, PollError> {
    let row = sqlx::query("SELECT id FROM votes WHERE question_id = ? AND voter_token = ?")
        .bind(question_id)
        .bind(voter_token)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// Ids of every question this voter has answered.
pub async fn voted_questions(pool: &DbPool, voter_token: &str) -> Result<HashSet<i64>, PollError> {
    let ids: Vec<i64> = sqlx::query_scalar("SELECT question_id FROM votes WHERE voter_token = ?")
        .bind(voter_token)
        .fetch_all(pool)
        .await?;

    Ok(ids.into_iter().collect())
}
