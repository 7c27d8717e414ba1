use crate::db::connection::DbPool;
use crate::db::models::{NewQuestion, PollOption, Question, QuestionWithOptions};
use crate::error::PollError;
use sqlx::types::chrono::Utc;
use std::collections::HashMap;
use tracing::{info, warn};

/// Validates and stores a question with its options in one transaction.
pub async fn create_question<S: AsRef<str>>(
    pool: &DbPool,
    text: &str,
    options: &[S],
) -> Result<i64, PollError> {
    let new_question = NewQuestion::new(text, options)?;
    insert_question(pool, &new_question).await
}

pub async fn insert_question(pool: &DbPool, question: &NewQuestion) -> Result<i64, PollError> {
    let mut tx = pool.begin().await?;

    let question_id = sqlx::query("INSERT INTO questions (text, created_at) VALUES (?, ?)")
        .bind(question.text())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    for option_text in question.options() {
        sqlx::query("INSERT INTO options (question_id, text) VALUES (?, ?)")
            .bind(question_id)
            .bind(option_text)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    info!(
        question_id,
        options = question.options().len(),
        "question created"
    );
    Ok(question_id)
}

pub async fn get_question(pool: &DbPool, question_id: i64) -> Result<Question, PollError> {
    sqlx::query_as::<_, Question>("SELECT id, text, created_at FROM questions WHERE id = ?")
        .bind(question_id)
        .fetch_optional(pool)
        .await?
        .ok_or(PollError::QuestionNotFound)
}

/// The option, provided it exists and belongs to `question_id`.
pub async fn get_option(
    pool: &DbPool,
    question_id: i64,
    option_id: i64,
) -> Result<PollOption, PollError> {
    sqlx::query_as::<_, PollOption>(
        "SELECT id, question_id, text FROM options WHERE id = ? AND question_id = ?",
    )
    .bind(option_id)
    .bind(question_id)
    .fetch_optional(pool)
    .await?
    .ok_or(PollError::OptionNotFound)
}

pub async fn get_question_options(
    pool: &DbPool,
    question_id: i64,
) -> Result<Vec<PollOption>, PollError> {
    let options = sqlx::query_as::<_, PollOption>(
        "SELECT id, question_id, text FROM options WHERE question_id = ? ORDER BY id ASC",
    )
    .bind(question_id)
    .fetch_all(pool)
    .await?;

    Ok(options)
}

/// Every question newest first, each with its options in creation order.
pub async fn list_questions(pool: &DbPool) -> Result<Vec<QuestionWithOptions>, PollError> {
    // Questions first: anything they return was committed together with its options.
    let questions = sqlx::query_as::<_, Question>(
        "SELECT id, text, created_at FROM questions ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await?;

    let options = sqlx::query_as::<_, PollOption>(
        "SELECT id, question_id, text FROM options ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;

    let mut by_question: HashMap<i64, Vec<PollOption>> = HashMap::new();
    for option in options {
        by_question.entry(option.question_id).or_default().push(option);
    }

    Ok(questions
        .into_iter()
        .filter_map(|question| match by_question.remove(&question.id) {
            Some(options) => Some(QuestionWithOptions { question, options }),
            None => {
                warn!(question_id = question.id, "skipping question without options");
                None
            }
        })
        .collect())
}
