use crate::db::connection::DbPool;
use crate::db::models::{OptionTally, Question, QuestionResults};
use crate::db::repositories::question_repository::get_question;
use crate::error::PollError;
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, sqlx::FromRow)]
struct OptionCount {
    option_id: i64,
    question_id: i64,
    text: String,
    votes: i64,
}

/// Counts come straight from the votes table on every call.
pub async fn compute_results(
    pool: &DbPool,
    question_id: i64,
) -> Result<QuestionResults, PollError> {
    let question = get_question(pool, question_id).await?;

    let counts = sqlx::query_as::<_, OptionCount>(
        r#"
        SELECT o.id AS option_id, o.question_id AS question_id, o.text AS text,
               COUNT(v.id) AS votes
        FROM options o
        LEFT JOIN votes v ON v.option_id = o.id
        WHERE o.question_id = ?
        GROUP BY o.id, o.question_id, o.text
        ORDER BY o.id ASC
        "#,
    )
    .bind(question_id)
    .fetch_all(pool)
    .await?;

    Ok(tally(question, counts))
}

/// Results for every question, newest first.
pub async fn all_results(pool: &DbPool) -> Result<Vec<QuestionResults>, PollError> {
    let questions = sqlx::query_as::<_, Question>(
        "SELECT id, text, created_at FROM questions ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await?;

    let counts = sqlx::query_as::<_, OptionCount>(
        r#"
        SELECT o.id AS option_id, o.question_id AS question_id, o.text AS text,
               COUNT(v.id) AS votes
        FROM options o
        LEFT JOIN votes v ON v.option_id = o.id
        GROUP BY o.id, o.question_id, o.text
        ORDER BY o.id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut by_question: HashMap<i64, Vec<OptionCount>> = HashMap::new();
    for count in counts {
        by_question.entry(count.question_id).or_default().push(count);
    }

    Ok(questions
        .into_iter()
        .filter_map(|question| match by_question.remove(&question.id) {
            Some(counts) => Some(tally(question, counts)),
            None => {
                warn!(question_id = question.id, "skipping question without options");
                None
            }
        })
        .collect())
}

fn tally(question: Question, counts: Vec<OptionCount>) -> QuestionResults {
    let total_votes: i64 = counts.iter().map(|c| c.votes).sum();

    let options = counts
        .into_iter()
        .map(|c| OptionTally {
            option_id: c.option_id,
            text: c.text,
            votes: c.votes,
            percentage: percentage(c.votes, total_votes),
        })
        .collect();

    QuestionResults {
        question_id: question.id,
        text: question.text,
        created_at: question.created_at,
        total_votes,
        options,
    }
}

fn percentage(votes: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * votes as f64 / total as f64
    }
}
