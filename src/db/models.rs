use crate::error::PollError;
use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};

pub const MAX_QUESTION_CHARS: usize = 200;
pub const MAX_OPTION_CHARS: usize = 25;
pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PollOption {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionWithOptions {
    #[serde(flatten)]
    pub question: Question,
    pub options: Vec<PollOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vote {
    pub id: i64,
    pub question_id: i64,
    pub option_id: i64,
    pub voter_token: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionTally {
    pub option_id: i64,
    pub text: String,
    pub votes: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionResults {
    pub question_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub total_votes: i64,
    pub options: Vec<OptionTally>,
}

/// A question that passed validation and can be written as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    text: String,
    options: Vec<String>,
}

impl NewQuestion {
    /// Trims everything, drops blank options, then checks every rule and
    /// reports all violations together.
    pub fn new<S: AsRef<str>>(text: &str, options: &[S]) -> Result<Self, PollError> {
        let text = text.trim().to_string();
        let options: Vec<String> = options
            .iter()
            .map(|o| o.as_ref().trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        let mut errors = Vec::new();

        if text.is_empty() {
            errors.push("question text is required".to_string());
        } else if text.chars().count() > MAX_QUESTION_CHARS {
            errors.push(format!(
                "question text exceeds {} characters",
                MAX_QUESTION_CHARS
            ));
        }

        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&options.len()) {
            errors.push(format!(
                "between {} and {} options are required",
                MIN_OPTIONS, MAX_OPTIONS
            ));
        }

        for option in &options {
            if option.chars().count() > MAX_OPTION_CHARS {
                errors.push(format!(
                    "option exceeds {} characters: {}",
                    MAX_OPTION_CHARS, option
                ));
            }
        }

        if !errors.is_empty() {
            return Err(PollError::Validation(errors));
        }

        Ok(NewQuestion { text, options })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }
}
