use crate::db;
use crate::error::PollError;
use crate::identity::VoterIdentity;
use crate::startup::AppState;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

const CHARTER: [&str; 4] = [
    "Open voting, one vote per question per address.",
    "No email, no ads, no personal tracking.",
    "Anyone may propose a question with 2 to 5 options.",
    "Results are public.",
];

#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub text: String,
    pub options: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateQuestionResponse {
    pub question_id: i64,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    #[serde(flatten)]
    pub question: db::QuestionWithOptions,
    pub already_voted: bool,
}

#[derive(Debug, Deserialize)]
pub struct CastVoteRequest {
    pub option_id: i64,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub vote_id: i64,
    pub question_id: i64,
    pub option_id: i64,
    pub created_at: String,
}

pub async fn charter() -> impl IntoResponse {
    Json(json!({ "charter": CHARTER }))
}

/// Questions open for voting, flagged with whether this caller already voted.
pub async fn list_questions(
    Extension(app_state): Extension<AppState>,
    VoterIdentity(voter): VoterIdentity,
) -> Result<impl IntoResponse, PollError> {
    let questions = db::list_questions(&app_state.db).await?;

    let voted = db::voted_questions(&app_state.db, &voter).await?;

    let responses: Vec<QuestionResponse> = questions
        .into_iter()
        .map(|question| QuestionResponse {
            already_voted: voted.contains(&question.question.id),
            question,
        })
        .collect();

    Ok((StatusCode::OK, Json(responses)))
}

pub async fn create_question(
    Extension(app_state): Extension<AppState>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, PollError> {
    let question_id = db::create_question(&app_state.db, &payload.text, &payload.options).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateQuestionResponse { question_id }),
    ))
}

pub async fn cast_vote(
    Extension(app_state): Extension<AppState>,
    VoterIdentity(voter): VoterIdentity,
    Path(question_id): Path<i64>,
    Json(payload): Json<CastVoteRequest>,
) -> Result<impl IntoResponse, PollError> {
    let vote = db::cast_vote(&app_state.db, question_id, payload.option_id, &voter).await?;

    let response = VoteResponse {
        vote_id: vote.id,
        question_id: vote.question_id,
        option_id: vote.option_id,
        created_at: vote.created_at.to_rfc3339(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn question_results(
    Extension(app_state): Extension<AppState>,
    Path(question_id): Path<i64>,
) -> Result<impl IntoResponse, PollError> {
    let results = db::compute_results(&app_state.db, question_id).await?;
    Ok((StatusCode::OK, Json(results)))
}

pub async fn all_results(
    Extension(app_state): Extension<AppState>,
) -> Result<impl IntoResponse, PollError> {
    let results = db::all_results(&app_state.db).await?;
    Ok((StatusCode::OK, Json(results)))
}
