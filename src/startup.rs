use crate::db::connection::DbPool;
use crate::polls;
use axum::{
    Router,
    extract::Extension,
    http::{
        StatusCode,
        header::{ACCEPT, CONTENT_TYPE},
    },
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
}

impl AppState {
    pub fn new(db: DbPool) -> Self {
        AppState { db }
    }
}

pub fn app(app_state: AppState) -> Router {
    Router::new()
        .route("/charter", get(polls::charter))
        .route(
            "/questions",
            get(polls::list_questions).post(polls::create_question),
        )
        .route("/questions/:id/votes", post(polls::cast_vote))
        .route("/questions/:id/results", get(polls::question_results))
        .route("/results", get(polls::all_results))
        .layer(Extension(app_state))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::mirror_request())
                .allow_methods([
                    axum::http::Method::POST,
                    axum::http::Method::GET,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([CONTENT_TYPE, ACCEPT]),
        )
        .fallback(handler_404)
}

async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}
