//! HTTP routes for lesson endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{book_lesson, get_lesson, join_lesson, transition_lesson, LessonHandlers};

/// Creates the lesson router with all endpoints.
pub fn lesson_routes(handlers: LessonHandlers) -> Router {
    Router::new()
        .route("/lessons", post(book_lesson))
        .route("/lessons/:id", get(get_lesson))
        .route("/lessons/:id/transitions/:name", post(transition_lesson))
        .route("/lessons/:id/join", post(join_lesson))
        .with_state(handlers)
}
