//! HTTP handlers for lesson endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::{
    BookLessonCommand, BookLessonHandler, GetLessonHandler, GetLessonQuery, JoinLessonCommand,
    JoinLessonHandler, TransitionLessonCommand, TransitionLessonHandler,
};
use crate::domain::foundation::{ErrorKind, LessonId};
use crate::domain::lesson::LessonError;

use super::dto::{
    BookLessonRequest, ErrorResponse, JoinResponse, LessonDetailResponse, LessonResponse,
    TransitionResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct LessonHandlers {
    book_handler: Arc<BookLessonHandler>,
    transition_handler: Arc<TransitionLessonHandler>,
    join_handler: Arc<JoinLessonHandler>,
    get_handler: Arc<GetLessonHandler>,
}

impl LessonHandlers {
    pub fn new(
        book_handler: Arc<BookLessonHandler>,
        transition_handler: Arc<TransitionLessonHandler>,
        join_handler: Arc<JoinLessonHandler>,
        get_handler: Arc<GetLessonHandler>,
    ) -> Self {
        Self {
            book_handler,
            transition_handler,
            join_handler,
            get_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /lessons - Book a lesson in a teacher's schedule slot
pub async fn book_lesson(
    State(handlers): State<LessonHandlers>,
    RequireAuth(actor): RequireAuth,
    Json(req): Json<BookLessonRequest>,
) -> Response {
    let cmd = BookLessonCommand {
        actor_id: actor.user_id,
        teacher_id: req.teacher_id,
        category_id: req.category_id,
        schedule_slot_id: req.schedule_slot_id,
    };

    match handlers.book_handler.handle(cmd).await {
        Ok(result) => {
            let response: LessonResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_lesson_error(e),
    }
}

/// GET /lessons/:id - Lesson details with the caller's available actions
pub async fn get_lesson(
    State(handlers): State<LessonHandlers>,
    RequireAuth(actor): RequireAuth,
    Path(lesson_id): Path<String>,
) -> Response {
    let lesson_id = match parse_lesson_id(&lesson_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetLessonQuery {
        actor_id: actor.user_id,
        lesson_id,
    };

    match handlers.get_handler.handle(query).await {
        Ok(view) => {
            let response: LessonDetailResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_lesson_error(e),
    }
}

/// POST /lessons/:id/transitions/:name - Approve, reject, cancel, start or finish
pub async fn transition_lesson(
    State(handlers): State<LessonHandlers>,
    RequireAuth(actor): RequireAuth,
    Path((lesson_id, transition)): Path<(String, String)>,
) -> Response {
    let lesson_id = match parse_lesson_id(&lesson_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = TransitionLessonCommand {
        actor_id: actor.user_id,
        lesson_id,
        transition,
    };

    match handlers.transition_handler.handle(cmd).await {
        Ok(result) => {
            let response: TransitionResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_lesson_error(e),
    }
}

/// POST /lessons/:id/join - Meeting credential for an ongoing lesson
pub async fn join_lesson(
    State(handlers): State<LessonHandlers>,
    RequireAuth(actor): RequireAuth,
    Path(lesson_id): Path<String>,
) -> Response {
    let lesson_id = match parse_lesson_id(&lesson_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = JoinLessonCommand {
        actor_id: actor.user_id,
        lesson_id,
    };

    match handlers.join_handler.handle(cmd).await {
        Ok(result) => {
            let response: JoinResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_lesson_error(e),
    }
}

fn parse_lesson_id(raw: &str) -> Result<LessonId, Response> {
    raw.parse::<LessonId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid lesson ID")),
        )
            .into_response()
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::IllegalTransition | ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Dependency => StatusCode::BAD_GATEWAY,
        ErrorKind::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn handle_lesson_error(error: LessonError) -> Response {
    let status = status_for(error.kind());
    let retryable = error.is_retryable();
    match error.kind() {
        ErrorKind::Infrastructure => {
            tracing::error!(error = %error, retryable, "lesson request failed")
        }
        ErrorKind::Dependency => {
            tracing::warn!(error = %error, retryable, "lesson dependency failed")
        }
        _ => tracing::debug!(error = %error, "lesson request refused"),
    }
    (status, Json(ErrorResponse::from(&error))).into_response()
}
