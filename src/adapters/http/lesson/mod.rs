//! HTTP adapter for lesson endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    BookLessonRequest, ErrorResponse, JoinResponse, LessonDetailResponse, LessonResponse,
    MeetingResponse, TransitionResponse,
};
pub use handlers::LessonHandlers;
pub use routes::lesson_routes;
