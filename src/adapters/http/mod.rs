//! HTTP adapters - REST API implementations.
//!
//! Lesson endpoints sit behind the auth middleware; the health probe does
//! not.

pub mod lesson;
pub mod middleware;

use axum::{middleware::from_fn_with_state, routing::get, Router};

pub use lesson::{lesson_routes, LessonHandlers};
pub use middleware::{auth_middleware, AuthState, RequireAuth};

/// Assembles the API router.
pub fn api_router(lessons: LessonHandlers, auth: AuthState) -> Router {
    let api = lesson_routes(lessons).layer(from_fn_with_state(auth, auth_middleware));

    Router::new().route("/health", get(health)).merge(api)
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::adapters::auth::MockIdentityResolver;
    use crate::application::handlers::lesson::test_support::*;
    use crate::domain::fsm::StateName;

    fn app(world: &World) -> Router {
        let lessons = LessonHandlers::new(
            Arc::new(world.book_handler()),
            Arc::new(world.transition_handler()),
            Arc::new(world.join_handler()),
            Arc::new(world.get_handler()),
        );
        let resolver = MockIdentityResolver::new()
            .with_user("student", STUDENT)
            .with_user("teacher", TEACHER_USER)
            .with_user("stranger", STRANGER);
        api_router(lessons, Arc::new(resolver))
    }

    fn request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Authorization", format!("Bearer {}", token));
        match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_needs_no_token() {
        let world = World::new();
        let response = app(&world)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn booking_creates_pending_lesson() {
        let world = World::new();
        let body = serde_json::json!({
            "teacher_id": TEACHER.value(),
            "category_id": ACTIVE_CATEGORY.value(),
            "schedule_slot_id": OPEN_SLOT.value(),
        });

        let response = app(&world)
            .oneshot(request("POST", "/lessons", "student", Some(body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        assert_eq!(json["state"], "pending");
        assert_eq!(json["student_id"], STUDENT.value());
    }

    #[tokio::test]
    async fn booking_without_token_is_unauthorized() {
        let world = World::new();
        let response = app(&world)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/lessons")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn teacher_approves_then_student_sees_cancel() {
        let world = World::new();
        let lesson = world.booked_lesson().await;
        let app = app(&world);

        let uri = format!("/lessons/{}/transitions/approve", lesson.id);
        let response = app
            .clone()
            .oneshot(request("POST", &uri, "teacher", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["state"], "planned");

        let uri = format!("/lessons/{}", lesson.id);
        let response = app
            .oneshot(request("GET", &uri, "student", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["state"], "planned");
        assert_eq!(json["available_actions"], serde_json::json!(["cancel"]));
    }

    #[tokio::test]
    async fn student_cannot_approve() {
        let world = World::new();
        let lesson = world.booked_lesson().await;

        let uri = format!("/lessons/{}/transitions/approve", lesson.id);
        let response = app(&world)
            .oneshot(request("POST", &uri, "student", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(json_body(response).await["code"], "ACTOR_NOT_TEACHER");
        assert_eq!(world.state_of(&lesson).await, StateName::Pending);
    }

    #[tokio::test]
    async fn illegal_transition_is_conflict() {
        let world = World::new();
        let lesson = world.lesson_in(StateName::Finished).await;

        let uri = format!("/lessons/{}/transitions/start", lesson.id);
        let response = app(&world)
            .oneshot(request("POST", &uri, "teacher", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn start_returns_meeting_credential() {
        let world = World::new();
        let lesson = world.lesson_in(StateName::Planned).await;

        let uri = format!("/lessons/{}/transitions/start", lesson.id);
        let response = app(&world)
            .oneshot(request("POST", &uri, "teacher", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["state"], "ongoing");
        assert_eq!(
            json["meeting"]["room_name"],
            format!("lesson-{}", lesson.id)
        );
    }

    #[tokio::test]
    async fn join_before_start_is_conflict() {
        let world = World::new();
        let lesson = world.lesson_in(StateName::Planned).await;

        let uri = format!("/lessons/{}/join", lesson.id);
        let response = app(&world)
            .oneshot(request("POST", &uri, "student", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(json_body(response).await["code"], "ACTION_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn stranger_cannot_read_lesson() {
        let world = World::new();
        let lesson = world.booked_lesson().await;

        let uri = format!("/lessons/{}", lesson.id);
        let response = app(&world)
            .oneshot(request("GET", &uri, "stranger", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn unknown_lesson_is_not_found() {
        let world = World::new();
        let response = app(&world)
            .oneshot(request("GET", "/lessons/999", "student", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
