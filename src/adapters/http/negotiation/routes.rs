//! Route definitions for negotiation endpoints

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    get_feedback, list_personas, start_negotiation, submit_turn, NegotiationAppState,
};

/// Create the negotiation router with all endpoints
///
/// # Endpoints
///
/// - `GET /personas` - List available AI negotiator personas
/// - `POST /negotiations` - Start a new practice negotiation
/// - `POST /negotiations/{session_id}/turns` - Submit one user turn
/// - `GET /negotiations/{session_id}/feedback` - Get coaching feedback
///
/// Mounted under `/api` by the application router.
pub fn routes() -> Router<NegotiationAppState> {
    Router::new()
        .route("/personas", get(list_personas))
        .route("/negotiations", post(start_negotiation))
        .route("/negotiations/:session_id/turns", post(submit_turn))
        .route("/negotiations/:session_id/feedback", get(get_feedback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::adapters::ai::MockCompletionClient;
    use crate::adapters::storage::InMemorySessionStore;

    fn test_state() -> NegotiationAppState {
        NegotiationAppState::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(MockCompletionClient::new()),
            None,
        )
    }

    #[test]
    fn routes_creates_valid_router() {
        let router = routes();
        let _: Router<()> = router.with_state(test_state());
    }

    #[tokio::test]
    async fn router_mounts_personas_endpoint() {
        let app = routes().with_state(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/personas")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::OK);
    }
}
