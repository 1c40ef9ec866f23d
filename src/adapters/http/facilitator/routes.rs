//! Route definitions for dialogue facilitator endpoints

use axum::routing::post;
use axum::Router;

use super::handlers::{facilitate_dialogue, FacilitatorAppState};

/// Create the facilitator router
///
/// # Endpoints
///
/// - `POST /dialogue/facilitate` - Analyze a statement for sentiment and
///   escalation
///
/// Mounted under `/api` by the application router.
pub fn routes() -> Router<FacilitatorAppState> {
    Router::new().route("/dialogue/facilitate", post(facilitate_dialogue))
}
