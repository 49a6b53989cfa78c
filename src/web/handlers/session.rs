// GET /api/session returns the caller's session state as JSON, including
// which actions are currently available.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};

use crate::web::cookie::SessionId;
use crate::web::AppState;

pub async fn get_session(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> impl IntoResponse {
    let session = state.sessions.get(&session_id.0).await;

    Json(serde_json::json!({
        "source_url": state.scraper.url(),
        "can_categorize": session.can_categorize(),
        "can_download": session.can_download(),
        "session": session,
    }))
}
