// GET / renders the page for the caller's session.

use axum::extract::State;
use axum::response::Html;
use axum::Extension;

use crate::web::cookie::SessionId;
use crate::web::page::render_index;
use crate::web::AppState;

pub async fn index(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Html<String> {
    let session = state.sessions.get(&session_id.0).await;
    Html(render_index(&session, state.scraper.url()))
}
