// POST /scrape fetches the source page and stores its titles in the session.
//
// Success replaces the session's titles and drops earlier results. A failed
// request leaves the session as it was and records a readable error; an
// empty page is stored (so Categorize stays hidden) with an explanation.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect};
use axum::Extension;
use tracing::warn;

use crate::web::cookie::SessionId;
use crate::web::AppState;

pub async fn scrape_titles(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> impl IntoResponse {
    let url = state.scraper.url().to_string();

    match state.scraper.fetch_titles().await {
        Ok(titles) => {
            let empty = titles.is_empty();
            state
                .sessions
                .update(&session_id.0, |s| {
                    s.record_scrape(titles);
                    if empty {
                        s.record_error(format!("No headlines found at {url}"));
                    }
                })
                .await;
        }
        Err(e) => {
            warn!(url = %url, error = %e, "Scrape failed");
            state
                .sessions
                .update(&session_id.0, |s| {
                    s.record_error(format!("Scrape failed: {e:#}"))
                })
                .await;
        }
    }

    Redirect::to("/")
}
