// POST /categorize runs the classifier over the session's scraped titles.
//
// Returns 409 Conflict if there is nothing to categorize yet. Classifier
// failures are recorded on the session and shown on the page. If the user
// re-scraped while the classifier was running, the stale results are dropped.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Extension;
use tracing::error;

use crate::pipeline::categorize::categorize_titles as run_categorize;
use crate::web::cookie::SessionId;
use crate::web::{api_error, AppState};

pub async fn categorize_titles(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Response {
    let session = state.sessions.get(&session_id.0).await;
    if !session.can_categorize() {
        return api_error(
            StatusCode::CONFLICT,
            "Scrape at least one title before categorizing",
        );
    }
    let titles = session.titles.unwrap_or_default();

    match run_categorize(state.classifier.as_ref(), &titles).await {
        Ok(table) => {
            state
                .sessions
                .update(&session_id.0, |s| {
                    if s.titles.as_ref() == Some(&titles) {
                        s.record_results(table);
                    }
                })
                .await;
        }
        Err(e) => {
            error!(error = %e, "Categorization failed");
            state
                .sessions
                .update(&session_id.0, |s| s.record_error(format!("{e:#}")))
                .await;
        }
    }

    Redirect::to("/").into_response()
}
