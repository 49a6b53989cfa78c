// GET /download returns the session's results as a CSV attachment.
//
// Returns 404 until the session has been categorized.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use tracing::error;

use crate::output::export::CSV_FILE_NAME;
use crate::web::cookie::SessionId;
use crate::web::{api_error, AppState};

pub async fn download_csv(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Response {
    let Some(results) = state.sessions.get(&session_id.0).await.results else {
        return api_error(
            StatusCode::NOT_FOUND,
            "Nothing to download yet. Categorize the scraped titles first.",
        );
    };

    match results.to_csv() {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{CSV_FILE_NAME}\""),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "CSV export failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "CSV export failed")
        }
    }
}
