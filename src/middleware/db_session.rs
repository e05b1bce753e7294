use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{api::AppState, db::DbSession, error::AppResult};

use super::request_id::RequestId;

/// Checks a connection out of the pool for the duration of the request
///
/// The session options are applied before the handler runs and the handler
/// reaches the connection through `Extension<DbSession>`. The connection is
/// returned to the pool when the request, and with it the extension, is
/// dropped, on success and failure alike.
pub async fn db_session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.to_string())
        .unwrap_or_default();

    let session = DbSession::open(&state.pool, &state.session)
        .await
        .inspect_err(|e| {
            tracing::error!(request_id = %request_id, error = %e, "Failed to open database session");
        })?;

    request.extensions_mut().insert(session);

    let response = next.run(request).await;

    tracing::debug!(request_id = %request_id, "Database session released");

    Ok(response)
}
