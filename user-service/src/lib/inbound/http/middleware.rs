use auth::GateRejection;
use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated account in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that admits requests carrying a valid access token.
///
/// Rejected requests never reach the wrapped handler. The client only learns
/// whether the header was missing; the precise token failure is logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let identity = {
        let authorization = match req.headers().get(AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| {
                reject(GateRejection::Unauthorized(TokenError::MalformedToken(
                    "authorization header is not visible ASCII".to_string(),
                )))
            })?),
            None => None,
        };

        state.authenticator.admit(authorization).map_err(reject)?
    };

    let user_id = UserId::from_string(&identity.subject).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not an account id");
        ApiError::Unauthorized("Invalid token".to_string()).into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn reject(rejection: GateRejection) -> Response {
    match rejection.reason() {
        Some(reason) => tracing::warn!(reason = %reason, "Rejected access token"),
        None => tracing::debug!("Request without credentials"),
    }

    ApiError::Unauthorized(rejection.to_string()).into_response()
}
