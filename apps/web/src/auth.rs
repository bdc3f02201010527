use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use crate::errors::AppError;
use crate::models::User;
use crate::state::AppState;

/// The authenticated user making the request.
///
/// Authentication happens upstream; the proxy forwards the user id in the
/// header named by `Config::user_header`. A missing, malformed or unknown id
/// rejects the request with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let Some(raw) = parts
            .headers
            .get(state.config.user_header.as_str())
            .and_then(|value| value.to_str().ok())
        else {
            return Err(AppError::Unauthorized);
        };

        let Ok(user_id) = raw.trim().parse::<i64>() else {
            debug!("Rejecting malformed user id header: {raw:?}");
            return Err(AppError::Unauthorized);
        };

        state
            .store
            .find_user(user_id)
            .await?
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}
