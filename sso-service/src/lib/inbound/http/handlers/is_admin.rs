use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn is_admin<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    Path(user_id): Path<i64>,
) -> Result<ApiSuccess<IsAdminResponseData>, ApiError> {
    let user_id = UserId::new(user_id)?;

    state
        .auth_service
        .is_admin(user_id)
        .await
        .map_err(ApiError::from)
        .map(|is_admin| ApiSuccess::new(StatusCode::OK, IsAdminResponseData { is_admin }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IsAdminResponseData {
    pub is_admin: bool,
}
