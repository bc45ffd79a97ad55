use std::sync::Arc;

use tonic::Status;

use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<S: AuthServicePort>(
    service: Arc<S>,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    let command = LoginCommand::parse(request.email, request.password, request.app_id)?;

    let token = service.login(command).await?;

    Ok(LoginResponse {
        token: token.into_inner(),
    })
}
