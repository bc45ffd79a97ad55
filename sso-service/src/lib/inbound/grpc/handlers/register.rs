use std::sync::Arc;

use tonic::Status;

use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<S: AuthServicePort>(
    service: Arc<S>,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    let command = RegisterCommand::parse(request.email, request.password)?;

    let user_id = service.register_new_user(command).await?;

    Ok(RegisterResponse {
        user_id: user_id.value(),
    })
}
