//! 认证接口：`POST /auth/signup`、`POST /auth/login`

use bugboard_shared::protocol::Endpoint;
use bugboard_shared::{AuthResponse, LoginRequest, SignupRequest};

use super::{ApiClient, Transport, json_body};
use crate::error::ApiResult;
use crate::web::KeyValueStore;

pub async fn signup<T: Transport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    name: &str,
    email: &str,
    password: &str,
) -> ApiResult<AuthResponse> {
    let body = json_body(&SignupRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })?;
    api.call(Endpoint::Signup, &[], body).await
}

pub async fn login<T: Transport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    email: &str,
    password: &str,
) -> ApiResult<AuthResponse> {
    let body = json_body(&LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    })?;
    api.call(Endpoint::Login, &[], body).await
}
