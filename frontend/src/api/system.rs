use bugboard_shared::HealthStatus;
use bugboard_shared::protocol::Endpoint;

use super::{ApiClient, Body, Transport};
use crate::error::ApiResult;
use crate::web::KeyValueStore;

/// `GET /health`
pub async fn health<T: Transport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
) -> ApiResult<HealthStatus> {
    api.call(Endpoint::Health, &[], Body::Empty).await
}
