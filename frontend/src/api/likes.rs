use bugboard_shared::protocol::Endpoint;
use bugboard_shared::{Ack, ToggleLikeRequest};

use super::{ApiClient, Transport, json_body};
use crate::error::ApiResult;
use crate::web::KeyValueStore;

/// `POST /likes`，点赞与取消点赞是同一个开关
pub async fn toggle<T: Transport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    target: &ToggleLikeRequest,
) -> ApiResult<Ack> {
    let body = json_body(target)?;
    api.call(Endpoint::ToggleLike, &[], body).await
}
