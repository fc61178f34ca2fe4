//! 评论接口：`/comments`

use bugboard_shared::protocol::Endpoint;
use bugboard_shared::{Ack, CommentEnvelope, NewComment};

use super::{ApiClient, Body, Transport, json_body};
use crate::error::ApiResult;
use crate::web::KeyValueStore;

/// `POST /comments/{bug_id}`
pub async fn add<T: Transport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    bug_id: &str,
    comment: &NewComment,
) -> ApiResult<CommentEnvelope> {
    let body = json_body(comment)?;
    api.call(Endpoint::AddComment(bug_id.to_string()), &[], body)
        .await
}

/// `DELETE /comments/{comment_id}`
pub async fn delete<T: Transport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    comment_id: &str,
) -> ApiResult<Ack> {
    api.call(
        Endpoint::DeleteComment(comment_id.to_string()),
        &[],
        Body::Empty,
    )
    .await
}
