//! 缺陷报告接口：`/bugs`

use bugboard_shared::protocol::Endpoint;
use bugboard_shared::{Ack, BugEnvelope, BugList, ListBugsParams, UpdateBugRequest};

use super::{ApiClient, Body, Multipart, Transport, json_body};
use crate::error::ApiResult;
use crate::web::KeyValueStore;

/// `GET /bugs?topic=&q=&limit=`
pub async fn list<T: Transport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    params: &ListBugsParams,
) -> ApiResult<BugList> {
    api.call(Endpoint::ListBugs, &params.query_pairs(), Body::Empty)
        .await
}

/// `GET /bugs/{id}`
pub async fn get<T: Transport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    bug_id: &str,
) -> ApiResult<BugEnvelope> {
    api.call(Endpoint::GetBug(bug_id.to_string()), &[], Body::Empty)
        .await
}

/// `POST /bugs`，multipart 表单（title, description, topic, severity, attachments）
pub async fn create<T: Transport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    form: Multipart<T::Upload>,
) -> ApiResult<BugEnvelope> {
    api.call(Endpoint::CreateBug, &[], Body::Multipart(form))
        .await
}

/// `PUT /bugs/{id}`，部分更新
pub async fn update<T: Transport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    bug_id: &str,
    changes: &UpdateBugRequest,
) -> ApiResult<BugEnvelope> {
    let body = json_body(changes)?;
    api.call(Endpoint::UpdateBug(bug_id.to_string()), &[], body)
        .await
}

/// `DELETE /bugs/{id}`
pub async fn delete<T: Transport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    bug_id: &str,
) -> ApiResult<Ack> {
    api.call(Endpoint::DeleteBug(bug_id.to_string()), &[], Body::Empty)
        .await
}
