//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现 `Transport`，不依赖 `gloo-net`。

use async_trait::async_trait;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestInit, Response};

use crate::api::{Body, HttpRequest, HttpResponse, Multipart, Part, Transport};
use crate::error::{ApiError, ApiResult};

fn build_failed(context: &str, e: JsValue) -> ApiError {
    ApiError::Transport(format!("{}: {:?}", context, e))
}

fn form_data(form: &Multipart<web_sys::File>) -> Result<FormData, JsValue> {
    let data = FormData::new()?;
    for part in form.parts() {
        match part {
            Part::Text { name, value } => data.append_with_str(name, value)?,
            Part::File { name, file } => {
                data.append_with_blob_and_filename(name, file, &file.name())?
            }
        }
    }
    Ok(data)
}

/// 读取响应体文本
async fn read_text(response: &Response) -> ApiResult<String> {
    let promise = response
        .text()
        .map_err(|e| build_failed("读取响应体失败", e))?;
    let text = JsFuture::from(promise)
        .await
        .map_err(|e| build_failed("读取响应体失败", e))?;
    Ok(text.as_string().unwrap_or_default())
}

/// 基于浏览器 fetch 的传输层
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    type Upload = web_sys::File;

    async fn send(&self, req: HttpRequest<web_sys::File>) -> ApiResult<HttpResponse> {
        let headers = Headers::new().map_err(|e| build_failed("创建 Headers 失败", e))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| build_failed("设置 Header 失败", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        match &req.body {
            Body::Empty => {}
            Body::Json(json) => opts.set_body(&JsValue::from_str(json)),
            Body::Multipart(form) => {
                let data = form_data(form).map_err(|e| build_failed("构建表单失败", e))?;
                opts.set_body(&data.into());
            }
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| build_failed("构建请求失败", e))?;

        let window = web_sys::window()
            .ok_or_else(|| ApiError::Transport("无法获取 window 对象".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| build_failed("网络错误", e))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| build_failed("Response 类型转换失败", e))?;

        Ok(HttpResponse {
            status: response.status(),
            body: read_text(&response).await?,
        })
    }
}
