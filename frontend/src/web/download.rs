//! 附件下载
//!
//! 创建一个临时的 `<a download>` 元素并触发点击，随后立即移除。

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAnchorElement;

pub fn download(url: &str, filename: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("无法获取 document 对象"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document 没有 body"))?;

    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(url);
    link.set_download(filename);
    body.append_child(&link)?;
    link.click();
    body.remove_child(&link)?;
    Ok(())
}
