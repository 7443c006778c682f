//! SecurMaskサービス連携（fetch + FormData）
//!
//! 2つのエンドポイント（/detect_columns, /mask_data）への
//! multipart POSTと、マスク済みファイルへの遷移

use js_sys::{Array, Uint8Array};
use securmask_common::protocol::{DETECT_COLUMNS_PATH, MASK_DATA_PATH};
use securmask_common::{DetectColumnsResponse, Error, MaskDataResponse, MaskReply};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, FormData, Request, RequestInit, RequestMode, Response};

/// サービスのベースアドレス
pub const SERVICE_BASE_URL: &str = securmask_common::DEFAULT_SERVICE_URL;

/// 読込済みファイルからmultipartボディを作る
fn form_with_file(bytes: &[u8], file_name: &str) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    let parts = Array::of1(&Uint8Array::from(bytes));
    let blob = Blob::new_with_u8_array_sequence(&parts)?;
    form.append_with_blob_and_filename("file", &blob, file_name)?;
    Ok(form)
}

/// fetch呼び出し（共通処理）。HTTPステータスの成否とJSONボディを返す
async fn post_form(url: &str, form: &FormData) -> Result<(bool, JsValue), JsValue> {
    let mut opts = RequestInit::new();
    opts.method("POST");
    opts.mode(RequestMode::Cors);
    opts.body(Some(form.as_ref()));

    let request = Request::new_with_str_and_init(url, &opts)?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let http_ok = resp.ok();
    let json = JsFuture::from(resp.json()?).await?;
    Ok((http_ok, json))
}

/// 通信レベルの失敗。コンソールへ診断を残して共通エラー型へ写す
fn transport(err: JsValue) -> Error {
    web_sys::console::error_1(&err);
    let detail = err.as_string().unwrap_or_else(|| format!("{:?}", err));
    Error::Transport(detail)
}

/// POST /detect_columns
pub async fn detect_columns(bytes: &[u8], file_name: &str) -> Result<DetectColumnsResponse, Error> {
    let form = form_with_file(bytes, file_name).map_err(transport)?;
    let url = format!("{}{}", SERVICE_BASE_URL, DETECT_COLUMNS_PATH);
    let (_, json) = post_form(&url, &form).await.map_err(transport)?;
    serde_wasm_bindgen::from_value(json).map_err(|e| Error::Transport(e.to_string()))
}

/// POST /mask_data。`columns_json` はJSONエンコード済みのカラム名配列
pub async fn mask_data(
    bytes: &[u8],
    file_name: &str,
    columns_json: &str,
) -> Result<MaskReply, Error> {
    let form = form_with_file(bytes, file_name).map_err(transport)?;
    form.append_with_str("columns", columns_json).map_err(transport)?;
    let url = format!("{}{}", SERVICE_BASE_URL, MASK_DATA_PATH);
    let (http_ok, json) = post_form(&url, &form).await.map_err(transport)?;
    let body: MaskDataResponse =
        serde_wasm_bindgen::from_value(json).map_err(|e| Error::Transport(e.to_string()))?;
    Ok(MaskReply { http_ok, body })
}

/// 解決済みURLへ遷移してダウンロードを開始する
pub fn navigate_to(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(url);
    }
}
