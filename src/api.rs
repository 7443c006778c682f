//! SecurMaskサービスへのHTTPクライアント
//!
//! 2つのエンドポイント（/detect_columns, /mask_data）への
//! multipart POSTと、マスク済みファイルの取得

use crate::error::{Result, SecurMaskError};
use reqwest::multipart::{Form, Part};
use securmask_common::protocol::{DETECT_COLUMNS_PATH, MASK_DATA_PATH};
use securmask_common::{DetectColumnsResponse, MaskDataResponse, MaskReply};
use std::path::Path;

pub struct ServiceClient {
    base_url: String,
    http: reqwest::Client,
}

impl ServiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// カラム検出。multipartフィールド: file
    pub async fn detect_columns(&self, file: &Path) -> Result<DetectColumnsResponse> {
        let form = Form::new().part("file", file_part(file).await?);
        let response = self
            .http
            .post(format!("{}{}", self.base_url, DETECT_COLUMNS_PATH))
            .multipart(form)
            .send()
            .await?;

        Ok(response.json::<DetectColumnsResponse>().await?)
    }

    /// マスキング依頼。multipartフィールド: file, columns（JSON配列文字列）
    pub async fn mask_data(&self, file: &Path, columns_json: &str) -> Result<MaskReply> {
        let form = Form::new()
            .part("file", file_part(file).await?)
            .text("columns", columns_json.to_string());
        let response = self
            .http
            .post(format!("{}{}", self.base_url, MASK_DATA_PATH))
            .multipart(form)
            .send()
            .await?;

        let http_ok = response.status().is_success();
        let body = response.json::<MaskDataResponse>().await?;
        Ok(MaskReply { http_ok, body })
    }

    /// マスク済みファイルを取得して書き出す
    pub async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(SecurMaskError::Download(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        tokio::fs::write(dest, &bytes).await?;
        Ok(())
    }
}

async fn file_part(path: &Path) -> Result<Part> {
    let file_name = file_name_of(path);
    let bytes = tokio::fs::read(path).await?;
    Ok(Part::bytes(bytes).file_name(file_name))
}

/// multipartに載せるファイル名。非UTF-8パスはフォールバック
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.csv")
        .to_string()
}
