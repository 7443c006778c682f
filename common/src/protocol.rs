//! SecurMaskサービスのワイヤプロトコル
//!
//! `POST /detect_columns` と `POST /mask_data` のレスポンス型、
//! およびマスク済みファイルのダウンロードURL解決

use serde::{Deserialize, Serialize};

/// サービスの既定ベースアドレス
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5000";

/// カラム検出エンドポイントのパス
pub const DETECT_COLUMNS_PATH: &str = "/detect_columns";

/// マスキングエンドポイントのパス
pub const MASK_DATA_PATH: &str = "/mask_data";

/// `detect_columns` のレスポンスボディ
///
/// 成功時は `columns`、失敗時は `error` のどちらか一方だけが入る
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectColumnsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `mask_data` のレスポンスボディ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaskDataResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// マスク済みファイルのサーバ相対パス（成功時）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `mask_data` のHTTPステータスとボディの組
#[derive(Debug, Clone)]
pub struct MaskReply {
    /// HTTPステータスが2xxだったか
    pub http_ok: bool,
    pub body: MaskDataResponse,
}

impl MaskReply {
    /// 成功判定。HTTP成功かつ `file_path` ありの厳格版
    pub fn is_success(&self) -> bool {
        self.http_ok && self.body.file_path.is_some()
    }
}

/// サーバ相対パスをサービスのベースアドレスに対して解決する
///
/// `resolve_download_url("http://localhost:5000", "/downloads/x.csv")`
/// -> `"http://localhost:5000/downloads/x.csv"`
pub fn resolve_download_url(base: &str, file_path: &str) -> String {
    let base = base.trim_end_matches('/');
    if file_path.starts_with('/') {
        format!("{}{}", base, file_path)
    } else {
        format!("{}/{}", base, file_path)
    }
}
