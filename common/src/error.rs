//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// `Transport` はレスポンスを得られなかった通信レベルの失敗。
/// サーバがエラーを返したケース（アプリケーションレベルの失敗）は
/// エラー型ではなくレスポンスボディの `error` フィールドで表現される
#[derive(Error, Debug)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
