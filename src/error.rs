use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecurMaskError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("カラムが存在しません: {0}")]
    UnknownColumn(String),

    #[error("サービス呼び出しエラー: {0}")]
    ServiceCall(String),

    #[error("ダウンロードエラー: {0}")]
    Download(String),

    #[error("対話入力エラー: {0}")]
    Dialog(#[from] dialoguer::Error),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SecurMaskError>;
