//! SecurMask CLIクライアント
//!
//! 共有ワークフロー（securmask-common）をreqwestの
//! multipart呼び出しで駆動する端末フロントエンド

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod notify;
