//! 通知抽象
//!
//! ワークフローはUIツールキットを知らず、このトレイト経由で
//! ダイアログ相当の通知を出す。WASMはalert/confirm、CLIは端末出力で実装する

/// 通知種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// 通知の提示先
pub trait Notifier {
    /// ブロッキング通知を表示する
    fn notify(&self, kind: NoticeKind, title: &str, message: &str);

    /// 確認ステップ。デフォルト実装は常に承諾
    fn confirm(&self, _title: &str, _message: &str) -> bool {
        true
    }
}
