//! ブラウザダイアログによるNotifier実装

use securmask_common::{NoticeKind, Notifier};

/// alert/confirmで通知するNotifier
#[derive(Clone, Copy, Default)]
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn notify(&self, kind: NoticeKind, title: &str, message: &str) {
        if kind == NoticeKind::Error {
            web_sys::console::error_1(&format!("{}: {}", title, message).into());
        }
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn confirm(&self, _title: &str, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
