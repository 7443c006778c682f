//! 端末向けNotifier実装

use dialoguer::Confirm;
use securmask_common::{NoticeKind, Notifier};

/// ダイアログ相当の通知を端末出力で提示するNotifier
pub struct TerminalNotifier {
    /// trueなら確認プロンプトを出さず承諾（--yes）
    assume_yes: bool,
}

impl TerminalNotifier {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, kind: NoticeKind, _title: &str, message: &str) {
        match kind {
            NoticeKind::Success => println!("✔ {}", message),
            NoticeKind::Warning => println!("⚠ {}", message),
            NoticeKind::Error => eprintln!("❌ {}", message),
        }
    }

    fn confirm(&self, _title: &str, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        Confirm::new()
            .with_prompt(message)
            .default(true)
            .interact()
            .unwrap_or(false)
    }
}
