//! マスキングワークフロー状態機械
//!
//! アップロード -> カラム選択 -> マスキング依頼 の一連の流れを管理する。
//! コントローラ自身は通信を行わない。フロントエンドがリクエストを
//! 送信し、結果を `apply_detection` / `finish_masking` で戻す

use crate::error::Error;
use crate::notify::{NoticeKind, Notifier};
use crate::protocol::{resolve_download_url, DetectColumnsResponse, MaskReply};

/// 検出失敗時の汎用メッセージ
const DETECT_FALLBACK: &str = "Error uploading file.";

/// マスキング失敗時の汎用メッセージ
const MASK_FALLBACK: &str = "Error masking data.";

/// カラム未選択時の警告メッセージ
const EMPTY_SELECTION_WARNING: &str = "Please select at least one column to mask.";

/// ワークフローの現在フェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowPhase {
    /// ファイル未アップロード
    #[default]
    Idle,
    /// カラム検出済み、選択待ち
    Uploaded,
    /// マスキングリクエスト送信中
    Masking,
}

/// ユーザが選択したファイル
///
/// `F` はフロントエンド固有のハンドル型
/// （CLIは`PathBuf`、WASMは読込済みバイト列）
#[derive(Debug, Clone)]
pub struct SelectedFile<F> {
    pub handle: F,
    pub name: String,
}

/// フロントエンドが送信すべきマスキングリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskRequest {
    /// マスク対象カラム（選択順）
    pub columns: Vec<String>,
}

impl MaskRequest {
    /// multipartの `columns` フィールド値（JSONエンコードされた文字列配列）
    pub fn columns_json(&self) -> String {
        serde_json::to_string(&self.columns).unwrap_or_else(|_| "[]".to_string())
    }
}

/// マスキングワークフローコントローラ
///
/// 不変条件: 選択中カラムは常に検出済みカラムの部分集合、
/// マスキング開始はUploadedフェーズからのみ、送信中の多重開始は不可
#[derive(Debug, Clone)]
pub struct MaskingWorkflow<F> {
    phase: WorkflowPhase,
    file: Option<SelectedFile<F>>,
    columns: Vec<String>,
    selection: Vec<String>,
    base_url: String,
}

impl<F> MaskingWorkflow<F> {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            phase: WorkflowPhase::Idle,
            file: None,
            columns: Vec::new(),
            selection: Vec::new(),
            base_url: base_url.into(),
        }
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn file(&self) -> Option<&SelectedFile<F>> {
        self.file.as_ref()
    }

    /// 検出済みカラム（サービスの返却順）
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// マスク対象として選択中のカラム（選択順）
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selection.iter().any(|c| c == name)
    }

    /// 全カラム選択済みか。「すべて選択」チェックボックスの表示状態
    pub fn all_selected(&self) -> bool {
        !self.columns.is_empty() && self.selection.len() == self.columns.len()
    }

    /// カラムの選択状態を反転する。ColumnListにない名前は無視
    pub fn toggle_column(&mut self, name: &str) {
        if !self.columns.iter().any(|c| c == name) {
            return;
        }
        if let Some(pos) = self.selection.iter().position(|c| c == name) {
            self.selection.remove(pos);
        } else {
            self.selection.push(name.to_string());
        }
    }

    /// 全選択 <-> 全解除
    pub fn toggle_select_all(&mut self) {
        if self.all_selected() {
            self.selection.clear();
        } else {
            self.selection = self.columns.clone();
        }
    }

    /// カラム検出リクエストの結果を反映する
    ///
    /// 成功時: ファイルとカラム一覧を差し替え、選択をクリアしてUploadedへ。
    /// 失敗時: 状態を破棄してIdleへ戻し、サーバのメッセージ
    /// （なければ汎用メッセージ）をエラー通知する
    pub fn apply_detection(
        &mut self,
        file: SelectedFile<F>,
        result: Result<DetectColumnsResponse, Error>,
        notifier: &dyn Notifier,
    ) {
        match result {
            Ok(DetectColumnsResponse {
                columns: Some(columns),
                ..
            }) => {
                notifier.notify(
                    NoticeKind::Success,
                    "Columns detected",
                    &format!("Detected columns: {}", columns.join(", ")),
                );
                self.file = Some(file);
                self.columns = columns;
                self.selection.clear();
                self.phase = WorkflowPhase::Uploaded;
            }
            Ok(DetectColumnsResponse { error, .. }) => {
                let message = error.unwrap_or_else(|| DETECT_FALLBACK.to_string());
                self.reset_to_idle();
                notifier.notify(NoticeKind::Error, "Upload failed", &message);
            }
            Err(_) => {
                self.reset_to_idle();
                notifier.notify(NoticeKind::Error, "Upload failed", DETECT_FALLBACK);
            }
        }
    }

    /// マスキングリクエストを開始する
    ///
    /// 選択が空なら警告だけ出してリクエストは作らない。
    /// 送信中（Masking）とアップロード前（Idle）は何もしない。
    /// 返したリクエストの結果は `finish_masking` で戻すこと
    pub fn begin_masking(&mut self, notifier: &dyn Notifier) -> Option<MaskRequest> {
        match self.phase {
            WorkflowPhase::Idle | WorkflowPhase::Masking => return None,
            WorkflowPhase::Uploaded => {}
        }
        if self.selection.is_empty() {
            notifier.notify(
                NoticeKind::Warning,
                "No columns selected",
                EMPTY_SELECTION_WARNING,
            );
            return None;
        }
        self.phase = WorkflowPhase::Masking;
        Some(MaskRequest {
            columns: self.selection.clone(),
        })
    }

    /// マスキングリクエストの完了を反映する
    ///
    /// 成否にかかわらずフェーズはUploadedへ戻る。
    /// 成功判定はHTTP成功かつ `file_path` ありの厳格版。
    /// 成功かつユーザが確認したときだけダウンロードURLを返す
    pub fn finish_masking(
        &mut self,
        result: Result<MaskReply, Error>,
        notifier: &dyn Notifier,
    ) -> Option<String> {
        self.phase = WorkflowPhase::Uploaded;
        match result {
            Ok(reply) if reply.is_success() => {
                let file_path = reply.body.file_path.unwrap_or_default();
                let url = resolve_download_url(&self.base_url, &file_path);
                notifier.notify(
                    NoticeKind::Success,
                    "Masking complete",
                    "Masked file is ready for download.",
                );
                if notifier.confirm("Masking complete", "Download the masked file now?") {
                    Some(url)
                } else {
                    None
                }
            }
            Ok(reply) => {
                let message = reply.body.error.unwrap_or_else(|| MASK_FALLBACK.to_string());
                notifier.notify(NoticeKind::Error, "Masking failed", &message);
                None
            }
            Err(_) => {
                notifier.notify(NoticeKind::Error, "Masking failed", MASK_FALLBACK);
                None
            }
        }
    }

    fn reset_to_idle(&mut self) {
        self.phase = WorkflowPhase::Idle;
        self.file = None;
        self.columns.clear();
        self.selection.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::MaskDataResponse;
    use std::cell::{Cell, RefCell};

    /// 通知を記録するテスト用Notifier
    struct RecordingNotifier {
        notices: RefCell<Vec<(NoticeKind, String)>>,
        confirms: Cell<usize>,
        confirm_answer: bool,
    }

    impl RecordingNotifier {
        fn accepting() -> Self {
            Self {
                notices: RefCell::new(Vec::new()),
                confirms: Cell::new(0),
                confirm_answer: true,
            }
        }

        fn declining() -> Self {
            Self {
                confirm_answer: false,
                ..Self::accepting()
            }
        }

        fn last(&self) -> (NoticeKind, String) {
            self.notices.borrow().last().cloned().expect("通知なし")
        }

        fn count(&self) -> usize {
            self.notices.borrow().len()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, kind: NoticeKind, _title: &str, message: &str) {
            self.notices.borrow_mut().push((kind, message.to_string()));
        }

        fn confirm(&self, _title: &str, _message: &str) -> bool {
            self.confirms.set(self.confirms.get() + 1);
            self.confirm_answer
        }
    }

    fn detect_ok(columns: &[&str]) -> Result<DetectColumnsResponse, Error> {
        Ok(DetectColumnsResponse {
            columns: Some(columns.iter().map(|c| c.to_string()).collect()),
            error: None,
        })
    }

    fn test_file() -> SelectedFile<&'static str> {
        SelectedFile {
            handle: "customers.csv",
            name: "customers.csv".to_string(),
        }
    }

    /// Uploadedフェーズまで進めたワークフローを作る
    fn uploaded(columns: &[&str]) -> MaskingWorkflow<&'static str> {
        let mut workflow = MaskingWorkflow::new("http://localhost:5000");
        let notifier = RecordingNotifier::accepting();
        workflow.apply_detection(test_file(), detect_ok(columns), &notifier);
        assert_eq!(workflow.phase(), WorkflowPhase::Uploaded);
        workflow
    }

    // =============================================
    // カラム検出
    // =============================================

    /// 検出成功でカラム一覧が入り、選択は空、フェーズはUploaded
    #[test]
    fn test_detection_success_populates_columns() {
        let mut workflow = MaskingWorkflow::new("http://localhost:5000");
        let notifier = RecordingNotifier::accepting();

        workflow.apply_detection(test_file(), detect_ok(&["a", "b", "c"]), &notifier);

        assert_eq!(workflow.columns(), &["a", "b", "c"]);
        assert!(workflow.selection().is_empty());
        assert_eq!(workflow.phase(), WorkflowPhase::Uploaded);
        assert_eq!(workflow.file().map(|f| f.name.as_str()), Some("customers.csv"));

        let (kind, message) = notifier.last();
        assert_eq!(kind, NoticeKind::Success);
        assert!(message.contains("a, b, c"));
    }

    /// 検出失敗（サーバエラー）はIdleのままでサーバのメッセージを通知
    #[test]
    fn test_detection_failure_surfaces_server_message() {
        let mut workflow = MaskingWorkflow::<&str>::new("http://localhost:5000");
        let notifier = RecordingNotifier::accepting();

        let result = Ok(DetectColumnsResponse {
            columns: None,
            error: Some("bad format".to_string()),
        });
        workflow.apply_detection(test_file(), result, &notifier);

        assert_eq!(workflow.phase(), WorkflowPhase::Idle);
        assert_eq!(notifier.last(), (NoticeKind::Error, "bad format".to_string()));
    }

    /// columnsもerrorもないボディは汎用メッセージ
    #[test]
    fn test_detection_missing_columns_uses_fallback() {
        let mut workflow = MaskingWorkflow::<&str>::new("http://localhost:5000");
        let notifier = RecordingNotifier::accepting();

        workflow.apply_detection(test_file(), Ok(DetectColumnsResponse::default()), &notifier);

        assert_eq!(workflow.phase(), WorkflowPhase::Idle);
        assert_eq!(
            notifier.last(),
            (NoticeKind::Error, "Error uploading file.".to_string())
        );
    }

    /// 通信エラーも汎用メッセージでIdleへ
    #[test]
    fn test_detection_transport_error_uses_fallback() {
        let mut workflow = MaskingWorkflow::<&str>::new("http://localhost:5000");
        let notifier = RecordingNotifier::accepting();

        workflow.apply_detection(
            test_file(),
            Err(Error::Transport("connection refused".to_string())),
            &notifier,
        );

        assert_eq!(workflow.phase(), WorkflowPhase::Idle);
        assert_eq!(
            notifier.last(),
            (NoticeKind::Error, "Error uploading file.".to_string())
        );
    }

    /// 再アップロードでカラム一覧が差し替わり選択はリセットされる
    #[test]
    fn test_redetection_replaces_columns_and_clears_selection() {
        let mut workflow = uploaded(&["a", "b"]);
        workflow.toggle_column("a");
        assert!(!workflow.selection().is_empty());

        let notifier = RecordingNotifier::accepting();
        workflow.apply_detection(test_file(), detect_ok(&["x", "y", "z"]), &notifier);

        assert_eq!(workflow.columns(), &["x", "y", "z"]);
        assert!(workflow.selection().is_empty());
        assert_eq!(workflow.phase(), WorkflowPhase::Uploaded);
    }

    // =============================================
    // カラム選択
    // =============================================

    /// 同じカラムを2回トグルすると元に戻る
    #[test]
    fn test_toggle_column_is_self_inverse() {
        let mut workflow = uploaded(&["name", "email"]);

        workflow.toggle_column("email");
        assert_eq!(workflow.selection(), &["email"]);

        workflow.toggle_column("email");
        assert!(workflow.selection().is_empty());
    }

    /// ColumnListにない名前のトグルは無視される
    #[test]
    fn test_toggle_unknown_column_is_ignored() {
        let mut workflow = uploaded(&["name", "email"]);
        workflow.toggle_column("ssn");
        assert!(workflow.selection().is_empty());
    }

    /// 選択順が保持される
    #[test]
    fn test_selection_preserves_toggle_order() {
        let mut workflow = uploaded(&["a", "b", "c"]);
        workflow.toggle_column("c");
        workflow.toggle_column("a");
        assert_eq!(workflow.selection(), &["c", "a"]);
    }

    /// 全選択トグル: 空 -> 全カラム -> 空
    #[test]
    fn test_select_all_roundtrip() {
        let mut workflow = uploaded(&["a", "b", "c"]);

        workflow.toggle_select_all();
        assert_eq!(workflow.selection(), &["a", "b", "c"]);
        assert!(workflow.all_selected());

        workflow.toggle_select_all();
        assert!(workflow.selection().is_empty());
        assert!(!workflow.all_selected());
    }

    /// 一部選択の状態から全選択トグルすると全カラムになる
    #[test]
    fn test_select_all_from_partial_selection() {
        let mut workflow = uploaded(&["a", "b", "c"]);
        workflow.toggle_column("b");

        workflow.toggle_select_all();
        assert_eq!(workflow.selection(), &["a", "b", "c"]);
    }

    // =============================================
    // マスキング開始
    // =============================================

    /// 選択中カラムが選択順のままリクエストに入る
    #[test]
    fn test_begin_masking_returns_selection_in_order() {
        let mut workflow = uploaded(&["a", "b", "c"]);
        workflow.toggle_column("b");
        workflow.toggle_column("a");

        let notifier = RecordingNotifier::accepting();
        let request = workflow.begin_masking(&notifier).expect("リクエストなし");

        assert_eq!(request.columns, &["b", "a"]);
        assert_eq!(request.columns_json(), r#"["b","a"]"#);
        assert_eq!(workflow.phase(), WorkflowPhase::Masking);
        assert_eq!(notifier.count(), 0);
    }

    /// 未選択なら警告だけでリクエストは作られない
    #[test]
    fn test_begin_masking_empty_selection_warns() {
        let mut workflow = uploaded(&["a", "b"]);
        let notifier = RecordingNotifier::accepting();

        assert!(workflow.begin_masking(&notifier).is_none());
        assert_eq!(workflow.phase(), WorkflowPhase::Uploaded);
        assert_eq!(
            notifier.last(),
            (
                NoticeKind::Warning,
                "Please select at least one column to mask.".to_string()
            )
        );
    }

    /// 送信中の再呼び出しは通知もリクエストもなしのno-op
    #[test]
    fn test_begin_masking_while_masking_is_noop() {
        let mut workflow = uploaded(&["a"]);
        workflow.toggle_column("a");

        let notifier = RecordingNotifier::accepting();
        assert!(workflow.begin_masking(&notifier).is_some());
        assert!(workflow.begin_masking(&notifier).is_none());
        assert_eq!(workflow.phase(), WorkflowPhase::Masking);
        assert_eq!(notifier.count(), 0);
    }

    /// アップロード前は開始できない
    #[test]
    fn test_begin_masking_before_upload_is_noop() {
        let mut workflow = MaskingWorkflow::<&str>::new("http://localhost:5000");
        let notifier = RecordingNotifier::accepting();
        assert!(workflow.begin_masking(&notifier).is_none());
        assert_eq!(notifier.count(), 0);
    }

    // =============================================
    // マスキング完了
    // =============================================

    fn masking(columns: &[&str]) -> MaskingWorkflow<&'static str> {
        let mut workflow = uploaded(columns);
        workflow.toggle_select_all();
        let notifier = RecordingNotifier::accepting();
        workflow.begin_masking(&notifier).expect("リクエストなし");
        workflow
    }

    fn mask_ok(file_path: &str) -> Result<MaskReply, Error> {
        Ok(MaskReply {
            http_ok: true,
            body: MaskDataResponse {
                message: Some("File processed successfully".to_string()),
                file_path: Some(file_path.to_string()),
                error: None,
            },
        })
    }

    /// 成功時はベースアドレスに対して解決したURLを返しUploadedへ戻る
    #[test]
    fn test_finish_masking_success_resolves_download_url() {
        let mut workflow = masking(&["a"]);
        let notifier = RecordingNotifier::accepting();

        let url = workflow.finish_masking(mask_ok("/downloads/x.csv"), &notifier);

        assert_eq!(url.as_deref(), Some("http://localhost:5000/downloads/x.csv"));
        assert_eq!(workflow.phase(), WorkflowPhase::Uploaded);
        assert_eq!(notifier.last().0, NoticeKind::Success);
        assert_eq!(notifier.confirms.get(), 1);
    }

    /// 確認ステップで拒否されたらダウンロードしない
    #[test]
    fn test_finish_masking_declined_confirmation_skips_download() {
        let mut workflow = masking(&["a"]);
        let notifier = RecordingNotifier::declining();

        let url = workflow.finish_masking(mask_ok("/downloads/x.csv"), &notifier);

        assert!(url.is_none());
        assert_eq!(workflow.phase(), WorkflowPhase::Uploaded);
    }

    /// HTTP失敗はfile_pathがあっても失敗。サーバのメッセージを通知
    #[test]
    fn test_finish_masking_http_failure_uses_server_message() {
        let mut workflow = masking(&["a"]);
        let notifier = RecordingNotifier::accepting();

        let result = Ok(MaskReply {
            http_ok: false,
            body: MaskDataResponse {
                error: Some("No file uploaded or columns selected for masking.".to_string()),
                ..Default::default()
            },
        });
        let url = workflow.finish_masking(result, &notifier);

        assert!(url.is_none());
        assert_eq!(workflow.phase(), WorkflowPhase::Uploaded);
        let (kind, message) = notifier.last();
        assert_eq!(kind, NoticeKind::Error);
        assert_eq!(message, "No file uploaded or columns selected for masking.");
    }

    /// file_path欠落は汎用メッセージで失敗
    #[test]
    fn test_finish_masking_missing_file_path_fails() {
        let mut workflow = masking(&["a"]);
        let notifier = RecordingNotifier::accepting();

        let result = Ok(MaskReply {
            http_ok: true,
            body: MaskDataResponse::default(),
        });
        let url = workflow.finish_masking(result, &notifier);

        assert!(url.is_none());
        assert_eq!(
            notifier.last(),
            (NoticeKind::Error, "Error masking data.".to_string())
        );
    }

    /// 通信エラーでもUploadedへ戻り再操作できる
    #[test]
    fn test_finish_masking_transport_error_returns_uploaded() {
        let mut workflow = masking(&["a"]);
        let notifier = RecordingNotifier::accepting();

        let url = workflow.finish_masking(
            Err(Error::Transport("timeout".to_string())),
            &notifier,
        );

        assert!(url.is_none());
        assert_eq!(workflow.phase(), WorkflowPhase::Uploaded);
        assert_eq!(
            notifier.last(),
            (NoticeKind::Error, "Error masking data.".to_string())
        );
    }
}
