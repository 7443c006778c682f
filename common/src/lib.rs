//! SecurMask Common Library
//!
//! CLIとWeb(WASM)で共有されるワークフロー状態機械とワイヤプロトコル

pub mod error;
pub mod notify;
pub mod protocol;
pub mod workflow;

pub use error::{Error, Result};
pub use notify::{NoticeKind, Notifier};
pub use protocol::{
    resolve_download_url, DetectColumnsResponse, MaskDataResponse, MaskReply, DEFAULT_SERVICE_URL,
};
pub use workflow::{MaskRequest, MaskingWorkflow, SelectedFile, WorkflowPhase};
