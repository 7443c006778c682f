//! メインアプリケーションコンポーネント

use crate::components::{
    column_list::ColumnList, header::Header, mask_button::MaskButton,
    masking_spinner::MaskingSpinner, upload_area::UploadArea,
};
use leptos::prelude::*;
use securmask_common::{MaskingWorkflow, WorkflowPhase, DEFAULT_SERVICE_URL};

/// ワークフロー状態のシグナル型
///
/// 状態はAppコンポーネントが所有し、各コンポーネントへ渡す
/// （暗黙のグローバルにはしない）
pub type WorkflowSignal = RwSignal<MaskingWorkflow<Vec<u8>>>;

#[component]
pub fn App() -> impl IntoView {
    let workflow: WorkflowSignal = RwSignal::new(MaskingWorkflow::new(DEFAULT_SERVICE_URL));

    let phase = move || workflow.get().phase();

    view! {
        <div class="container">
            <Header />

            <div class="upload-section">
                <UploadArea workflow=workflow />
            </div>

            <Show when=move || phase() != WorkflowPhase::Idle>
                <ColumnList workflow=workflow />
            </Show>

            <Show when=move || !workflow.get().selection().is_empty()>
                <MaskButton workflow=workflow />
            </Show>

            <Show when=move || phase() == WorkflowPhase::Masking>
                <MaskingSpinner />
            </Show>

            <div class="footer">
                <p>"© 2024 SecurMask. All rights reserved."</p>
            </div>
        </div>
    }
}
