//! マスキング実行ボタンコンポーネント

use crate::api;
use crate::app::WorkflowSignal;
use crate::notify::BrowserNotifier;
use leptos::prelude::*;
use securmask_common::WorkflowPhase;

#[component]
pub fn MaskButton(workflow: WorkflowSignal) -> impl IntoView {
    let is_masking = move || workflow.get().phase() == WorkflowPhase::Masking;

    let on_click = move |_| {
        // 送信中はbegin_maskingがNoneを返すため二重送信にはならない
        let Some(request) = workflow
            .try_update(|w| w.begin_masking(&BrowserNotifier))
            .flatten()
        else {
            return;
        };
        let Some(file) = workflow.with(|w| w.file().cloned()) else {
            return;
        };

        leptos::task::spawn_local(async move {
            let result = api::mask_data(&file.handle, &file.name, &request.columns_json()).await;
            let url = workflow
                .try_update(|w| w.finish_masking(result, &BrowserNotifier))
                .flatten();
            if let Some(url) = url {
                api::navigate_to(&url);
            }
        });
    };

    view! {
        <button
            class="mask-button"
            disabled=is_masking
            on:click=on_click
        >
            {move || if is_masking() { "Masking..." } else { "Mask Data" }}
        </button>
    }
}
