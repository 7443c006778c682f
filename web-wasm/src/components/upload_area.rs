//! ファイルアップロードコンポーネント
//!
//! ファイル選択時にFileReaderでバイト列へ読み込み、カラム検出を実行する

use crate::api;
use crate::app::WorkflowSignal;
use crate::notify::BrowserNotifier;
use js_sys::Uint8Array;
use leptos::prelude::*;
use securmask_common::SelectedFile;
use wasm_bindgen::prelude::*;
use web_sys::{Event, File, FileReader, HtmlInputElement};

#[component]
pub fn UploadArea(workflow: WorkflowSignal) -> impl IntoView {
    let on_change = move |ev: Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            read_file(file, workflow);
        }
    };

    view! {
        <input type="file" accept=".csv, .xlsx" on:change=on_change />
    }
}

/// ファイルをバイト列へ読み込んでから検出リクエストを投げる
fn read_file(file: File, workflow: WorkflowSignal) {
    let file_name = file.name();
    let Ok(reader) = FileReader::new() else {
        return;
    };

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        if let Ok(result) = reader_clone.result() {
            let bytes = Uint8Array::new(&result).to_vec();
            let selected = SelectedFile {
                handle: bytes,
                name: file_name.clone(),
            };
            detect(selected, workflow);
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    let _ = reader.read_as_array_buffer(&file);
}

fn detect(file: SelectedFile<Vec<u8>>, workflow: WorkflowSignal) {
    leptos::task::spawn_local(async move {
        let result = api::detect_columns(&file.handle, &file.name).await;
        // 連続アップロード時は後着のレスポンスが状態を上書きする
        workflow.update(move |w| w.apply_detection(file, result, &BrowserNotifier));
    });
}
