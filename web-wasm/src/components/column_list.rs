//! カラム選択コンポーネント
//!
//! 検出カラムごとのチェックボックスと「すべて選択」トグル

use crate::app::WorkflowSignal;
use leptos::prelude::*;

#[component]
pub fn ColumnList(workflow: WorkflowSignal) -> impl IntoView {
    view! {
        <div class="checkbox-list">
            <h3>"Select columns to mask:"</h3>

            <div class="checkbox-item select-all">
                <input
                    type="checkbox"
                    id="select-all"
                    prop:checked=move || workflow.get().all_selected()
                    on:change=move |_| workflow.update(|w| w.toggle_select_all())
                />
                <label for="select-all">"Select all"</label>
            </div>

            <For
                each=move || workflow.get().columns().to_vec()
                key=|column| column.clone()
                children=move |column: String| {
                    let checked = {
                        let name = column.clone();
                        move || workflow.get().is_selected(&name)
                    };
                    let on_change = {
                        let name = column.clone();
                        move |_| workflow.update(|w| w.toggle_column(&name))
                    };
                    view! {
                        <div class="checkbox-item">
                            <input
                                type="checkbox"
                                id=column.clone()
                                prop:checked=checked
                                on:change=on_change
                            />
                            <label for=column.clone()>{column.clone()}</label>
                        </div>
                    }
                }
            />
        </div>
    }
}
