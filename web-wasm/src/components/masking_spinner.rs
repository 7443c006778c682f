//! マスキング進行中インジケータ

use leptos::prelude::*;

#[component]
pub fn MaskingSpinner() -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="spinner" />
            <p class="progress-text">"Masking data, please wait..."</p>
        </div>
    }
}
