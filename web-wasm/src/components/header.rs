//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"SecurMask"</h1>
            <p>"Upload your file and securely mask sensitive data."</p>
        </header>
    }
}
