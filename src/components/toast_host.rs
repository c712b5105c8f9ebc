//! Toast Host Component
//!
//! Fixed corner stack; click a toast to dismiss it early.

use leptos::prelude::*;

use crate::context::{use_toast, Toast};

#[component]
pub fn ToastHost() -> impl IntoView {
    let toast = use_toast();

    view! {
        <div class="toast-host">
            <For
                each=move || toast.toasts.get()
                key=|item| item.id
                children=move |item: Toast| {
                    let id = item.id;
                    view! {
                        <div class=item.kind.class() on:click=move |_| toast.dismiss(id)>
                            {item.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
