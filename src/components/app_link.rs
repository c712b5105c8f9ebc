//! In-app link that goes through the router instead of reloading the page

use leptos::prelude::*;

use crate::router::use_router;

#[component]
pub fn AppLink(
    #[prop(into)] href: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let target = href.clone();

    view! {
        <a
            href=href
            class=class
            on:click=move |ev| {
                ev.prevent_default();
                router.navigate(&target);
            }
        >
            {children()}
        </a>
    }
}
