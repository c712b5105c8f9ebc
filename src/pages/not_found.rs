use leptos::prelude::*;

use crate::components::AppLink;

#[component]
pub fn NotFoundPage(#[prop(into)] path: String) -> impl IntoView {
    view! {
        <section class="card not-found">
            <h1>"Page not found"</h1>
            <p class="muted">{format!("Nothing lives at {}", path)}</p>
            <AppLink href="/" class="btn btn-primary">"Back home"</AppLink>
        </section>
    }
}
