//! Navigation Bar Component

use leptos::prelude::*;

use super::AppLink;
use crate::context::{use_auth, use_toast};
use crate::router::use_router;
use crate::store::{store_reset, use_app_store};

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let store = use_app_store();
    let toast = use_toast();

    let logout = move |_| {
        let redirect = auth.logout();
        store_reset(&store);
        toast.info("You have been logged out");
        router.navigate(redirect.path());
    };

    view! {
        <nav class="nav-bar">
            <AppLink href="/" class="brand">"🥔 Farm Mall"</AppLink>
            <div class="nav-links">
                <AppLink href="/calculators">"Calculators"</AppLink>
                <Show
                    when=move || auth.is_authenticated()
                    fallback=|| view! {
                        <AppLink href="/auth/login">"Log in"</AppLink>
                        <AppLink href="/auth/register" class="btn btn-primary">"Get started"</AppLink>
                    }
                >
                    <AppLink href="/dashboard">"Dashboard"</AppLink>
                    <AppLink href="/dashboard/collaborators">"Team"</AppLink>
                    <Show when=move || auth.is_admin()>
                        <AppLink href="/admin">"Admin"</AppLink>
                    </Show>
                    <span class="nav-user">
                        {move || auth.user.get().map(|user| user.display_name()).unwrap_or_default()}
                    </span>
                    <button type="button" class="btn btn-link" on:click=logout>"Log out"</button>
                </Show>
            </div>
        </nav>
    }
}
