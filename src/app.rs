//! Farm Mall Frontend App
//!
//! Provides the contexts, runs the startup sequence and renders the page
//! for the current route.

use farm_core::session::{take_query_param, RestoreOutcome};
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::browser::{self, app_config};
use crate::commands;
use crate::components::{NavBar, ToastHost};
use crate::context::{AuthContext, ToastContext};
use crate::pages::{
    AdminPage, CollaboratorsPage, CycleDetailPage, DashboardCalculatorsPage, DashboardPage, ForgotPasswordPage,
    LandingPage, LoginPage, NotFoundPage, PublicCalculatorsPage, RegisterPage,
};
use crate::router::{Route, RouterContext};
use crate::store::AppStateStoreFields;
use crate::store::AppState;

/// Persist a `?token=` hand-off and strip it from the address bar
fn adopt_token_from_url(auth: &AuthContext) {
    let (token, rest) = take_query_param(&browser::current_search(), "token");
    if let Some(token) = token {
        auth.adopt_url_token(&token);
        browser::replace_state(&format!("{}{}", browser::current_path(), rest));
    }
}

#[component]
pub fn App() -> impl IntoView {
    let auth = AuthContext::new();
    let toast = ToastContext::new();
    let store = Store::new(AppState::default());
    provide_context(auth);
    provide_context(toast);
    provide_context(store);

    // Must run before the router applies the gate to the first path
    adopt_token_from_url(&auth);
    let router = RouterContext::new();
    provide_context(router);

    // The app never unmounts, so the listener is never removed
    _ = window_event_listener(leptos::ev::popstate, move |_| router.sync_from_location());

    spawn_local(async move {
        match auth.restore().await {
            RestoreOutcome::Restored(user) => tracing::info!(user = %user.id, "welcome back"),
            RestoreOutcome::Expired => {
                toast.error("Your session has expired. Please log in again.");
                router.navigate(&app_config().login_path);
            }
            RestoreOutcome::Anonymous => tracing::debug!("no stored session"),
        }
    });

    // Reference data for forms and the admin page
    Effect::new(move |_| {
        if !auth.is_authenticated() {
            return;
        }
        spawn_local(async move {
            match commands::list_crop_varieties().await {
                Ok(varieties) => store.crop_varieties().set(varieties),
                Err(e) => tracing::warn!(error = %e, "crop varieties unavailable, using built-in list"),
            }
        });
    });

    let needs_session = move || router.route.with(|route| route.is_dashboard() || *route == Route::Admin);

    view! {
        <NavBar />
        <main class=move || if needs_session() { "page app-page" } else { "page" }>
            {move || {
                if needs_session() && !auth.ready.get() {
                    return view! { <p class="muted">"Loading your farm..."</p> }.into_any();
                }
                match router.route.get() {
                    Route::Landing => view! { <LandingPage /> }.into_any(),
                    Route::Login => view! { <LoginPage /> }.into_any(),
                    Route::Register => view! { <RegisterPage /> }.into_any(),
                    Route::ForgotPassword => view! { <ForgotPasswordPage /> }.into_any(),
                    Route::Dashboard => view! { <DashboardPage /> }.into_any(),
                    Route::CycleDetail(id) => view! { <CycleDetailPage id=id /> }.into_any(),
                    Route::Collaborators => view! { <CollaboratorsPage /> }.into_any(),
                    Route::DashboardCalculators => view! { <DashboardCalculatorsPage /> }.into_any(),
                    Route::PublicCalculators => view! { <PublicCalculatorsPage /> }.into_any(),
                    Route::Admin => view! { <AdminPage /> }.into_any(),
                    Route::NotFound(path) => view! { <NotFoundPage path=path /> }.into_any(),
                }
            }}
        </main>
        <ToastHost />
    }
}
