//! Login Page
//!
//! Rejections (bad credentials, too many attempts) render inline under the
//! form.

use farm_core::Redirect;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::AppLink;
use crate::context::{use_auth, use_toast};
use crate::router::use_router;

/// Only same-site paths are followed after login
fn safe_redirect(target: Option<String>) -> Option<String> {
    target.filter(|path| path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/auth/"))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let toast = use_toast();

    let identifier = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        submitting.set(true);
        let (id, pw) = (identifier.get(), password.get());
        spawn_local(async move {
            match auth.login(id, pw).await {
                Ok(redirect) => {
                    let welcome = auth.user.get_untracked().map(|u| u.display_name()).unwrap_or_default();
                    toast.success(format!("Welcome back, {}", welcome));
                    let target = match redirect {
                        Redirect::Dashboard => safe_redirect(router.query_param("redirect"))
                            .unwrap_or_else(|| redirect.path().to_string()),
                        _ => redirect.path().to_string(),
                    };
                    router.navigate(&target);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="card auth-card">
                <h1>"Welcome back"</h1>
                <p class="muted">"Log in with your email address or phone number."</p>
                <form class="form" on:submit=submit>
                    <label class="form-label">
                        "Email or phone"
                        <input type="text" class="form-input" autocomplete="username"
                            prop:value=move || identifier.get()
                            on:input=move |ev| identifier.set(event_target_value(&ev)) />
                    </label>
                    <label class="form-label">
                        "Password"
                        <input type="password" class="form-input" autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev)) />
                    </label>
                    {move || error.get().map(|e| view! { <p class="form-error" role="alert">{e}</p> })}
                    <button type="submit" class="btn btn-primary btn-block" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Logging in..." } else { "Log in" }}
                    </button>
                </form>
                <div class="auth-links">
                    <AppLink href="/auth/forgot-password">"Forgot password?"</AppLink>
                    <span>"New to Farm Mall? " <AppLink href="/auth/register">"Create an account"</AppLink></span>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_redirect() {
        assert_eq!(safe_redirect(Some("/dashboard/cycles/1".to_string())).as_deref(), Some("/dashboard/cycles/1"));
        assert_eq!(safe_redirect(Some("//evil.example".to_string())), None);
        assert_eq!(safe_redirect(Some("https://evil.example".to_string())), None);
        assert_eq!(safe_redirect(Some("/auth/login".to_string())), None);
        assert_eq!(safe_redirect(None), None);
    }
}
