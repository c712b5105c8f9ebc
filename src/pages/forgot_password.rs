//! Forgot Password Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::AppLink;
use crate::forms::optional_text;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let sent = RwSignal::new(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(address) = optional_text(&email.get()).filter(|e| e.contains('@')) else {
            error.set(Some("Enter the email address on your account".to_string()));
            return;
        };
        error.set(None);
        spawn_local(async move {
            match commands::forgot_password(&address).await {
                Ok(()) => sent.set(true),
                Err(e) => error.set(Some(e)),
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="card auth-card">
                <h1>"Reset your password"</h1>
                <Show
                    when=move || !sent.get()
                    fallback=|| view! {
                        <p class="notice">"If that address is registered, a reset link is on its way."</p>
                    }
                >
                    <form class="form" on:submit=submit>
                        <label class="form-label">
                            "Email"
                            <input type="email" class="form-input"
                                prop:value=move || email.get()
                                on:input=move |ev| email.set(event_target_value(&ev)) />
                        </label>
                        {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
                        <button type="submit" class="btn btn-primary btn-block">"Send reset link"</button>
                    </form>
                </Show>
                <div class="auth-links">
                    <AppLink href="/auth/login">"Back to login"</AppLink>
                </div>
            </div>
        </div>
    }
}
