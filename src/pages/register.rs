//! Registration Page

use farm_core::api::RegisterRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::AppLink;
use crate::context::{use_auth, use_toast};
use crate::forms::optional_text;
use crate::router::use_router;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Default)]
struct RegisterFields {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    password: String,
    confirm: String,
    county: String,
    sub_county: String,
}

impl RegisterFields {
    fn to_request(&self) -> Result<RegisterRequest, String> {
        let first_name = optional_text(&self.first_name).ok_or("First name is required")?;
        let last_name = optional_text(&self.last_name).ok_or("Last name is required")?;
        let phone = optional_text(&self.phone).ok_or("Phone number is required")?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(format!("Password must be at least {} characters", MIN_PASSWORD_LEN));
        }
        if self.password != self.confirm {
            return Err("Passwords do not match".to_string());
        }
        Ok(RegisterRequest {
            first_name,
            last_name,
            email: optional_text(&self.email),
            phone,
            password: self.password.clone(),
            county: optional_text(&self.county),
            sub_county: optional_text(&self.sub_county),
        })
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let toast = use_toast();

    let fields = RwSignal::new(RegisterFields::default());
    let error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match fields.with(RegisterFields::to_request) {
            Ok(request) => request,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        error.set(None);
        submitting.set(true);
        spawn_local(async move {
            match auth.register(request).await {
                Ok(redirect) => {
                    toast.success("Account created. Welcome to Farm Mall!");
                    router.navigate(redirect.path());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    // One text input bound to one field
    let input = move |label: &'static str, kind: &'static str, get: fn(&RegisterFields) -> &String, set: fn(&mut RegisterFields, String)| {
        view! {
            <label class="form-label">
                {label}
                <input
                    type=kind
                    class="form-input"
                    prop:value=move || fields.with(|f| get(f).clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        fields.update(|f| set(f, value));
                    }
                />
            </label>
        }
    };

    view! {
        <div class="auth-page">
            <div class="card auth-card wide">
                <h1>"Create your account"</h1>
                <form class="form" on:submit=submit>
                    <div class="form-row">
                        {input("First name", "text", |f| &f.first_name, |f, v| f.first_name = v)}
                        {input("Last name", "text", |f| &f.last_name, |f, v| f.last_name = v)}
                    </div>
                    <div class="form-row">
                        {input("Phone number", "tel", |f| &f.phone, |f, v| f.phone = v)}
                        {input("Email (optional)", "email", |f| &f.email, |f, v| f.email = v)}
                    </div>
                    <div class="form-row">
                        {input("County", "text", |f| &f.county, |f, v| f.county = v)}
                        {input("Sub-county", "text", |f| &f.sub_county, |f, v| f.sub_county = v)}
                    </div>
                    <div class="form-row">
                        {input("Password", "password", |f| &f.password, |f, v| f.password = v)}
                        {input("Confirm password", "password", |f| &f.confirm, |f, v| f.confirm = v)}
                    </div>
                    {move || error.get().map(|e| view! { <p class="form-error" role="alert">{e}</p> })}
                    <button type="submit" class="btn btn-primary btn-block" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Creating account..." } else { "Create account" }}
                    </button>
                </form>
                <div class="auth-links">
                    <span>"Already registered? " <AppLink href="/auth/login">"Log in"</AppLink></span>
                </div>
            </div>
        </div>
    }
}
