//! Application Context
//!
//! Session and toast state provided via Leptos Context API.

use std::rc::Rc;

use farm_core::api::{ApiClient, RegisterRequest};
use farm_core::domain::{Farm, User};
use farm_core::session::RestoreOutcome;
use farm_core::{AuthSession, Redirect, SessionResult};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser::{app_config, BrowserTokenStore};
use crate::commands;

pub type Session = AuthSession<ApiClient, BrowserTokenStore>;

const TOAST_MS: u32 = 4_000;

/// Signed-in user and farm, mirrored from the session into signals
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: StoredValue<Rc<Session>, LocalStorage>,
    pub user: RwSignal<Option<User>>,
    pub farm: RwSignal<Option<Farm>>,
    /// False until the startup restore has finished
    pub ready: RwSignal<bool>,
}

impl AuthContext {
    pub fn new() -> Self {
        let config = app_config();
        let session = Session::new(commands::auth_client(), BrowserTokenStore::from_config(config), config);
        Self {
            session: StoredValue::new_local(Rc::new(session)),
            user: RwSignal::new(None),
            farm: RwSignal::new(None),
            ready: RwSignal::new(false),
        }
    }

    fn session(&self) -> Rc<Session> {
        self.session.get_value()
    }

    fn sync(&self, session: &Session) {
        self.user.set(session.user());
        self.farm.set(session.farm());
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.with(Option::is_some)
    }

    pub fn is_admin(&self) -> bool {
        self.user.with(|user| user.as_ref().is_some_and(User::is_admin))
    }

    pub fn farm_id(&self) -> Option<String> {
        self.farm.with(|farm| farm.as_ref().map(|f| f.id.clone()))
    }

    pub async fn login(&self, identifier: String, password: String) -> SessionResult<Redirect> {
        let session = self.session();
        let result = session.login(&identifier, &password).await;
        self.sync(&session);
        result
    }

    pub async fn register(&self, request: RegisterRequest) -> SessionResult<Redirect> {
        let session = self.session();
        let result = session.register(&request).await;
        self.sync(&session);
        result
    }

    pub fn logout(&self) -> Redirect {
        let session = self.session();
        let redirect = session.logout();
        self.sync(&session);
        redirect
    }

    pub async fn restore(&self) -> RestoreOutcome {
        let session = self.session();
        let outcome = session.restore().await;
        self.sync(&session);
        self.ready.set(true);
        outcome
    }

    pub fn adopt_url_token(&self, token: &str) {
        self.session().adopt_url_token(token);
    }

    pub async fn refresh_farm(&self) -> SessionResult<Farm> {
        let session = self.session();
        let result = session.refresh_farm().await;
        self.sync(&session);
        result
    }

    /// Cache a farm the user just created or edited
    pub fn set_farm(&self, farm: Farm) {
        self.session().set_farm(Some(farm.clone()));
        self.farm.set(Some(farm));
    }
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Queue of transient notifications, each removed after a few seconds
#[derive(Clone, Copy)]
pub struct ToastContext {
    pub toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u32>,
}

impl ToastContext {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id.wrapping_add(1));
        self.toasts.update(|toasts| {
            toasts.push(Toast {
                id,
                kind,
                message: message.into(),
            })
        });

        let toasts = self.toasts;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MS).await;
            toasts.update(|list| list.retain(|toast| toast.id != id));
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn dismiss(&self, id: u32) {
        self.toasts.update(|list| list.retain(|toast| toast.id != id));
    }
}

pub fn use_toast() -> ToastContext {
    expect_context::<ToastContext>()
}
