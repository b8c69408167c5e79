//! Session-lifecycle effect runner.
//!
//! Observes the store's dispatched action stream and performs the async
//! work reducers must not: identity-provider calls, session persistence,
//! expiry scheduling, navigation requests. Each triggering action
//! produces exactly one follow-up dispatch; no failure escapes the
//! runner.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::sync::mpsc;

use crate::app::{AppAction, AppReducer};
use crate::store::Store;

use super::actions::AuthAction;
use super::identity::{AuthResponseData, IdentityProvider};
use super::persistence::SessionStore;
use super::secret::SecretString;
use super::state::Session;
use super::timer::SessionTimer;

/// Navigation targets the core can request. Routing itself lives in the
/// embedding shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Default view after an interactive login.
    Home,
    /// Login view after logout or expiry.
    Login,
}

/// Seam to the embedding shell's router.
pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, route: Route);
}

enum AuthCall {
    Login,
    Signup,
}

/// Runs session-lifecycle side effects off the store's action stream.
///
/// Constructed once at process start; `run()` is spawned onto the
/// runtime and lives until the store is dropped. Actions are handled
/// strictly in dispatch order, each to completion (including its
/// follow-up dispatch) before the next is considered.
pub struct AuthEffects<P: IdentityProvider> {
    store: Store<AppReducer>,
    actions: mpsc::UnboundedReceiver<AppAction>,
    provider: P,
    sessions: Arc<dyn SessionStore>,
    timer: SessionTimer,
    navigator: Arc<dyn Navigator>,
}

impl<P: IdentityProvider> AuthEffects<P> {
    /// Attach a runner to `store`'s action stream.
    pub fn new(
        store: &Store<AppReducer>,
        provider: P,
        sessions: Arc<dyn SessionStore>,
        timer: SessionTimer,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            store: store.clone(),
            actions: store.action_stream(),
            provider,
            sessions,
            timer,
            navigator,
        }
    }

    /// Process actions until the store (and with it the action stream)
    /// is dropped.
    pub async fn run(mut self) {
        while let Some(action) = self.actions.recv().await {
            let AppAction::Auth(action) = action else {
                continue;
            };
            match action {
                AuthAction::LoginStart { email, password } => {
                    self.authenticate(AuthCall::Login, email, password).await;
                }
                AuthAction::SignupStart { email, password } => {
                    self.authenticate(AuthCall::Signup, email, password).await;
                }
                AuthAction::AutoLogin => self.auto_login(),
                AuthAction::AuthenticateSuccess { redirect, .. } => {
                    if redirect {
                        self.navigator.navigate(Route::Home);
                    }
                }
                AuthAction::Logout => self.logout(),
                AuthAction::AuthenticateFail { .. }
                | AuthAction::ClearMessage
                | AuthAction::Noop => {}
            }
        }
    }

    async fn authenticate(&self, call: AuthCall, email: String, password: SecretString) {
        let result = match call {
            AuthCall::Login => self.provider.sign_in(&email, &password).await,
            AuthCall::Signup => self.provider.sign_up(&email, &password).await,
        };
        match result {
            Ok(data) => self.install_session(data),
            Err(error) => {
                tracing::info!(email = %email, %error, "authentication failed");
                self.dispatch(AuthAction::AuthenticateFail {
                    message: error.user_message(),
                });
            }
        }
    }

    /// Persist the fresh session, arm expiry, dispatch the success
    /// follow-up. `expires_at` is computed from "now", so the installed
    /// session is never already expired.
    fn install_session(&self, data: AuthResponseData) {
        let session = Session {
            email: data.email,
            user_id: data.user_id,
            token: data.token,
            expires_at: SystemTime::now() + data.expires_in,
        };

        if let Err(error) = self.sessions.save(&session) {
            // Persistence is best-effort: the in-memory session stands,
            // only auto-resume after restart is lost.
            tracing::warn!(%error, "failed to persist session");
        }
        self.arm_expiry(data.expires_in);

        tracing::info!(email = %session.email, "session established");
        self.dispatch(AuthAction::AuthenticateSuccess {
            email: session.email,
            user_id: session.user_id,
            token: session.token,
            expires_at: session.expires_at,
            redirect: true,
        });
    }

    fn auto_login(&self) {
        let Some(session) = self.sessions.load() else {
            tracing::debug!("no persisted session to resume");
            self.dispatch(AuthAction::Noop);
            return;
        };
        if session.token.is_empty() {
            self.dispatch(AuthAction::Noop);
            return;
        }
        match session.remaining() {
            Some(remaining) => {
                self.arm_expiry(remaining);
                tracing::info!(email = %session.email, "resumed persisted session");
                self.dispatch(AuthAction::AuthenticateSuccess {
                    email: session.email,
                    user_id: session.user_id,
                    token: session.token,
                    expires_at: session.expires_at,
                    redirect: false,
                });
            }
            None => {
                // Expired on disk: do not authenticate, do not
                // re-persist.
                tracing::debug!(email = %session.email, "persisted session already expired");
                self.dispatch(AuthAction::Noop);
            }
        }
    }

    fn logout(&self) {
        self.timer.cancel();
        if let Err(error) = self.sessions.clear() {
            tracing::warn!(%error, "failed to clear persisted session");
        }
        self.navigator.navigate(Route::Login);
    }

    fn arm_expiry(&self, duration: Duration) {
        let store = self.store.clone();
        self.timer.schedule(duration, move || {
            tracing::info!("session expired, logging out");
            store.dispatch(AppAction::Auth(AuthAction::Logout));
        });
    }

    fn dispatch(&self, action: AuthAction) {
        self.store.dispatch(AppAction::Auth(action));
    }
}
