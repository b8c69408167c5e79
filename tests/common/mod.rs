//! Shared fakes and harness for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::sleep;

use larder::app::{AppReducer, AppState};
use larder::auth::{
    AuthEffects, AuthResponseData, IdentityError, IdentityProvider, MemorySessionStore, Navigator,
    Route, SecretString, SessionTimer,
};
use larder::store::Store;

/// Initialize tracing output for a test run; safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Reply every identity call gets from [`FakeIdentity`].
#[derive(Clone)]
pub enum ScriptedReply {
    Success {
        user_id: String,
        token: String,
        expires_in: Duration,
    },
    ProviderError(&'static str),
}

/// Scripted identity provider: answers any call with the configured
/// reply, echoing the requested email back like the real provider.
pub struct FakeIdentity {
    reply: ScriptedReply,
    pub calls: Mutex<Vec<String>>,
}

impl FakeIdentity {
    pub fn new(reply: ScriptedReply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn answer(&self, email: &str) -> Result<AuthResponseData, IdentityError> {
        self.calls.lock().push(email.to_string());
        match &self.reply {
            ScriptedReply::Success {
                user_id,
                token,
                expires_in,
            } => Ok(AuthResponseData {
                email: email.to_string(),
                user_id: user_id.clone(),
                token: token.clone(),
                expires_in: *expires_in,
            }),
            ScriptedReply::ProviderError(code) => Err(IdentityError::Provider {
                code: (*code).to_string(),
            }),
        }
    }
}

impl IdentityProvider for FakeIdentity {
    async fn sign_up(
        &self,
        email: &str,
        _password: &SecretString,
    ) -> Result<AuthResponseData, IdentityError> {
        self.answer(email)
    }

    async fn sign_in(
        &self,
        email: &str,
        _password: &SecretString,
    ) -> Result<AuthResponseData, IdentityError> {
        self.answer(email)
    }
}

/// Records every navigation request.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().push(route);
    }
}

/// A store wired to a spawned effect runner over in-process fakes.
pub struct Harness {
    pub store: Store<AppReducer>,
    pub sessions: Arc<MemorySessionStore>,
    pub timer: SessionTimer,
    pub navigator: Arc<RecordingNavigator>,
}

/// Build the store, fakes, and effect runner, and spawn the runner.
pub fn spawn_effects(reply: ScriptedReply) -> Harness {
    init_tracing();

    let store = Store::<AppReducer>::new();
    let sessions = Arc::new(MemorySessionStore::new());
    let timer = SessionTimer::new();
    let navigator = Arc::new(RecordingNavigator::default());

    let effects = AuthEffects::new(
        &store,
        FakeIdentity::new(reply),
        sessions.clone(),
        timer.clone(),
        navigator.clone(),
    );
    tokio::spawn(effects.run());

    Harness {
        store,
        sessions,
        timer,
        navigator,
    }
}

/// Poll `condition` on the store state until it holds, or panic after
/// two seconds.
pub async fn wait_for_state(store: &Store<AppReducer>, condition: impl Fn(&AppState) -> bool) {
    for _ in 0..200 {
        if condition(&store.state()) {
            return;
        }
        sleep(Duration::from_millis(10)).await;
    }
    panic!("store never reached the expected state");
}

/// Give the spawned effect runner a chance to drain already-dispatched
/// actions.
pub async fn settle() {
    sleep(Duration::from_millis(50)).await;
}
