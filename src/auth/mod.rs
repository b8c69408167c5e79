//! Auth slice: session state, reducer, and the effect runner driving
//! the session lifecycle (login, signup, auto-resume, expiry, logout).

mod actions;
mod effects;
mod identity;
mod persistence;
mod reducer;
mod secret;
mod state;
mod timer;

pub use actions::AuthAction;
pub use effects::{AuthEffects, Navigator, Route};
pub use identity::{
    AuthResponseData, IdentityClient, IdentityError, IdentityProvider, GENERIC_AUTH_ERROR,
};
pub use persistence::{FileSessionStore, MemorySessionStore, PersistError, SessionStore};
pub use reducer::AuthReducer;
pub use secret::SecretString;
pub use state::{AuthState, Session};
pub use timer::SessionTimer;
