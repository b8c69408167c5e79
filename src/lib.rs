//! Client-resident state-management core for a recipe-book shell.
//!
//! Unidirectional data flow: UI or startup code dispatches an
//! [`app::AppAction`] into the [`store::Store`]; the reducer computes
//! the next state synchronously and subscribers are notified; the
//! [`auth::AuthEffects`] runner observes the same action stream,
//! performs async work (identity-provider calls, session persistence,
//! expiry scheduling) and dispatches follow-up actions.
//!
//! The crate is an embedded library core: no CLI, no rendering, no
//! routing. Navigation and durable storage are seams
//! ([`auth::Navigator`], [`auth::SessionStore`]) the embedding shell
//! implements per target.

pub mod app;
pub mod auth;
pub mod shopping_list;
pub mod store;
