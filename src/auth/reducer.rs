use crate::store::Reducer;

use super::actions::AuthAction;
use super::state::{AuthState, Session};

/// Pure, total reducer for the auth slice.
///
/// The `session` field changes on exactly two kinds:
/// `AuthenticateSuccess` installs a session, `Logout` clears it. The
/// `message`/`loading` fields track request progress for UI display.
/// Everything else is identity on the input state.
pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthState;
    type Action = AuthAction;

    fn reduce(state: AuthState, action: AuthAction) -> AuthState {
        match action {
            AuthAction::LoginStart { .. } | AuthAction::SignupStart { .. } => AuthState {
                loading: true,
                message: None,
                ..state
            },
            AuthAction::AuthenticateSuccess {
                email,
                user_id,
                token,
                expires_at,
                ..
            } => AuthState {
                session: Some(Session {
                    email,
                    user_id,
                    token,
                    expires_at,
                }),
                message: None,
                loading: false,
            },
            AuthAction::AuthenticateFail { message } => AuthState {
                session: None,
                message: Some(message),
                loading: false,
            },
            AuthAction::Logout => AuthState {
                session: None,
                ..state
            },
            AuthAction::ClearMessage => AuthState {
                message: None,
                ..state
            },
            AuthAction::AutoLogin | AuthAction::Noop => state,
        }
    }
}
