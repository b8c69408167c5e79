use std::time::SystemTime;

use super::secret::SecretString;

/// Events accepted by the auth slice and observed by its effect runner.
#[derive(Debug, Clone)]
pub enum AuthAction {
    /// Start a password login against the identity provider.
    LoginStart {
        email: String,
        password: SecretString,
    },
    /// Start account creation against the identity provider.
    SignupStart {
        email: String,
        password: SecretString,
    },
    /// Resume a persisted session on process start.
    AutoLogin,
    /// Install a session. `redirect` distinguishes interactive logins
    /// (navigate to the default view) from silent auto-resume.
    AuthenticateSuccess {
        email: String,
        user_id: String,
        token: String,
        expires_at: SystemTime,
        redirect: bool,
    },
    /// Login or signup failed; `message` is the user-visible explanation.
    AuthenticateFail { message: String },
    /// Drop the session. The effect runner also stops the expiry timer
    /// and clears persisted state.
    Logout,
    /// Clear the surfaced failure message.
    ClearMessage,
    /// Follow-up for effects with nothing to report, e.g. auto-login
    /// finding no resumable session.
    Noop,
}
