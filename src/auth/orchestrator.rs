//! Login decision flow
//!
//! Decides, once per run, whether to log in anonymously, with a remembered
//! token, with a QR code, with the password given on the command line, or
//! after prompting for one.

use tracing::{debug, info};

use crate::app::models::CredentialInput;
use crate::app::store::AccountSettings;
use crate::auth::prompt::PasswordPrompt;
use crate::errors::{AuthError, AuthResult};

/// How the session will authenticate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// No username: anonymous login, public content only
    AnonymousAllowed,
    /// Out-of-band QR code login
    QrRequested,
    /// Username and password both supplied
    PasswordSupplied,
    /// Remembered refresh token will be used
    TokenPresent,
    /// Password must be entered interactively
    InteractivePasswordRequired,
}

impl AuthState {
    /// Evaluate the login path for the given input and token store
    pub fn evaluate(input: &CredentialInput, accounts: &AccountSettings) -> Self {
        if input.use_qr {
            return AuthState::QrRequested;
        }

        match (&input.username, &input.password) {
            (None, _) => AuthState::AnonymousAllowed,
            (Some(_), Some(_)) => AuthState::PasswordSupplied,
            (Some(username), None) => {
                if input.remember_password && accounts.has_login_token(username) {
                    AuthState::TokenPresent
                } else {
                    AuthState::InteractivePasswordRequired
                }
            }
        }
    }
}

/// Resolved login handed to the session initialiser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionLogin {
    pub username: Option<String>,
    pub password: Option<String>,
    /// Remembered refresh token, when one is used
    pub login_token: Option<String>,
    pub remember_password: bool,
    pub use_qr: bool,
    pub login_id: Option<u32>,
}

impl SessionLogin {
    pub fn is_anonymous(&self) -> bool {
        self.username.is_none() && !self.use_qr
    }
}

/// Run the decision flow, prompting through `prompt` when needed
pub fn resolve_login(
    input: &CredentialInput,
    accounts: &AccountSettings,
    login_id: Option<u32>,
    prompt: &mut dyn PasswordPrompt,
) -> AuthResult<(AuthState, SessionLogin)> {
    let state = AuthState::evaluate(input, accounts);
    debug!("Authentication state: {:?}", state);

    let mut login = SessionLogin {
        username: input.username.clone(),
        password: input.password.clone(),
        login_token: None,
        remember_password: input.remember_password,
        use_qr: input.use_qr,
        login_id,
    };

    match &state {
        AuthState::AnonymousAllowed => {
            println!("No username given. Using anonymous account with dedicated server subscription.");
            info!("Logging in anonymously; only public content is reachable");
        }
        AuthState::InteractivePasswordRequired => {
            let username = input.username.as_deref().unwrap_or_default();
            login.password = Some(prompt_until_entered(username, prompt)?);
        }
        AuthState::TokenPresent => {
            login.login_token = input
                .username
                .as_deref()
                .and_then(|username| accounts.login_token(username))
                .map(str::to_string);
        }
        AuthState::QrRequested | AuthState::PasswordSupplied => {}
    }

    Ok((state, login))
}

fn prompt_until_entered(username: &str, prompt: &mut dyn PasswordPrompt) -> AuthResult<String> {
    let message = format!("Enter account password for \"{}\": ", username);

    loop {
        match prompt.read_password(&message)? {
            Some(password) if !password.is_empty() => return Ok(password),
            Some(_) => debug!("Empty password entered, asking again"),
            None => {
                return Err(AuthError::PasswordUnavailable {
                    username: username.to_string(),
                })
            }
        }
    }
}
