//! Subcommand implementations and the session plumbing they share.

pub mod account;
pub mod admin;
pub mod session_file;
pub mod shop;

use std::io::{self, BufRead, Write};

use rowing_shop_storefront::config::get_optional_env;
use rowing_shop_storefront::{ApiError, AppState, ClientConfig, ConfigError};
use secrecy::SecretString;
use thiserror::Error;

use self::session_file::{SessionFile, SessionFileError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The shop API refused or failed the operation.
    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The session file could not be read or written.
    #[error(transparent)]
    SessionFile(#[from] SessionFileError),

    /// Reading input failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The checkout details file is not valid JSON for a checkout form.
    #[error("Invalid checkout details: {0}")]
    Details(#[from] serde_json::Error),

    /// A requested quantity exceeds what is in stock.
    #[error("Cannot order {requested} of {product}: {available} available")]
    Quantity {
        product: String,
        requested: u32,
        available: u32,
    },
}

/// Result type alias for commands.
pub type Result<T> = std::result::Result<T, CliError>;

/// Application state plus the file its tokens are kept in between runs.
pub struct Shell {
    pub state: AppState,
    session_file: SessionFile,
}

impl Shell {
    /// Load configuration, then resume the stored session if there is one.
    ///
    /// A stored session that can no longer be resumed is dropped with a
    /// warning; the command then runs signed out.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the session file
    /// can not be read.
    pub async fn start() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        let state = AppState::with_memory_session(config)?;
        let session_file = SessionFile::from_env();

        if let Some((access_token, refresh_token)) = session_file.load()? {
            match state
                .client()
                .restore_session(access_token, refresh_token)
                .await
            {
                Ok(user) => tracing::debug!(user_id = %user.id, "resumed stored session"),
                Err(e) => tracing::warn!("Stored session could not be resumed: {e}"),
            }
        }

        Ok(Self {
            state,
            session_file,
        })
    }

    /// Write the current tokens back, or remove the file when signed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file can not be written.
    pub fn finish(&self) -> Result<()> {
        self.session_file.save(&self.state.session().snapshot())?;
        Ok(())
    }
}

/// Read a password from `env_key`, or prompt for it on stdin.
///
/// # Errors
///
/// Returns an error if stdin can not be read.
#[allow(clippy::print_stderr)]
pub fn read_password(env_key: &str, prompt: &str) -> Result<SecretString> {
    if let Some(password) = get_optional_env(env_key) {
        return Ok(SecretString::from(password));
    }

    eprint!("{prompt}: ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(SecretString::from(line.trim_end_matches(['\r', '\n'])))
}
