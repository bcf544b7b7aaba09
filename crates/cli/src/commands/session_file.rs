//! Token persistence between CLI runs.
//!
//! Only the two tokens are stored; the profile is fetched again on start so a
//! stale or revoked session is noticed straight away.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rowing_shop_storefront::Session;
use rowing_shop_storefront::config::get_env_or_default;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session file used when `ROWING_SHOP_SESSION_FILE` is not set.
pub const DEFAULT_SESSION_FILE: &str = ".rowing-shop-session.json";

/// Errors reading or writing the session file.
#[derive(Debug, Error)]
pub enum SessionFileError {
    #[error("Session file {0}: {1}")]
    Io(PathBuf, #[source] io::Error),

    #[error("Session file {0} is corrupt: {1}")]
    Corrupt(PathBuf, #[source] serde_json::Error),
}

#[derive(Serialize, Deserialize)]
struct StoredTokens {
    access_token: String,
    refresh_token: String,
}

/// A JSON file holding the access and refresh tokens.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file named by `ROWING_SHOP_SESSION_FILE`, or the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(get_env_or_default(
            "ROWING_SHOP_SESSION_FILE",
            DEFAULT_SESSION_FILE,
        ))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored `(access, refresh)` tokens, or `None` if there is no file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but can not be read or parsed.
    pub fn load(&self) -> Result<Option<(SecretString, SecretString)>, SessionFileError> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionFileError::Io(self.path.clone(), e)),
        };
        let tokens: StoredTokens = serde_json::from_slice(&contents)
            .map_err(|e| SessionFileError::Corrupt(self.path.clone(), e))?;

        Ok(Some((
            SecretString::from(tokens.access_token),
            SecretString::from(tokens.refresh_token),
        )))
    }

    /// Store the session's tokens, or delete the file if it has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can not be written or removed.
    pub fn save(&self, session: &Session) -> Result<(), SessionFileError> {
        let (Some(access_token), Some(refresh_token)) =
            (&session.access_token, &session.refresh_token)
        else {
            return self.remove();
        };

        let tokens = StoredTokens {
            access_token: access_token.expose_secret().to_owned(),
            refresh_token: refresh_token.expose_secret().to_owned(),
        };
        let json = serde_json::to_vec_pretty(&tokens)
            .map_err(|e| SessionFileError::Corrupt(self.path.clone(), e))?;
        write_private(&self.path, &json).map_err(|e| SessionFileError::Io(self.path.clone(), e))
    }

    fn remove(&self) -> Result<(), SessionFileError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => {
                Err(SessionFileError::Io(self.path.clone(), e))
            }
            _ => Ok(()),
        }
    }
}

/// Write `contents`, readable by the owner only where the platform allows.
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?;
        file.write_all(contents)
    }
    #[cfg(not(unix))]
    {
        fs::write(path, contents)
    }
}
