//! Credential file loading.
//!
//! Credentials live in a one-line file holding `username:password`, by
//! default `~/.credentials`. Callers use them to authenticate against the
//! services whose logs they feed into a machine.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default credentials filename in the home directory
pub const CREDENTIALS_FILE: &str = ".credentials";

/// Errors that can occur while loading credentials
#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("no home directory to look for the credentials file in")]
    NoHomeDirectory,

    #[error("failed to read credentials from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("credentials in {origin} must be a single 'username:password' pair")]
    Malformed { origin: String },
}

/// A username and password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Load credentials from `path`, or from `~/.credentials` when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, CredentialsError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path().ok_or(CredentialsError::NoHomeDirectory)?,
        };

        let content = fs::read_to_string(&path).map_err(|source| CredentialsError::Io {
            path: path.clone(),
            source,
        })?;

        Self::parse_from(&content, &path.display().to_string())
    }

    /// Parse `username:password` content.
    ///
    /// Surrounding whitespace is ignored. Exactly one colon is required.
    ///
    /// ```rust
    /// use linestate::credentials::Credentials;
    ///
    /// let creds = Credentials::parse("alice:s3cret\n").unwrap();
    /// assert_eq!(creds.username(), "alice");
    /// assert_eq!(creds.password(), "s3cret");
    /// assert!(Credentials::parse("a:b:c").is_err());
    /// ```
    pub fn parse(content: &str) -> Result<Self, CredentialsError> {
        Self::parse_from(content, "input")
    }

    /// `~/.credentials`, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CREDENTIALS_FILE))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    fn parse_from(content: &str, origin: &str) -> Result<Self, CredentialsError> {
        let mut fields = content.trim().split(':');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(username), Some(password), None) => Ok(Self {
                username: username.to_string(),
                password: password.to_string(),
            }),
            _ => Err(CredentialsError::Malformed {
                origin: origin.to_string(),
            }),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
