// Credential lookup for authenticated uploads. The token comes from
// `GISTER_GITHUB_TOKEN` or, failing that, from `~/.gist`; both hold
// `username:token`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;

use crate::error::GistError;

/// Environment variable checked before the dotfile.
pub const TOKEN_ENV: &str = "GISTER_GITHUB_TOKEN";

/// Name of the fallback file in the user's home directory.
pub const TOKEN_FILE: &str = ".gist";

/// Basic-auth pair sent with every non-anonymous request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub secret: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl FromStr for Credential {
    type Err = GistError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = raw.split(':').collect();
        match parts.as_slice() {
            [username, secret] => Ok(Credential {
                username: username.to_string(),
                secret: secret.to_string(),
            }),
            _ => Err(GistError::Config(
                "token must be in form 'username:token'".into(),
            )),
        }
    }
}

impl Credential {
    /// Resolve the credential from the process environment and the home
    /// directory.
    pub fn load() -> Result<Self, GistError> {
        let env_value = std::env::var(TOKEN_ENV).ok();
        let dotfile = dirs::home_dir().map(|home| home.join(TOKEN_FILE));
        Self::resolve(env_value, dotfile.as_deref())
    }

    /// A non-empty `env_value` takes precedence; otherwise the trimmed
    /// contents of `dotfile` are parsed.
    pub fn resolve(env_value: Option<String>, dotfile: Option<&Path>) -> Result<Self, GistError> {
        if let Some(token) = env_value.filter(|v| !v.is_empty()) {
            debug!("using token from {TOKEN_ENV}");
            return token.parse();
        }

        let path = dotfile.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(TOKEN_FILE));
        debug!("reading token from {}", path.display());
        let raw = std::fs::read_to_string(&path).map_err(|e| {
            GistError::Config(format!("reading token file {}: {e}", path.display()))
        })?;
        raw.trim().parse()
    }
}
