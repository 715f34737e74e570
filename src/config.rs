use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::{fs::File, io::AsyncReadExt};

use crate::error::SessionError;

/// Where the binary looks for overrides. Defaults apply when it is absent.
pub const CONFIG_FILE: &str = "brmdoor.yaml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub host: String,
    pub port: u16,
    pub nick: String,
    pub user: String,
    pub real: String,
    pub channel: String,
    pub quit_message: String,
    pub max_nick_retries: u32,
    pub event_timeout_secs: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: "irc.freenode.net".to_owned(),
            port: 6667,
            nick: "brmdoor".to_owned(),
            user: "brmdoor".to_owned(),
            real: "brmlab door".to_owned(),
            channel: "#kvak".to_owned(),
            quit_message: String::new(),
            max_nick_retries: 8,
            event_timeout_secs: None,
        }
    }
}

impl SessionConfig {
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .await
            .map_err(|e| SessionError::Config(format!("{}: {e}", path.display())))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .await
            .map_err(|e| SessionError::Config(format!("{}: {e}", path.display())))?;

        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, SessionError> {
        // an empty document means "all defaults"
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents).map_err(|e| SessionError::Config(e.to_string()))
    }

    /// Loads `path` if it exists, otherwise falls back to the built-in defaults.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let exists = tokio::fs::try_exists(path)
            .await
            .map_err(|e| SessionError::Config(format!("{}: {e}", path.display())))?;

        if exists {
            Self::from_file(path).await
        } else {
            Ok(Self::default())
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn event_timeout(&self) -> Option<Duration> {
        self.event_timeout_secs.map(Duration::from_secs)
    }
}
