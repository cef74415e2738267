//! # Client configuration — `jobmatch.toml`
//!
//! The web binary embeds a TOML file that tunes where the API lives and how the
//! client behaves. Every field has a default, so a missing or empty file is the
//! same as the default configuration.
//!
//! ```toml
//! [api]
//! base_url = ""                 # empty = same origin as the page
//!
//! [session]
//! persistence = "mirrored"      # or "remember-me"
//!
//! [ui]
//! toast_ms = 3000
//! redirect_delay_ms = 1000
//! session_expired_redirect_ms = 1500
//!
//! [limits]
//! min_chat_chars = 50
//! min_password_len = 8
//! max_photo_bytes = 5242880
//! photo_size = 300
//! ```

use serde::{Deserialize, Serialize};

use crate::session::PersistencePolicy;

/// Top-level configuration stored in `jobmatch.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub limits: Limits,
}

/// Where requests go.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin prefixed to every endpoint path. Empty means the page origin.
    #[serde(default)]
    pub base_url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub persistence: PersistencePolicy,
}

/// Timings for transient notices and delayed navigation, in milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u32,
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u32,
    #[serde(default = "default_session_expired_redirect_ms")]
    pub session_expired_redirect_ms: u32,
}

fn default_toast_ms() -> u32 {
    3000
}

fn default_redirect_delay_ms() -> u32 {
    1000
}

fn default_session_expired_redirect_ms() -> u32 {
    1500
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_ms: default_toast_ms(),
            redirect_delay_ms: default_redirect_delay_ms(),
            session_expired_redirect_ms: default_session_expired_redirect_ms(),
        }
    }
}

/// Local validation thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    #[serde(default = "default_min_chat_chars")]
    pub min_chat_chars: usize,
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
    #[serde(default = "default_max_photo_bytes")]
    pub max_photo_bytes: u64,
    /// Side length in pixels of the cropped profile photo.
    #[serde(default = "default_photo_size")]
    pub photo_size: u32,
}

fn default_min_chat_chars() -> usize {
    50
}

fn default_min_password_len() -> usize {
    8
}

fn default_max_photo_bytes() -> u64 {
    5 * 1024 * 1024
}

fn default_photo_size() -> u32 {
    300
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_chat_chars: default_min_chat_chars(),
            min_password_len: default_min_password_len(),
            max_photo_bytes: default_max_photo_bytes(),
            photo_size: default_photo_size(),
        }
    }
}

impl ClientConfig {
    /// Builder method to point the client at another API origin.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "jobmatch.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Parse from TOML, logging and falling back to defaults on error.
    pub fn from_toml_or_default(s: &str) -> Self {
        Self::from_toml(s).unwrap_or_else(|e| {
            tracing::warn!("Invalid {}: {}", Self::filename(), e);
            Self::default()
        })
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
