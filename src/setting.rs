use crate::Result;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CARGO_PKG_VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

/// number of threads config
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Thread {
    /// number of http server threads
    pub http: usize,
}

/// network config
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Network {
    /// server bind host
    pub host: String,
    /// server bind port
    pub port: u16,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// auth config
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Auth {
    /// auth secret
    pub secret: String,

    /// jwt access token expiry in seconds
    pub access_token_expiry: usize,
}

impl Default for Auth {
    fn default() -> Self {
        Self {
            secret: "test".to_owned(),
            access_token_expiry: 2 * 24 * 60 * 60,
        }
    }
}

/// media host config
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Media {
    /// profile photo assigned to new accounts
    pub default_profile_photo: String,

    /// max urls accepted per attach call
    pub max_attachments: usize,
}

impl Default for Media {
    fn default() -> Self {
        Self {
            default_profile_photo: "https://media.givehub.local/defaults/avatar.webp".to_owned(),
            max_attachments: 10,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Setting {
    /// database url
    /// https://www.sea-ql.org/SeaORM/docs/install-and-config/connection/
    pub db_url: String,

    /// the site url
    pub site: Option<String>,

    pub thread: Thread,
    pub network: Network,

    pub auth: Auth,
    pub media: Media,
}

impl Default for Setting {
    fn default() -> Self {
        Self {
            db_url: "sqlite://givehub.sqlite".to_string(),
            site: None,
            thread: Default::default(),
            network: Default::default(),
            auth: Default::default(),
            media: Default::default(),
        }
    }
}

impl Setting {
    /// read config from file and env
    pub fn read<P: AsRef<Path>>(file: P, env_prefix: Option<String>) -> Result<Self> {
        let builder = Config::builder();
        let mut config = builder
            // Use serde default feature
            // override with file contents
            .add_source(File::with_name(file.as_ref().to_str().unwrap()));
        if let Some(prefix) = env_prefix {
            config = config.add_source(Self::env_source(&prefix));
        }

        let config = config.build()?;
        let setting: Setting = config.try_deserialize()?;
        Ok(setting)
    }

    fn env_source(prefix: &str) -> Environment {
        Environment::with_prefix(prefix)
            .try_parsing(true)
            .prefix_separator("_")
            .separator("__")
    }

    /// read config from env
    pub fn from_env(env_prefix: String) -> Result<Self> {
        let mut config = Config::builder();
        config = config.add_source(Self::env_source(&env_prefix));

        let config = config.build()?;
        let setting: Setting = config.try_deserialize()?;
        Ok(setting)
    }

    /// config from str
    pub fn from_str(s: &str, format: FileFormat) -> Result<Self> {
        let builder = Config::builder();
        let config = builder.add_source(File::from_str(s, format)).build()?;
        let setting: Setting = config.try_deserialize()?;
        Ok(setting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use config::FileFormat;
    use std::fs;
    use tempfile::Builder;

    #[test]
    fn der() -> Result<()> {
        let json = r#"{
            "db_url": "sqlite::memory:",
            "network": {"port": 1},
            "thread": {"http": 1}
        }"#;

        let mut def = Setting::default();
        def.db_url = "sqlite::memory:".to_owned();
        def.network.port = 1;
        def.thread.http = 1;

        let s2 = serde_json::from_str::<Setting>(json)?;
        let s1: Setting = Setting::from_str(json, FileFormat::Json)?;

        assert_eq!(def, s1);
        assert_eq!(def, s2);

        Ok(())
    }

    #[test]
    fn read() -> Result<()> {
        let setting = Setting::default();
        assert_eq!(setting.network.host, "127.0.0.1");

        let file = Builder::new()
            .prefix("givehub-config-test-read")
            .suffix(".toml")
            .rand_bytes(0)
            .tempfile()?;

        let setting = Setting::read(&file, None)?;
        assert_eq!(setting.network.host, "127.0.0.1");
        fs::write(
            &file,
            r#"
        [network]
        host = "127.0.0.2"
        "#,
        )?;

        temp_env::with_vars(
            [
                ("GH_network.port", Some("1")),
                ("GH_network__host", Some("127.0.0.3")),
            ],
            || {
                let setting = Setting::read(&file, Some("GH".to_owned())).unwrap();
                assert_eq!(setting.network.host, "127.0.0.3".to_string());
                assert_eq!(setting.network.port, 1);
            },
        );
        Ok(())
    }
}
