//! Layered settings loading
//!
//! Sources are applied in order, later ones winning:
//!
//! 1. Built-in defaults (the `Default` of the settings type)
//! 2. An optional TOML file
//! 3. Environment variables with the given prefix, `__` separating nested keys
//!    (`CONFIGBOT__INFERENCE__URL` sets `inference.url`)

use config::{Config, Environment, File, FileFormat};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::Result;

pub const ENV_SEPARATOR: &str = "__";

/// Where settings come from
#[derive(Debug, Clone)]
pub struct SettingsSource<'a> {
    pub file: Option<&'a Path>,
    pub env_prefix: &'a str,
    /// Keys whose environment value is a comma separated list
    pub list_keys: &'a [&'a str],
}

impl<'a> SettingsSource<'a> {
    pub fn new(env_prefix: &'a str) -> Self {
        Self {
            file: None,
            env_prefix,
            list_keys: &[],
        }
    }

    pub fn with_file(mut self, file: Option<&'a Path>) -> Self {
        self.file = file;
        self
    }

    pub fn with_list_keys(mut self, keys: &'a [&'a str]) -> Self {
        self.list_keys = keys;
        self
    }
}

/// Build settings of type `T` from defaults, file and environment
///
/// # Errors
///
/// `SettingsError` if the file is missing or malformed, or if the merged
/// sources do not deserialize into `T`.
pub fn load_settings<T>(source: &SettingsSource<'_>) -> Result<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    let defaults = Config::try_from(&T::default())?;
    let mut builder = Config::builder().add_source(defaults);

    if let Some(path) = source.file {
        debug!(path = %path.display(), "Loading settings file");
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
    }

    let mut env = Environment::with_prefix(source.env_prefix)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true);
    if !source.list_keys.is_empty() {
        env = env.list_separator(",");
        for key in source.list_keys {
            env = env.with_list_parse_key(key);
        }
    }

    let settings = builder.add_source(env).build()?;
    Ok(settings.try_deserialize()?)
}
