//! # varsel configuration
//!
//! Hierarchical configuration for hosts embedding a varsel processor:
//! defaults, an optional YAML file, and `VARSEL_*` environment variables,
//! validated before use. The callback hooks are code, not configuration —
//! they are wired at construction via
//! [`varsel_core::EventHooks`]; this crate covers everything that can
//! live in a file.

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;
mod processor;
mod validation;

pub use error::ConfigError;
pub use processor::ProcessorSettings;

/// Top-level configuration container.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct VarselConfig {
    /// Event processor settings.
    #[validate(nested)]
    pub processor: ProcessorSettings,
}

impl VarselConfig {
    /// Load configuration from default files and the environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/varsel.yaml`, if present
    /// 3. `VARSEL_*` environment variables (nested fields split on `__`)
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(VarselConfig::default()));

        if Path::new("config/varsel.yaml").exists() {
            figment = figment.merge(Yaml::file("config/varsel.yaml"));
        }

        figment
            .merge(Env::prefixed("VARSEL_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path, for tests and tooling.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("VARSEL_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
