//! Event processor settings.

use serde::{Deserialize, Serialize};
use validator::Validate;

use varsel_core::ProcessorConfig;

use crate::validation;

/// Settings for one event processor instance.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct ProcessorSettings {
    /// Display name used in log output.
    #[validate(custom(function = validation::validate_processor_name))]
    pub name: Option<String>,

    /// Hard cap on queued events; zero disables the cap.
    #[serde(default = "default_max_queue_size")]
    #[validate(range(max = 1_048_576))]
    pub max_queue_size: usize,

    /// Gates the processor's log hook.
    #[serde(default = "default_true")]
    pub enable_logging: bool,
}

fn default_max_queue_size() -> usize {
    1024
}

fn default_true() -> bool {
    true
}

impl Default for ProcessorSettings {
    fn default() -> Self {
        Self {
            name: None,
            max_queue_size: default_max_queue_size(),
            enable_logging: default_true(),
        }
    }
}

impl ProcessorSettings {
    /// Converts into the core crate's plain config value.
    pub fn to_processor_config(&self) -> ProcessorConfig {
        ProcessorConfig {
            name: self.name.clone(),
            max_queue_size: self.max_queue_size,
            enable_logging: self.enable_logging,
        }
    }
}
