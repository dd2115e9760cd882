//! Processor lifecycle states.

use std::fmt;

use serde::Serialize;

/// Mode flag for the processor.
///
/// Any state may move to any other; there is no terminal state. Only
/// `Running` permits event dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProcessorState {
    #[default]
    Idle,
    Running,
    Stopped,
}

impl ProcessorState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessorState::Idle => "IDLE",
            ProcessorState::Running => "RUNNING",
            ProcessorState::Stopped => "STOPPED",
        }
    }
}

impl fmt::Display for ProcessorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
