use thiserror::Error;

/// Event queue error conditions.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("Event queue capacity exceeded")]
    QueueFull,
}
