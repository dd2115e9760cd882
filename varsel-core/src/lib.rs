//! # varsel-core
//!
//! In-process event dispatch queue for embedding inside a host process:
//! producers push typed events with an optional source label and binary
//! payload, and a processor drains them in arrival order into
//! consumer-supplied hooks.
//!
//! The design is deliberately single-threaded and synchronous. Every
//! operation runs to completion on the caller's thread, every hook fires
//! in-line inside the call that triggered it, and the processor owns a
//! private copy of all variable-length data it queues.
//!
//! ### Key submodules:
//! - `event`: [`Event`] and [`EventKind`], copy-on-push value types
//! - `queue`: [`EventQueue`], FIFO storage with an optional capacity cap
//! - `state`: [`ProcessorState`], the Idle/Running/Stopped mode flag
//! - `hooks`: [`EventHooks`], the fixed four-operation callback seam
//! - `processor`: [`EventProcessor`], composing all of the above

pub mod error;
pub mod event;
pub mod hooks;
pub mod processor;
pub mod queue;
pub mod state;

pub mod prelude {
    pub use crate::error::EventError;
    pub use crate::event::{Event, EventKind};
    pub use crate::hooks::{EventHooks, LogLevel, NoHooks};
    pub use crate::processor::{EventProcessor, ProcessorConfig, ProcessorStatus};
    pub use crate::queue::EventQueue;
    pub use crate::state::ProcessorState;
}

pub use error::EventError;
pub use event::{Event, EventKind};
pub use hooks::{EventHooks, LogLevel, NoHooks};
pub use processor::{EventProcessor, ProcessorConfig, ProcessorStatus};
pub use queue::EventQueue;
pub use state::ProcessorState;
