//! The callback seam between the processor and its host.

use std::fmt;

use crate::event::Event;
use crate::state::ProcessorState;

/// Severity attached to messages delivered through [`EventHooks::on_log`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed capability set a host hands to the processor at
/// construction.
///
/// Every operation defaults to a no-op, so implementations override only
/// what they care about. All hooks run synchronously, in-line, on the
/// thread that triggered them: `push` may invoke the filter and log
/// hooks, `process` the consume and log hooks, `start`/`stop` the
/// state-change and log hooks. Borrows handed to a hook end with the
/// hook's return; the event's copies are dropped right after the consume
/// hook comes back.
pub trait EventHooks {
    /// Consume hook, invoked once per dequeued event.
    fn on_event(&mut self, event: &Event) {
        let _ = event;
    }

    /// Veto hook; return `false` to drop the event before it is queued.
    /// Dropping is successful handling, not an error.
    fn on_filter(&mut self, event: &Event) -> bool {
        let _ = event;
        true
    }

    /// Receives formatted, bounded-length log messages. Only invoked
    /// when the processor's `enable_logging` flag is set.
    fn on_log(&mut self, level: LogLevel, message: &str) {
        let _ = (level, message);
    }

    /// Fires once per actual state transition, after the corresponding
    /// log entry. No-op transitions do not notify.
    fn on_state_change(&mut self, old: ProcessorState, new: ProcessorState) {
        let _ = (old, new);
    }
}

/// Hook set with every operation left at its default.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl EventHooks for NoHooks {}

impl<H: EventHooks + ?Sized> EventHooks for Box<H> {
    fn on_event(&mut self, event: &Event) {
        (**self).on_event(event)
    }

    fn on_filter(&mut self, event: &Event) -> bool {
        (**self).on_filter(event)
    }

    fn on_log(&mut self, level: LogLevel, message: &str) {
        (**self).on_log(level, message)
    }

    fn on_state_change(&mut self, old: ProcessorState, new: ProcessorState) {
        (**self).on_state_change(old, new)
    }
}
