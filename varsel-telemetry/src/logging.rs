//! Tracing integration for the processor's log hook.

use tracing_subscriber::{fmt, EnvFilter};

use varsel_core::{Event, EventHooks, LogLevel, ProcessorState};

/// Global subscriber setup for binaries and tests.
#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    pub fn init() {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_thread_names(true)
            .init()
    }
}

/// Hook set that routes processor output onto `tracing`.
///
/// Log-hook messages keep their level; consumed events and state
/// transitions are mirrored as structured events. Filtering stays at the
/// default (admit everything).
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingHooks;

impl EventHooks for TracingHooks {
    fn on_event(&mut self, event: &Event) {
        tracing::debug!(
            kind = event.kind().as_str(),
            source = event.source(),
            payload_len = event.payload_len(),
            "event dispatched"
        );
    }

    fn on_log(&mut self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!("{message}"),
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Warn => tracing::warn!("{message}"),
        }
    }

    fn on_state_change(&mut self, old: ProcessorState, new: ProcessorState) {
        tracing::info!(old = old.as_str(), new = new.as_str(), "processor state changed");
    }
}
