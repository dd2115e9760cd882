//! Prometheus counters for processor activity.

use prometheus::{Counter, Registry};

use varsel_core::{Event, EventHooks, ProcessorState};

/// Registry plus the counters varsel maintains.
///
/// Prometheus counters share their value across clones, so a host can
/// keep one `MetricsRecorder` clone for scraping while another feeds a
/// [`MetricsHooks`] inside the processor.
#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub processed_events: Counter,
    pub state_changes: Counter,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();
        let processed_events = Counter::new(
            "varsel_events_processed_total",
            "Events dispatched to the consume hook",
        )
        .unwrap();
        let state_changes = Counter::new(
            "varsel_state_changes_total",
            "Processor state transitions",
        )
        .unwrap();

        registry
            .register(Box::new(processed_events.clone()))
            .unwrap();
        registry.register(Box::new(state_changes.clone())).unwrap();

        Self {
            registry,
            processed_events,
            state_changes,
        }
    }

    /// Text exposition of everything in the registry.
    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap_or_default())
    }

    pub fn inc_processed_events(&self) {
        self.processed_events.inc();
    }

    pub fn inc_state_changes(&self) {
        self.state_changes.inc();
    }
}

/// Hook set that feeds a [`MetricsRecorder`].
#[derive(Clone, Debug)]
pub struct MetricsHooks {
    recorder: MetricsRecorder,
}

impl MetricsHooks {
    pub fn new(recorder: MetricsRecorder) -> Self {
        Self { recorder }
    }

    pub fn recorder(&self) -> &MetricsRecorder {
        &self.recorder
    }
}

impl EventHooks for MetricsHooks {
    fn on_event(&mut self, _event: &Event) {
        self.recorder.inc_processed_events();
    }

    fn on_state_change(&mut self, _old: ProcessorState, _new: ProcessorState) {
        self.recorder.inc_state_changes();
    }
}
