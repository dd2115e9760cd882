//! The event processor: queue ownership, lifecycle, and hook dispatch.

use serde::Serialize;

use crate::error::EventError;
use crate::event::{Event, EventKind};
use crate::hooks::{EventHooks, LogLevel};
use crate::queue::EventQueue;
use crate::state::ProcessorState;

/// Messages handed to the log hook are capped at this many bytes.
const LOG_MESSAGE_CAP: usize = 256;

/// Immutable processor configuration, fixed at construction.
#[derive(Clone, Debug)]
pub struct ProcessorConfig {
    /// Display name used in log messages.
    pub name: Option<String>,
    /// Hard cap on queued events; zero means unbounded.
    pub max_queue_size: usize,
    /// Gates every `on_log` invocation.
    pub enable_logging: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            name: None,
            max_queue_size: 0,
            enable_logging: true,
        }
    }
}

/// Point-in-time snapshot of the processor's observable counters.
#[derive(Clone, Debug, Serialize)]
pub struct ProcessorStatus {
    pub state: ProcessorState,
    pub queue_size: usize,
    pub events_processed: u64,
}

/// Single-threaded FIFO event dispatcher.
///
/// Composes an [`EventQueue`], a [`ProcessorState`] mode flag, and the
/// host's [`EventHooks`]. Every operation runs to completion on the
/// caller's thread; there are no locks and no background activity. One
/// logical owner drives all operations, which the `&mut self` receivers
/// enforce at compile time — a host that needs concurrent access wraps
/// the whole processor in its own mutual exclusion.
pub struct EventProcessor<H: EventHooks> {
    config: ProcessorConfig,
    hooks: H,
    queue: EventQueue,
    state: ProcessorState,
    events_processed: u64,
}

impl<H: EventHooks> EventProcessor<H> {
    /// Creates a processor in `Idle` with an empty queue.
    pub fn new(config: ProcessorConfig, hooks: H) -> Self {
        let queue = EventQueue::with_capacity(config.max_queue_size);
        let mut processor = Self {
            config,
            hooks,
            queue,
            state: ProcessorState::Idle,
            events_processed: 0,
        };
        let name = processor.display_name().to_owned();
        processor.log(
            LogLevel::Info,
            format_args!("Event processor '{name}' created"),
        );
        processor
    }

    /// Copies the caller's data into a new event and queues it.
    ///
    /// Fails only when the capacity cap is reached; the event is never
    /// constructed in that case. A configured filter that vetoes the
    /// event still reports success: the drop is indistinguishable from a
    /// queued push at the call site.
    pub fn push(
        &mut self,
        kind: EventKind,
        source: Option<&str>,
        payload: Option<&[u8]>,
    ) -> Result<(), EventError> {
        let queued = self.queue.len();
        if self.queue.capacity() > 0 && queued >= self.queue.capacity() {
            self.log(LogLevel::Warn, format_args!("Queue full ({queued} items)"));
            return Err(EventError::QueueFull);
        }

        let event = Event::new(kind, source, payload);

        if !self.hooks.on_filter(&event) {
            self.log(LogLevel::Debug, format_args!("Event filtered out"));
            return Ok(());
        }

        // Cannot fail: capacity was checked above and nothing ran in
        // between that could grow the queue.
        self.queue.push(event)?;
        let queue_size = self.queue.len();
        self.log(
            LogLevel::Debug,
            format_args!("Event queued (kind={kind}, queue_size={queue_size})"),
        );
        Ok(())
    }

    /// Dequeues and dispatches at most one event.
    ///
    /// Returns whether an event was dispatched. An empty queue returns
    /// `false` silently; a non-empty queue outside `Running` logs a
    /// warning and leaves the queue untouched.
    pub fn process(&mut self) -> bool {
        if self.queue.is_empty() {
            return false;
        }
        if self.state != ProcessorState::Running {
            self.log(LogLevel::Warn, format_args!("Processor not running"));
            return false;
        }

        let event = match self.queue.pop() {
            Some(event) => event,
            None => return false,
        };
        let kind = event.kind();
        self.log(
            LogLevel::Debug,
            format_args!("Processing event (kind={kind})"),
        );
        self.hooks.on_event(&event);
        self.events_processed += 1;
        // `event` drops here, releasing its owned copies.
        true
    }

    /// Drains the queue, dispatching events until no more progress can
    /// be made, and returns how many were dispatched.
    ///
    /// Outside `Running` the inner `process` call logs its warning and
    /// the loop stops at that first refusal.
    pub fn process_all(&mut self) -> usize {
        let mut count = 0;
        while self.process() {
            count += 1;
        }
        if count > 0 {
            self.log(LogLevel::Info, format_args!("Processed {count} events"));
        }
        count
    }

    /// Transitions to `Running`. Idempotent: a no-op transition neither
    /// logs nor notifies.
    pub fn start(&mut self) {
        self.transition(ProcessorState::Running);
    }

    /// Transitions to `Stopped`. Idempotent like [`start`](Self::start).
    pub fn stop(&mut self) {
        self.transition(ProcessorState::Stopped);
    }

    /// Empties the queue in any state without touching the state flag.
    /// Returns the number of entries dropped.
    pub fn clear_queue(&mut self) -> usize {
        let cleared = self.queue.clear();
        if cleared > 0 {
            self.log(
                LogLevel::Info,
                format_args!("Cleared {cleared} events from queue"),
            );
        }
        cleared
    }

    pub fn state(&self) -> ProcessorState {
        self.state
    }

    pub fn state_name(&self) -> &'static str {
        self.state.as_str()
    }

    pub fn queue_size(&self) -> usize {
        self.queue.len()
    }

    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Snapshot of state, queue depth, and the processed counter.
    pub fn status(&self) -> ProcessorStatus {
        ProcessorStatus {
            state: self.state,
            queue_size: self.queue.len(),
            events_processed: self.events_processed,
        }
    }

    fn transition(&mut self, new: ProcessorState) {
        let old = self.state;
        if old == new {
            return;
        }

        // Order is fixed: log first, then the notification hook.
        self.log(LogLevel::Info, format_args!("State change: {old} -> {new}"));
        self.state = new;
        self.hooks.on_state_change(old, new);
    }

    fn display_name(&self) -> &str {
        self.config.name.as_deref().unwrap_or("unnamed")
    }

    fn log(&mut self, level: LogLevel, args: std::fmt::Arguments<'_>) {
        if !self.config.enable_logging {
            return;
        }
        let mut message = args.to_string();
        truncate_on_char_boundary(&mut message, LOG_MESSAGE_CAP);
        self.hooks.on_log(level, &message);
    }
}

impl<H: EventHooks> Drop for EventProcessor<H> {
    fn drop(&mut self) {
        let name = self.display_name().to_owned();
        self.log(
            LogLevel::Info,
            format_args!("Destroying event processor '{name}'"),
        );
        self.clear_queue();
    }
}

/// Caps `message` at `cap` bytes without splitting a UTF-8 sequence.
fn truncate_on_char_boundary(message: &mut String, cap: usize) {
    if message.len() <= cap {
        return;
    }
    let mut cut = cap;
    while !message.is_char_boundary(cut) {
        cut -= 1;
    }
    message.truncate(cut);
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Records every hook invocation; optionally vetoes one event kind.
    #[derive(Default)]
    struct Recorder {
        events: Vec<(EventKind, Option<String>, Vec<u8>)>,
        logs: Vec<(LogLevel, String)>,
        transitions: Vec<(ProcessorState, ProcessorState)>,
        reject_kind: Option<EventKind>,
    }

    impl Recorder {
        fn rejecting(kind: EventKind) -> Self {
            Self {
                reject_kind: Some(kind),
                ..Self::default()
            }
        }

        fn sources(&self) -> Vec<Option<String>> {
            self.events.iter().map(|(_, s, _)| s.clone()).collect()
        }

        fn warnings(&self) -> Vec<&str> {
            self.logs
                .iter()
                .filter(|(level, _)| *level == LogLevel::Warn)
                .map(|(_, message)| message.as_str())
                .collect()
        }
    }

    impl EventHooks for Recorder {
        fn on_event(&mut self, event: &Event) {
            self.events.push((
                event.kind(),
                event.source().map(str::to_owned),
                event.payload().unwrap_or_default().to_vec(),
            ));
        }

        fn on_filter(&mut self, event: &Event) -> bool {
            self.reject_kind != Some(event.kind())
        }

        fn on_log(&mut self, level: LogLevel, message: &str) {
            self.logs.push((level, message.to_owned()));
        }

        fn on_state_change(&mut self, old: ProcessorState, new: ProcessorState) {
            self.transitions.push((old, new));
        }
    }

    /// Log sink that outlives the processor, for drop-path assertions.
    #[derive(Clone, Default)]
    struct SharedLog(Rc<RefCell<Vec<(LogLevel, String)>>>);

    impl EventHooks for SharedLog {
        fn on_log(&mut self, level: LogLevel, message: &str) {
            self.0.borrow_mut().push((level, message.to_owned()));
        }
    }

    fn named(name: &str, max_queue_size: usize) -> ProcessorConfig {
        ProcessorConfig {
            name: Some(name.to_owned()),
            max_queue_size,
            enable_logging: true,
        }
    }

    #[test]
    fn dispatches_in_push_order() {
        let mut processor = EventProcessor::new(named("fifo", 0), Recorder::default());
        processor.start();
        processor.push(EventKind::Data, Some("a"), None).unwrap();
        processor.push(EventKind::Data, Some("b"), None).unwrap();
        processor.push(EventKind::Data, Some("c"), None).unwrap();

        assert_eq!(processor.process_all(), 3);
        assert_eq!(
            processor.hooks().sources(),
            vec![
                Some("a".to_owned()),
                Some("b".to_owned()),
                Some("c".to_owned())
            ]
        );
    }

    #[test]
    fn capacity_overflow_rejects_before_filtering() {
        let mut processor = EventProcessor::new(named("capped", 2), Recorder::default());
        processor.push(EventKind::Data, Some("a"), None).unwrap();
        processor.push(EventKind::Data, Some("b"), None).unwrap();

        assert_eq!(
            processor.push(EventKind::Data, Some("c"), None),
            Err(EventError::QueueFull)
        );
        assert_eq!(processor.queue_size(), 2);
        assert_eq!(processor.hooks().warnings(), vec!["Queue full (2 items)"]);
    }

    #[test]
    fn filtered_push_reports_success() {
        let mut processor =
            EventProcessor::new(named("filtered", 0), Recorder::rejecting(EventKind::Error));
        processor.start();

        processor.push(EventKind::Error, Some("bad"), None).unwrap();
        assert_eq!(processor.queue_size(), 0);

        processor.process_all();
        assert!(processor.hooks().events.is_empty());
        assert!(processor
            .hooks()
            .logs
            .iter()
            .any(|(level, message)| *level == LogLevel::Debug && message == "Event filtered out"));
    }

    #[test]
    fn process_is_gated_on_running() {
        let mut processor = EventProcessor::new(named("gated", 0), Recorder::default());
        processor.push(EventKind::Data, Some("pending"), None).unwrap();

        assert!(!processor.process());
        assert_eq!(processor.queue_size(), 1);
        assert_eq!(processor.events_processed(), 0);

        processor.start();
        processor.stop();
        assert!(!processor.process());
        assert_eq!(processor.queue_size(), 1);
        assert_eq!(
            processor.hooks().warnings(),
            vec!["Processor not running", "Processor not running"]
        );
    }

    #[test]
    fn process_on_empty_queue_is_silent() {
        let mut processor = EventProcessor::new(named("empty", 0), Recorder::default());
        assert!(!processor.process());
        assert!(processor.hooks().warnings().is_empty());
    }

    #[test]
    fn repeated_start_notifies_once() {
        let mut processor = EventProcessor::new(named("idem", 0), Recorder::default());
        processor.start();
        processor.start();

        assert_eq!(
            processor.hooks().transitions,
            vec![(ProcessorState::Idle, ProcessorState::Running)]
        );
    }

    #[test]
    fn transition_logs_before_notifying() {
        let mut processor = EventProcessor::new(named("order", 0), Recorder::default());
        processor.start();
        processor.stop();

        assert_eq!(
            processor.hooks().transitions,
            vec![
                (ProcessorState::Idle, ProcessorState::Running),
                (ProcessorState::Running, ProcessorState::Stopped),
            ]
        );
        let infos: Vec<&str> = processor
            .hooks()
            .logs
            .iter()
            .filter(|(level, _)| *level == LogLevel::Info)
            .map(|(_, message)| message.as_str())
            .collect();
        assert!(infos.contains(&"State change: IDLE -> RUNNING"));
        assert!(infos.contains(&"State change: RUNNING -> STOPPED"));
    }

    #[test]
    fn clear_queue_drains_everything() {
        let mut processor = EventProcessor::new(named("drain", 0), Recorder::default());
        processor.push(EventKind::Data, None, Some(b"1")).unwrap();
        processor.push(EventKind::Connect, None, None).unwrap();

        assert_eq!(processor.clear_queue(), 2);
        assert_eq!(processor.queue_size(), 0);
        assert_eq!(processor.clear_queue(), 0);
        assert_eq!(processor.state(), ProcessorState::Idle);
    }

    #[test]
    fn delivered_payload_is_independent_of_caller_buffer() {
        let mut processor = EventProcessor::new(named("copies", 0), Recorder::default());
        processor.start();

        let mut buf = b"payload".to_vec();
        processor.push(EventKind::Data, Some("src"), Some(&buf)).unwrap();
        buf.fill(b'X');

        processor.process_all();
        assert_eq!(processor.hooks().events[0].2, b"payload".to_vec());
    }

    #[test]
    fn capacity_scenario_end_to_end() {
        let mut processor = EventProcessor::new(named("scenario", 2), Recorder::default());

        processor.push(EventKind::Data, Some("A"), None).unwrap();
        processor.push(EventKind::Data, Some("B"), None).unwrap();
        assert_eq!(processor.queue_size(), 2);
        assert_eq!(
            processor.push(EventKind::Data, Some("C"), None),
            Err(EventError::QueueFull)
        );
        assert_eq!(processor.queue_size(), 2);

        processor.start();
        assert_eq!(processor.process_all(), 2);
        assert_eq!(
            processor.hooks().sources(),
            vec![Some("A".to_owned()), Some("B".to_owned())]
        );
        assert_eq!(processor.events_processed(), 2);
        assert_eq!(processor.queue_size(), 0);
        assert!(processor
            .hooks()
            .logs
            .iter()
            .any(|(level, message)| *level == LogLevel::Info && message == "Processed 2 events"));
    }

    #[test]
    fn process_all_outside_running_stops_after_one_warning() {
        let mut processor = EventProcessor::new(named("stuck", 0), Recorder::default());
        processor.push(EventKind::Data, Some("pending"), None).unwrap();

        assert_eq!(processor.process_all(), 0);
        assert_eq!(processor.hooks().warnings(), vec!["Processor not running"]);
        assert_eq!(processor.queue_size(), 1);
    }

    #[test]
    fn status_snapshot_serializes_state_names() {
        let mut processor = EventProcessor::new(named("status", 0), Recorder::default());
        processor.start();
        processor.push(EventKind::Data, None, Some(b"x")).unwrap();
        processor.process_all();
        processor.push(EventKind::Data, None, Some(b"y")).unwrap();

        let status = processor.status();
        assert_eq!(status.state, ProcessorState::Running);
        assert_eq!(status.queue_size, 1);
        assert_eq!(status.events_processed, 1);

        let rendered = serde_yaml::to_string(&status).unwrap();
        assert!(rendered.contains("RUNNING"));
    }

    #[test]
    fn drop_logs_destruction_and_clears_queue() {
        let sink = SharedLog::default();
        {
            let mut processor = EventProcessor::new(named("doomed", 0), sink.clone());
            processor.push(EventKind::Data, None, Some(b"1")).unwrap();
            processor.push(EventKind::Data, None, Some(b"2")).unwrap();
        }

        let logs = sink.0.borrow();
        let messages: Vec<&str> = logs.iter().map(|(_, message)| message.as_str()).collect();
        assert!(messages.contains(&"Destroying event processor 'doomed'"));
        assert!(messages.contains(&"Cleared 2 events from queue"));
    }

    #[test]
    fn disabled_logging_suppresses_the_hook() {
        let config = ProcessorConfig {
            name: Some("quiet".to_owned()),
            max_queue_size: 1,
            enable_logging: false,
        };
        let mut processor = EventProcessor::new(config, Recorder::default());
        processor.push(EventKind::Data, None, None).unwrap();
        assert_eq!(processor.push(EventKind::Data, None, None), Err(EventError::QueueFull));
        processor.start();
        processor.process_all();

        assert!(processor.hooks().logs.is_empty());
        assert_eq!(processor.events_processed(), 1);
    }

    #[test]
    fn log_messages_are_capped() {
        let long_name = "n".repeat(400);
        let processor = EventProcessor::new(named(&long_name, 0), Recorder::default());

        let (_, created) = &processor.hooks().logs[0];
        assert_eq!(created.len(), LOG_MESSAGE_CAP);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 'é' is two bytes; an odd cap must not split it.
        let mut message = "é".repeat(10);
        truncate_on_char_boundary(&mut message, 7);
        assert_eq!(message.len(), 6);
        assert_eq!(message, "é".repeat(3));

        let mut short = String::from("ok");
        truncate_on_char_boundary(&mut short, 7);
        assert_eq!(short, "ok");
    }
}
