//! Outbound value dispatch with a pending queue for a not-yet-ready device.
//!
//! UI setup fires initial values (e.g. the default volume) before the
//! asynchronous device construction completes. `send` therefore never blocks
//! and never loses a value: if the sink is absent or does not recognize the
//! id, the value is buffered (last-write-wins per id) and applied by the
//! single `flush_pending` call made right after the device comes up.

use fnv::FnvHashMap;

/// Settable-parameter surface of the audio device. The web crate implements
/// this over the device's `parametersById` map; tests use a stub.
pub trait ParamSink {
    fn has_param(&self, id: &str) -> bool;
    fn set_param(&self, id: &str, value: f64);
}

#[derive(Default)]
pub struct Dispatcher {
    pending: FnvHashMap<String, f64>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward `(id, value)` to the device, or buffer it until the device is
    /// ready. Buffered values overwrite earlier ones for the same id.
    pub fn send<S: ParamSink>(&mut self, sink: Option<&S>, id: &str, value: f64) {
        if let Some(s) = sink {
            if s.has_param(id) {
                s.set_param(id, value);
                log::debug!("[out] {} = {}", id, value);
                return;
            }
        }
        log::warn!("[out] device not ready, queueing {} = {}", id, value);
        self.pending.insert(id.to_owned(), value);
    }

    /// Apply every queued value the now-ready device recognizes, exactly
    /// once, then clear the queue. Unrecognized ids are dropped, not retried.
    pub fn flush_pending<S: ParamSink>(&mut self, sink: &S) {
        for (id, value) in self.pending.drain() {
            if sink.has_param(&id) {
                sink.set_param(&id, value);
                log::info!("[out] flushed queued {} = {}", id, value);
            } else {
                log::warn!("[out] dropping queued value for unknown param {}", id);
            }
        }
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
