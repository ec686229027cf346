use atmono_core::{Dispatcher, ParamSink};
use std::cell::RefCell;

/// Minimal settable-parameter surface standing in for the device.
struct FakeDevice {
    known: Vec<&'static str>,
    calls: RefCell<Vec<(String, f64)>>,
}

impl FakeDevice {
    fn new(known: &[&'static str]) -> Self {
        Self {
            known: known.to_vec(),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl ParamSink for FakeDevice {
    fn has_param(&self, id: &str) -> bool {
        self.known.contains(&id)
    }
    fn set_param(&self, id: &str, value: f64) {
        self.calls.borrow_mut().push((id.to_owned(), value));
    }
}

#[test]
fn send_applies_immediately_when_device_ready() {
    let device = FakeDevice::new(&["vol"]);
    let mut d = Dispatcher::new();
    d.send(Some(&device), "vol", 0.8);

    assert_eq!(device.calls.borrow().as_slice(), &[("vol".into(), 0.8)]);
    assert_eq!(d.pending_len(), 0, "no queue residue on direct apply");
}

#[test]
fn send_queues_when_device_absent() {
    let mut d = Dispatcher::new();
    d.send::<FakeDevice>(None, "vol", 0.05);
    assert_eq!(d.pending_len(), 1);
}

#[test]
fn flush_applies_last_value_exactly_once() {
    let mut d = Dispatcher::new();
    d.send::<FakeDevice>(None, "vol", 0.1);
    d.send::<FakeDevice>(None, "vol", 0.2);
    d.send::<FakeDevice>(None, "vol", 0.3);

    let device = FakeDevice::new(&["vol"]);
    d.flush_pending(&device);

    assert_eq!(
        device.calls.borrow().as_slice(),
        &[("vol".into(), 0.3)],
        "last write before flush wins, applied exactly once"
    );
    assert_eq!(d.pending_len(), 0);

    // A second flush is a no-op.
    d.flush_pending(&device);
    assert_eq!(device.calls.borrow().len(), 1);
}

#[test]
fn flush_drops_ids_the_device_does_not_recognize() {
    let mut d = Dispatcher::new();
    d.send::<FakeDevice>(None, "vol", 0.5);
    d.send::<FakeDevice>(None, "ghost", 0.9);

    let device = FakeDevice::new(&["vol"]);
    d.flush_pending(&device);

    assert_eq!(device.calls.borrow().as_slice(), &[("vol".into(), 0.5)]);
    assert_eq!(d.pending_len(), 0, "unrecognized ids are dropped, not retried");
}

#[test]
fn send_queues_when_device_lacks_the_param() {
    // Present device that does not expose the id behaves like not-ready.
    let device = FakeDevice::new(&["vol"]);
    let mut d = Dispatcher::new();
    d.send(Some(&device), "s3", 0.4);
    assert!(device.calls.borrow().is_empty());
    assert_eq!(d.pending_len(), 1);
}

#[test]
fn startup_volume_race_end_to_end() {
    // UI setup fires the default volume before the device exists.
    let mut d = Dispatcher::new();
    d.send::<FakeDevice>(None, "vol", 0.05);

    // Device comes up, recognizes vol; the one flush sets it.
    let device = FakeDevice::new(&["vol", "s1"]);
    d.flush_pending(&device);
    assert_eq!(device.calls.borrow().as_slice(), &[("vol".into(), 0.05)]);
    assert_eq!(d.pending_len(), 0);
}
