// Host-side tests for the utterance hand-off and recognizer error handling.

use duck_core::*;

#[test]
fn permission_and_device_errors_stop_listening() {
    for kind in [
        "not-allowed",
        "service-not-allowed",
        "audio-capture",
        "language-not-supported",
    ] {
        assert!(recognition_error_is_fatal(kind), "{kind} should be fatal");
    }
}

#[test]
fn transient_errors_keep_restarting() {
    for kind in ["no-speech", "network", "aborted", ""] {
        assert!(!recognition_error_is_fatal(kind), "{kind} should be retried");
    }
}

#[test]
fn slot_is_shared_between_clones() {
    let slot = UtteranceSlot::new();
    let producer = slot.clone();
    producer.publish("quack");
    assert!(!slot.is_empty());
    assert_eq!(slot.take().as_deref(), Some("quack"));
    assert!(producer.is_empty());
}

#[test]
fn fatal_error_stops_auto_restart() {
    let flag = ListenFlag::new();
    let callbacks = flag.clone();
    assert!(flag.request_start());
    assert!(callbacks.record_error("not-allowed"));
    assert!(!callbacks.is_on(), "end handler must not restart");
    // the user can ask again later
    assert!(flag.request_start());
}

#[test]
fn transient_error_keeps_listening() {
    let flag = ListenFlag::new();
    flag.request_start();
    assert!(!flag.record_error("no-speech"));
    assert!(flag.is_on());
}

#[test]
fn failed_start_can_be_retried() {
    let flag = ListenFlag::new();
    assert!(flag.request_start());
    assert!(!flag.request_start(), "second start is a no-op while on");
    flag.start_failed();
    assert!(!flag.is_on());
    assert!(flag.request_start());
}

#[test]
fn stop_is_idempotent() {
    let flag = ListenFlag::new();
    assert!(!flag.request_stop());
    flag.request_start();
    assert!(flag.request_stop());
    assert!(!flag.request_stop());
}
