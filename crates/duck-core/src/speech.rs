//! Hand-off between the asynchronous recognizer and the frame loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Capacity-one channel that overwrites on full. Cloning shares the slot.
///
/// The recognizer callback publishes; the frame loop drains once per tick, so
/// several results between two ticks collapse to the most recent one.
#[derive(Clone, Debug, Default)]
pub struct UtteranceSlot {
    inner: Rc<RefCell<Option<String>>>,
}

impl UtteranceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, text: impl Into<String>) {
        *self.inner.borrow_mut() = Some(text.into());
    }

    /// Take and clear. Empty strings count as nothing heard.
    pub fn take(&self) -> Option<String> {
        self.inner.borrow_mut().take().filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().as_deref().map_or(true, str::is_empty)
    }
}

/// Recognizer error kinds that will fail again on restart: permission denied,
/// no microphone or an unsupported language. Anything else (`no-speech`, `network`, `aborted`) is
/// worth retrying.
pub fn recognition_error_is_fatal(kind: &str) -> bool {
    matches!(
        kind,
        "not-allowed" | "service-not-allowed" | "audio-capture" | "language-not-supported"
    )
}

/// Whether listening is wanted. Clones share the flag, so the recognizer
/// callbacks and the exported start/stop controls see the same state.
#[derive(Clone, Debug, Default)]
pub struct ListenFlag {
    on: Rc<Cell<bool>>,
}

impl ListenFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.on.get()
    }

    /// True only when this call switched listening on.
    pub fn request_start(&self) -> bool {
        !self.on.replace(true)
    }

    /// True only when this call switched listening off.
    pub fn request_stop(&self) -> bool {
        self.on.replace(false)
    }

    /// The recognizer could not start; a later start request may retry.
    pub fn start_failed(&self) {
        self.on.set(false);
    }

    /// Record a recognizer error. Fatal kinds switch listening off so the
    /// following `end` event does not restart. Returns whether it was fatal.
    pub fn record_error(&self, kind: &str) -> bool {
        let fatal = recognition_error_is_fatal(kind);
        if fatal {
            self.on.set(false);
        }
        fatal
    }
}

/// Words that trigger a quack when heard anywhere in an utterance.
#[derive(Clone, Debug)]
pub struct WakeWords {
    words: Vec<String>,
}

impl WakeWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Case-insensitive substring match against any word.
    pub fn matches(&self, utterance: &str) -> bool {
        if utterance.is_empty() {
            return false;
        }
        let heard = utterance.to_lowercase();
        self.words.iter().any(|w| heard.contains(w.as_str()))
    }
}

impl Default for WakeWords {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_WAKE_WORDS.iter().copied())
    }
}
