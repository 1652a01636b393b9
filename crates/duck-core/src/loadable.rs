//! Result slot for one-shot asynchronous loads.
//!
//! Loaders start `Pending` and resolve exactly once. Consumers must check
//! `is_loaded()` or use `get()`; a `Failed` slot stays failed for the session.

use std::fmt::Display;

#[derive(Clone, Debug, Default)]
pub enum Loadable<T> {
    #[default]
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Loadable::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Loadable::Failed(_))
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Loadable::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Loadable::Ready(v) => Some(v),
            _ => None,
        }
    }

    /// Settle a pending slot. Later resolutions are ignored so a slot never
    /// flips between states.
    pub fn resolve<E: Display>(&mut self, result: Result<T, E>) -> bool {
        if !matches!(self, Loadable::Pending) {
            return false;
        }
        *self = match result {
            Ok(v) => Loadable::Ready(v),
            Err(e) => Loadable::Failed(e.to_string()),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_once() {
        let mut slot: Loadable<u32> = Loadable::default();
        assert!(!slot.is_loaded());
        assert!(slot.resolve::<&str>(Ok(7)));
        assert_eq!(slot.get(), Some(&7));
        assert!(!slot.resolve::<&str>(Err("late")));
        assert!(slot.is_loaded());
    }

    #[test]
    fn failure_is_sticky() {
        let mut slot: Loadable<u32> = Loadable::Pending;
        slot.resolve(Err("404"));
        assert!(slot.is_failed());
        assert!(slot.get().is_none());
        assert!(!slot.resolve::<&str>(Ok(1)));
    }
}
