//! Single-slot latest-value mailbox.
//!
//! Models the overwrite-queue handoff between a control task and the audio
//! task: the writer always posts its newest frame, the reader only ever
//! cares about the most recent one. Stale frames are dropped, never queued.

use std::sync::Mutex;

/// A one-element overwrite slot shared between two contexts.
///
/// [`post`](Self::post) replaces whatever is in the slot;
/// [`take`](Self::take) empties it. The lock is held only for the slot
/// swap, so neither side can stall the other for longer than a copy.
///
/// A poisoned lock (the other side panicked mid-swap) degrades to "no
/// frame": the audio side keeps running on its last applied parameters.
#[derive(Debug, Default)]
pub struct Mailbox<T: Copy> {
    slot: Mutex<Option<T>>,
}

impl<T: Copy> Mailbox<T> {
    /// Create an empty mailbox.
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Put a value in the slot, replacing any unread one.
    pub fn post(&self, value: T) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(value);
        }
    }

    /// Remove and return the newest value, if any.
    pub fn take(&self) -> Option<T> {
        match self.slot.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        }
    }

    /// Read the newest value without consuming it.
    pub fn peek(&self) -> Option<T> {
        match self.slot.lock() {
            Ok(slot) => *slot,
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_empty_mailbox_yields_nothing() {
        let mailbox: Mailbox<u32> = Mailbox::new();
        assert_eq!(mailbox.take(), None);
        assert_eq!(mailbox.peek(), None);
    }

    #[test]
    fn test_post_then_take() {
        let mailbox = Mailbox::new();
        mailbox.post(7u32);
        assert_eq!(mailbox.take(), Some(7));
        assert_eq!(mailbox.take(), None, "take must empty the slot");
    }

    #[test]
    fn test_newest_value_wins() {
        let mailbox = Mailbox::new();
        for i in 0..100u32 {
            mailbox.post(i);
        }
        assert_eq!(mailbox.take(), Some(99));
        assert_eq!(mailbox.take(), None);
    }

    #[test]
    fn test_peek_is_non_destructive() {
        let mailbox = Mailbox::new();
        mailbox.post(3u32);
        assert_eq!(mailbox.peek(), Some(3));
        assert_eq!(mailbox.peek(), Some(3));
        assert_eq!(mailbox.take(), Some(3));
    }

    #[test]
    fn test_cross_thread_handoff() {
        let mailbox = Arc::new(Mailbox::new());
        let writer = Arc::clone(&mailbox);

        let handle = thread::spawn(move || {
            for i in 0..1000u32 {
                writer.post(i);
            }
        });

        // Reader only ever sees posted values, in non-decreasing order
        let mut last = 0u32;
        while !handle.is_finished() {
            if let Some(v) = mailbox.take() {
                assert!(v >= last);
                last = v;
            }
        }
        handle.join().unwrap();
        if let Some(v) = mailbox.take() {
            assert_eq!(v, 999);
        }
    }
}
