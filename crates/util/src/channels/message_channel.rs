//! This module defines the [Inbox] and [Outbox] types for working with a
//! one-way SPSC (single producer single consumer) queue. The embedded session
//! pushes window messages into an [Outbox] and the node reads them from the
//! matching [Inbox].

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Instant;

use super::{ChannelError, ChannelResult, THREAD_PANIC_MSG};

/// The inbox (message receiver) of a one-way message channel. Also see
/// [Outbox].
///
/// See [new] to construct.
#[derive(Debug)]
pub struct Inbox<T> {
    channel: Arc<OneWayChannel<T>>,
}

impl<T> Inbox<T> {
    /// Waits for a message from the outbox until one appears.
    ///
    /// A [ChannelError::ConnectionDropped] error is returned if the other end
    /// of the connection was dropped and there are no more items in the queue.
    pub fn wait(&self) -> ChannelResult<T> {
        let mut queue = self.channel.queue.lock().expect(THREAD_PANIC_MSG);

        loop {
            if let Some(msg) = queue.pop_front() {
                return Ok(msg);
            }

            // If there are no messages we need to make sure the other end
            // hasn't hung up before going (back) to sleep.
            super::ensure_connection_not_dropped(&self.channel)?;

            queue = self.channel.notifier.wait(queue).expect(THREAD_PANIC_MSG);
        }
    }

    /// Waits for a message from the outbox until `deadline`.
    ///
    /// Useful when several messages may need to be read (and some discarded)
    /// under one overall time budget. The [ChannelError::Timeout] error holds
    /// the time that was left when this function was called.
    pub fn wait_deadline(&self, deadline: Instant) -> ChannelResult<T> {
        let budget = deadline.saturating_duration_since(Instant::now());
        let mut queue = self.channel.queue.lock().expect(THREAD_PANIC_MSG);

        loop {
            if let Some(msg) = queue.pop_front() {
                return Ok(msg);
            }

            super::ensure_connection_not_dropped(&self.channel)?;

            let time_until_deadline = deadline.saturating_duration_since(Instant::now());
            if time_until_deadline.is_zero() {
                return Err(ChannelError::Timeout { timeout: budget });
            }

            // Spurious wakeups and early `wait_timeout` returns are both fine
            // here, the deadline check above decides when we give up.
            let (returned_queue, _) = self
                .channel
                .notifier
                .wait_timeout(queue, time_until_deadline)
                .expect(THREAD_PANIC_MSG);
            queue = returned_queue;
        }
    }

    /// Receives a message from the outbox if a message is waiting, returning
    /// [None] otherwise. This function may still block slightly.
    ///
    /// A [ChannelError::ConnectionDropped] error is returned if the other end
    /// of the connection was dropped and there are no more items in the queue.
    pub fn check(&self) -> ChannelResult<Option<T>> {
        let mut queue = self.channel.queue.lock().expect(THREAD_PANIC_MSG);

        if let Some(msg) = queue.pop_front() {
            return Ok(Some(msg));
        }

        super::ensure_connection_not_dropped(&self.channel)?;

        Ok(None)
    }

    /// Removes and returns every message currently waiting, without checking
    /// whether the other end is still connected.
    pub fn drain(&self) -> VecDeque<T> {
        Self::take_all(self.channel.queue.lock().expect(THREAD_PANIC_MSG))
    }

    fn take_all(mut queue: MutexGuard<'_, VecDeque<T>>) -> VecDeque<T> {
        queue.split_off(0)
    }
}

/// The outbox (message sender) of a one-way message channel. Also see
/// [Inbox].
#[derive(Debug)]
pub struct Outbox<T> {
    channel: Arc<OneWayChannel<T>>,
}

impl<T> Outbox<T> {
    /// Sends a message to the inbox, returning the number of messages that have
    /// been sent but not received (after sending the message).
    ///
    /// A [ChannelError::ConnectionDropped] error is returned if the other end
    /// of the connection was dropped.
    pub fn send(&self, msg: T) -> ChannelResult<usize> {
        super::ensure_connection_not_dropped(&self.channel)?;

        let mut queue = self.channel.queue.lock().expect(THREAD_PANIC_MSG);
        queue.push_back(msg);
        let in_flight = queue.len();

        // We need to notify the inbox that a message has arrived if it's
        // waiting.
        self.channel.notifier.notify_one();

        Ok(in_flight)
    }}

// The inbox may be waiting, it has to find out that no more messages are
// coming so it doesn't just wait forever.
impl<T> Drop for Outbox<T> {
    fn drop(&mut self) {
        self.channel.notifier.notify_one();
    }
}

/// Create a one-way message channel's [Inbox] and [Outbox].
///
/// - The inbox will be able to receive messages as long as the outbox hasn't
///   been dropped or while there are still pending messages.
/// - The outbox will be able to send messages as long as the inbox hasn't been
///   dropped.
pub fn new<T>() -> (Inbox<T>, Outbox<T>) {
    OneWayChannel {
        queue: Mutex::default(),
        notifier: Condvar::default(),
    }
    .into()
}

#[derive(Debug)]
struct OneWayChannel<T> {
    queue: Mutex<VecDeque<T>>,
    notifier: Condvar,
}

impl<T> From<OneWayChannel<T>> for (Inbox<T>, Outbox<T>) {
    fn from(channel: OneWayChannel<T>) -> Self {
        let channel = Arc::new(channel);
        (
            Inbox {
                channel: channel.clone(),
            },
            Outbox { channel },
        )
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn messages_arrive_in_order() {
        let (inbox, outbox) = new::<i32>();

        let thread = thread::spawn(move || {
            assert!(outbox.send(1).is_ok());
            assert!(outbox.send(2).is_ok());
            assert!(outbox.send(3).is_ok());
        });

        assert_eq!(inbox.wait(), Ok(1));
        assert_eq!(inbox.wait(), Ok(2));
        assert_eq!(inbox.wait(), Ok(3));

        thread.join().unwrap();
    }

    #[test]
    fn timeout_is_not_early() {
        let (inbox, _outbox) = new::<i32>();

        let timeout = Duration::from_millis(200);
        let started = Instant::now();
        assert!(matches!(
            inbox.wait_deadline(started + timeout),
            Err(ChannelError::Timeout { .. })
        ));
        assert!(started.elapsed() >= timeout);
    }

    #[test]
    fn deadline_in_the_past_still_returns_waiting_messages() {
        let (inbox, outbox) = new();
        assert!(outbox.send(7).is_ok());

        let deadline = Instant::now() - Duration::from_millis(10);
        assert_eq!(inbox.wait_deadline(deadline), Ok(7));
        assert!(matches!(
            inbox.wait_deadline(deadline),
            Err(ChannelError::Timeout { .. })
        ));
    }

    #[test]
    fn check_and_drain_work() {
        let (inbox, outbox) = new::<i32>();

        assert_eq!(inbox.check(), Ok(None));

        assert!(outbox.send(1).is_ok());
        assert_eq!(inbox.check(), Ok(Some(1)));

        assert!(outbox.send(2).is_ok());
        assert!(outbox.send(3).is_ok());
        assert_eq!(inbox.drain(), VecDeque::from([2, 3]));
        assert_eq!(inbox.check(), Ok(None));
    }

    #[test]
    fn early_outbox_drop_is_fine() {
        let (inbox, outbox) = new::<i32>();

        thread::scope(|s| {
            s.spawn(move || {
                assert!(outbox.send(1).is_ok());
                drop(outbox);
            });
        });

        assert_eq!(inbox.wait(), Ok(1));
        assert_eq!(inbox.wait(), Err(ChannelError::ConnectionDropped));
        assert_eq!(inbox.check(), Err(ChannelError::ConnectionDropped));
    }

    #[test]
    fn dropped_inbox_rejects_sends() {
        let (inbox, outbox) = new::<i32>();
        drop(inbox);

        assert_eq!(outbox.send(1), Err(ChannelError::ConnectionDropped));
    }
}
