//! Defines [Port], one end of a two-way message channel built from a pair of
//! [message_channel](super::message_channel)s.
//!
//! A node holds one port and the emulator session embedded in its panel holds
//! the other. Either side can send at any time; nothing correlates a message
//! with a reply (that's left to the message payloads).

use std::time::Instant;

use super::ChannelResult;
use super::message_channel::{self, Inbox, Outbox};

/// One end of a two-way channel. Sends `S` messages and receives `R` messages.
///
/// See [pair] to construct.
#[derive(Debug)]
pub struct Port<S, R> {
    outbox: Outbox<S>,
    inbox: Inbox<R>,
}

impl<S, R> Port<S, R> {
    /// Send a message to the other end.
    ///
    /// A [super::ChannelError::ConnectionDropped] error is returned if the
    /// other end was dropped.
    pub fn send(&self, msg: S) -> ChannelResult<usize> {
        self.outbox.send(msg)
    }

    /// See [Inbox::wait].
    pub fn wait(&self) -> ChannelResult<R> {
        self.inbox.wait()
    }

    /// See [Inbox::wait_deadline].
    pub fn wait_deadline(&self, deadline: Instant) -> ChannelResult<R> {
        self.inbox.wait_deadline(deadline)
    }

    /// See [Inbox::check].
    pub fn check(&self) -> ChannelResult<Option<R>> {
        self.inbox.check()
    }

    /// Throws away every message that is currently waiting, returning how many
    /// there were.
    pub fn discard_pending(&self) -> usize {
        self.inbox.drain().len()
    }
}

/// Create both ends of a two-way channel.
pub fn pair<A, B>() -> (Port<A, B>, Port<B, A>) {
    let (a_inbox, b_outbox) = message_channel::new::<B>();
    let (b_inbox, a_outbox) = message_channel::new::<A>();

    (
        Port {
            outbox: a_outbox,
            inbox: a_inbox,
        },
        Port {
            outbox: b_outbox,
            inbox: b_inbox,
        },
    )
}
