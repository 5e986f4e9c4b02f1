//! Connection pump: bridges one client's transport to the room.
//!
//! Each connection runs two independent tasks. The read loop pulls frames off
//! the transport and submits them to the room; the write loop drains the
//! client's bounded outbound queue into the transport. The room holds the
//! only sender of that queue, so the queue closes exactly when the room drops
//! the client (leave or eviction).

mod membership;

use std::{fmt, num::NonZeroUsize};

use tokio::sync::mpsc;
use tokio_util::{sync::CancellationToken, task::AbortOnDropHandle};

use crate::{
    domain::{ClientId, FrameReader, FrameWriter, Message, TransportError},
    room::RoomHandle,
};

pub use membership::Membership;

/// How the read loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadEnd {
    /// Peer closed the connection
    Closed,
    Failed(TransportError),
}

/// How the write loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteEnd {
    /// Outbound queue was closed by the room and fully drained
    Drained,
    /// Told to stop because the read side ended; pending frames are dropped
    Stopped,
    Failed(TransportError),
}

/// Why a connection ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disconnect {
    /// Peer closed the connection
    Closed,
    /// Reading from the transport failed
    ReadFailed(TransportError),
    /// Writing to the transport failed
    WriteFailed(TransportError),
    /// The room closed the outbound queue before the peer went away
    Evicted,
    /// One of the loops panicked or was cancelled
    Aborted,
}

impl fmt::Display for Disconnect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed by peer"),
            Self::ReadFailed(e) => write!(f, "read failed: {}", e),
            Self::WriteFailed(e) => write!(f, "write failed: {}", e),
            Self::Evicted => write!(f, "evicted by room"),
            Self::Aborted => write!(f, "connection task aborted"),
        }
    }
}

/// Run one client connection to completion.
///
/// Joins the room with a fresh outbound queue of `queue_capacity`, runs the
/// read and write loops, and leaves the room on every exit path.
///
/// - Read side ends first: leave, then stop the write loop, which closes the
///   transport without waiting on the peer.
/// - Write side ends first: stop the read loop, then leave.
///
/// Dropping the returned future aborts both loops.
pub async fn run_connection<R, W>(
    room: RoomHandle,
    client_id: ClientId,
    reader: R,
    writer: W,
    queue_capacity: NonZeroUsize,
) -> Disconnect
where
    R: FrameReader + 'static,
    W: FrameWriter + 'static,
{
    let (outbound_tx, outbound_rx) = mpsc::channel(queue_capacity.get());
    let membership = Membership::join(room.clone(), client_id, outbound_tx);
    let stop = CancellationToken::new();

    let mut read_task = AbortOnDropHandle::new(tokio::spawn(read_loop(reader, room, client_id)));
    let mut write_task = AbortOnDropHandle::new(tokio::spawn(write_loop(
        outbound_rx,
        writer,
        stop.clone(),
    )));

    // If any one of the tasks completes, deal with the other
    tokio::select! {
        read = &mut read_task => {
            drop(membership);
            // A write may be stuck on a peer that stopped reading
            stop.cancel();
            if let Ok(WriteEnd::Failed(e)) = write_task.await {
                tracing::debug!("Write to '{}' failed while closing: {}", client_id, e);
            }
            match read {
                Ok(ReadEnd::Closed) => Disconnect::Closed,
                Ok(ReadEnd::Failed(e)) => Disconnect::ReadFailed(e),
                Err(e) => {
                    tracing::error!("Read loop of '{}' did not finish: {}", client_id, e);
                    Disconnect::Aborted
                }
            }
        }
        write = &mut write_task => {
            read_task.abort();
            // Cancelled tasks resolve once their future has been dropped
            let _ = read_task.await;
            drop(membership);
            match write {
                Ok(WriteEnd::Drained) => Disconnect::Evicted,
                Ok(WriteEnd::Failed(e)) => Disconnect::WriteFailed(e),
                Ok(WriteEnd::Stopped) => Disconnect::Aborted,
                Err(e) => {
                    tracing::error!("Write loop of '{}' did not finish: {}", client_id, e);
                    Disconnect::Aborted
                }
            }
        }
    }
}

/// Forward every inbound frame to the room until the transport ends.
///
/// Read failures are not retried.
pub async fn read_loop<R: FrameReader>(
    mut reader: R,
    room: RoomHandle,
    client_id: ClientId,
) -> ReadEnd {
    loop {
        match reader.next_frame().await {
            Some(Ok(message)) => {
                tracing::debug!("Received {} byte(s) from '{}'", message.len(), client_id);
                room.broadcast(client_id, message);
            }
            Some(Err(e)) => {
                tracing::warn!("Read from '{}' failed: {}", client_id, e);
                return ReadEnd::Failed(e);
            }
            None => {
                tracing::debug!("Client '{}' closed the connection", client_id);
                return ReadEnd::Closed;
            }
        }
    }
}

/// Drain the outbound queue into the transport.
///
/// Ends when the queue is closed and empty, on the first write failure, or as
/// soon as `stop` is cancelled, even in the middle of a write. The transport
/// is closed on every exit.
pub async fn write_loop<W: FrameWriter>(
    mut outbound: mpsc::Receiver<Message>,
    mut writer: W,
    stop: CancellationToken,
) -> WriteEnd {
    let end = loop {
        let next = tokio::select! {
            biased;
            _ = stop.cancelled() => break WriteEnd::Stopped,
            next = outbound.recv() => next,
        };
        let Some(message) = next else {
            break WriteEnd::Drained;
        };
        let written = tokio::select! {
            biased;
            _ = stop.cancelled() => break WriteEnd::Stopped,
            written = writer.write_frame(message) => written,
        };
        if let Err(e) = written {
            tracing::warn!("Write failed: {}", e);
            break WriteEnd::Failed(e);
        }
    };

    writer.close().await;
    end
}
