//! Terminal stream consumption
//!
//! A single loop awaits the next read, decodes it into one text chunk and
//! hands it to the coordinator before awaiting again. Renderer actions and
//! cancellation are multiplexed into the same loop.

use crate::coordinator::SessionCoordinator;
use crate::decoder::ChunkDecoder;
use crate::message::Action;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tracing::{debug, error};

const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Why the loop stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEnd {
    /// The stream reached end of file
    Closed,

    /// Shutdown was requested or the session was disposed
    Cancelled,

    /// Reading failed; the renderer has been told
    Failed(String),
}

/// Consumes one terminal stream
pub struct SessionLoop<R> {
    reader: R,
    actions: Option<mpsc::UnboundedReceiver<Action>>,
    buffer_size: usize,
    decoder: ChunkDecoder,
}

impl<R: AsyncRead + Unpin> SessionLoop<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            actions: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
            decoder: ChunkDecoder::new(),
        }
    }

    /// Also handle actions arriving on `actions` while the stream runs
    pub fn with_actions(mut self, actions: mpsc::UnboundedReceiver<Action>) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Maximum bytes per read
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Run until the stream ends, fails or is cancelled.
    pub async fn run(mut self, coordinator: &mut SessionCoordinator) -> StreamEnd {
        let mut shutdown = coordinator.shutdown_receiver();
        if coordinator.is_disposed() || *shutdown.borrow_and_update() {
            return StreamEnd::Cancelled;
        }

        coordinator.begin_stream();
        let mut buffer = vec![0u8; self.buffer_size];

        loop {
            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("Terminal stream cancelled");
                        return StreamEnd::Cancelled;
                    }
                }

                action = next_action(&mut self.actions) => {
                    match action {
                        Some(action) => coordinator.handle_action(action),
                        None => self.actions = None,
                    }
                }

                result = self.reader.read(&mut buffer) => {
                    match result {
                        Ok(0) => {
                            let tail = self.decoder.finish();
                            if !tail.is_empty() {
                                coordinator.on_terminal_data(&tail);
                            }
                            debug!("Terminal stream closed");
                            return StreamEnd::Closed;
                        }
                        Ok(n) => {
                            let chunk = self.decoder.decode(&buffer[..n]);
                            if !chunk.is_empty() {
                                coordinator.on_terminal_data(&chunk);
                            }
                        }
                        Err(e) => {
                            error!("Terminal stream error: {}", e);
                            coordinator.report_stream_failure(&e.to_string());
                            return StreamEnd::Failed(e.to_string());
                        }
                    }
                }
            }
        }
    }
}

async fn next_action(actions: &mut Option<mpsc::UnboundedReceiver<Action>>) -> Option<Action> {
    match actions {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
