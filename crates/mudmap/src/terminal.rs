//! Plumbing between the MUD client process and the session

use mudmap_session::{Action, TerminalWriter};
use std::io::{self, Write};
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, ReadBuf};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Reader that copies everything it reads into `sink`, so the player still
/// sees the game while the session consumes it.
pub struct Tee<R, W> {
    reader: R,
    sink: W,
}

impl<R, W> Tee<R, W> {
    pub fn new(reader: R, sink: W) -> Self {
        Self { reader, sink }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.sink)
    }
}

impl<R: AsyncRead + Unpin, W: Write + Unpin> AsyncRead for Tee<R, W> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = &mut *self;
        let before = buf.filled().len();
        ready!(Pin::new(&mut this.reader).poll_read(cx, buf))?;

        let fresh = &buf.filled()[before..];
        if !fresh.is_empty() {
            this.sink.write_all(fresh)?;
            this.sink.flush()?;
        }
        Poll::Ready(Ok(()))
    }
}

/// Terminal writer that hands text to a background task.
///
/// Sending never waits on the client; the task owns the client's stdin.
#[derive(Debug, Clone)]
pub struct ChannelWriter {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelWriter {
    /// Spawn the task writing into `sink` and return its sending side
    pub fn spawn<W>(mut sink: W) -> (Self, JoinHandle<io::Result<()>>)
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let task = tokio::spawn(async move {
            while let Some(text) = rx.recv().await {
                sink.write_all(text.as_bytes()).await?;
                sink.flush().await?;
            }
            debug!("Terminal input closed");
            Ok(())
        });

        (Self { tx }, task)
    }
}

impl TerminalWriter for ChannelWriter {
    fn send_text(&mut self, text: &str) -> io::Result<()> {
        self.tx
            .send(text.to_string())
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "terminal input closed"))
    }
}

/// Turn each line typed by the player into an action for the session.
///
/// Blank lines are forwarded too, some prompts only wait for Return. At end
/// of input the session is told to release the client's stdin.
pub async fn forward_lines<R>(input: R, actions: mpsc::UnboundedSender<Action>) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(input).lines();
    while let Some(line) = lines.next_line().await? {
        if actions.send(Action::SendLine(line)).is_err() {
            return Ok(());
        }
    }

    debug!("Player input closed");
    let _ = actions.send(Action::EndOfInput);
    Ok(())
}
