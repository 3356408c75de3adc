use bytes::BytesMut;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{info, warn};

use crate::bait::BaitStore;
use crate::session::lines::{LineClass, classify, display_snippet, take_line};
use crate::session::writer::PayloadWriter;

const GREETING: &str = "Welcome to the secure service. Please authenticate.\n";

/// Bytes pulled off the socket per read call.
const READ_CHUNK: usize = 1024;

pub enum SessionState {
    Greeting,
    AwaitingInput,
    Delivered,
    Closed,
}

/// One accepted connection: its socket, its buffer, its attempt counter.
///
/// The counter and buffer belong to this session alone; the store is a
/// shared read-only handle. Every exit path, error or not, releases the
/// socket exactly once: either through the explicit shutdown in `Closed`
/// or by dropping the session when `run` returns early with an error.
pub struct Session {
    stream: TcpStream,
    peer: SocketAddr,
    buffer: BytesMut,
    store: BaitStore,
    threshold: i64,
    attempts: i64,
    state: SessionState,
}

impl Session {
    pub fn new(stream: TcpStream, peer: SocketAddr, store: BaitStore, threshold: i64) -> Self {
        Self {
            stream,
            peer,
            buffer: BytesMut::with_capacity(4096),
            store,
            threshold,
            attempts: 0,
            state: SessionState::Greeting,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &self.state {
                SessionState::Greeting => {
                    self.stream.write_all(GREETING.as_bytes()).await?;
                    self.state = SessionState::AwaitingInput;
                }

                SessionState::AwaitingInput => {
                    match self.next_line().await? {
                        Some(line) => {
                            self.handle_line(&line).await?;
                        }
                        None => {
                            self.state = SessionState::Closed;
                        }
                    }
                }

                SessionState::Delivered => {
                    let mut writer = PayloadWriter::new(&self.store)?;
                    writer.write_to_stream(&mut self.stream).await?;

                    warn!(
                        peer = %self.peer,
                        records = self.store.len(),
                        "bait taken, payload delivered"
                    );

                    self.state = SessionState::Closed;
                }

                SessionState::Closed => {
                    // Already-dead peers make shutdown fail; the socket is
                    // released either way.
                    let _ = self.stream.shutdown().await;
                    break;
                }
            }
        }

        Ok(())
    }

    /// Waits for the next complete input line. Returns `Ok(None)` once the
    /// peer has closed and the buffer is drained.
    ///
    /// Lines are assembled across read boundaries: an `auth:` prefix split
    /// over two reads still classifies as one attempt once its newline
    /// arrives. Bytes left unterminated at end-of-stream were still fully
    /// received, so they come back as one final line.
    async fn next_line(&mut self) -> anyhow::Result<Option<BytesMut>> {
        loop {
            if let Some(line) = take_line(&mut self.buffer) {
                return Ok(Some(line));
            }

            let mut chunk = [0u8; READ_CHUNK];
            let n = self.stream.read(&mut chunk).await?;

            if n == 0 {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(self.buffer.split()));
            }

            self.buffer.extend_from_slice(&chunk[..n]);
        }
    }

    async fn handle_line(&mut self, raw: &[u8]) -> anyhow::Result<()> {
        match classify(raw) {
            LineClass::Binary => {
                warn!(
                    peer = %self.peer,
                    bytes = raw.len(),
                    "undecodable input, ignoring"
                );
            }

            LineClass::Chatter(text) => {
                info!(peer = %self.peer, "received: {:?}", display_snippet(&text));
            }

            LineClass::AuthAttempt(text) => {
                self.attempts += 1;
                info!(
                    peer = %self.peer,
                    attempt = self.attempts,
                    threshold = self.threshold,
                    "auth attempt: {:?}",
                    display_snippet(&text)
                );

                if self.attempts < self.threshold {
                    let reply = format!(
                        "Authentication failed. Attempt {} of {}.\n",
                        self.attempts, self.threshold
                    );
                    self.stream.write_all(reply.as_bytes()).await?;
                } else {
                    self.state = SessionState::Delivered;
                }
            }
        }

        Ok(())
    }
}
