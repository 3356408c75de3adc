use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::bait::BaitStore;

/// Writes the full payload document to the peer as one send.
///
/// Serialization happens entirely in `new`, before any byte hits the wire,
/// so a serialization failure aborts delivery with nothing partial sent.
pub struct PayloadWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl PayloadWriter {
    pub fn new(store: &BaitStore) -> anyhow::Result<Self> {
        let mut buffer = store.to_pretty_json()?.into_bytes();
        buffer.push(b'\n');
        Ok(Self { buffer, written: 0 })
    }

    pub async fn write_to_stream(&mut self, stream: &mut TcpStream) -> anyhow::Result<()> {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing payload"));
            }

            self.written += n;
        }

        Ok(())
    }
}
