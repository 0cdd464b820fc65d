//! Client-side connection handling.
//!
//! The stub client's network needs are tiny: one TCP connection, an
//! opaque join message, single-byte turn commands, and whatever snapshot
//! text the server last sent. `recv_chunk` deliberately returns raw
//! chunks rather than framed messages — the protocol has no framing, so
//! the client renders the latest chunk it managed to read, exactly like
//! the reference window client.

use shared::Direction;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

/// A connected client session.
pub struct Connection {
    reader: OwnedReadHalf,
    writer: OwnedWriteHalf,
}

/// Write half after [`Connection::split`]; sends join and turn commands.
pub struct CommandWriter {
    writer: OwnedWriteHalf,
}

/// Read half after [`Connection::split`]; receives snapshot chunks.
pub struct SnapshotReader {
    reader: OwnedReadHalf,
}

impl Connection {
    pub async fn connect(addr: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let stream = TcpStream::connect(addr).await?;
        let (reader, writer) = stream.into_split();
        Ok(Self { reader, writer })
    }

    /// Sends the opaque join message. The server logs it and says nothing
    /// back until the first tick snapshot.
    pub async fn send_join(&mut self) -> std::io::Result<()> {
        self.writer.write_all(b"join").await
    }

    /// Sends one turn command byte.
    pub async fn send_command(&mut self, dir: Direction) -> std::io::Result<()> {
        self.writer.write_all(&[dir.command_byte()]).await
    }

    /// Reads the next available chunk of snapshot text. Returns `None`
    /// once the server closes the connection.
    pub async fn recv_chunk(&mut self) -> std::io::Result<Option<String>> {
        recv_chunk_impl(&mut self.reader).await
    }

    /// Splits into independent halves so commands can be sent while a
    /// receive is in flight.
    pub fn split(self) -> (CommandWriter, SnapshotReader) {
        (
            CommandWriter {
                writer: self.writer,
            },
            SnapshotReader {
                reader: self.reader,
            },
        )
    }
}

impl CommandWriter {
    pub async fn send_join(&mut self) -> std::io::Result<()> {
        self.writer.write_all(b"join").await
    }

    pub async fn send_command(&mut self, dir: Direction) -> std::io::Result<()> {
        self.writer.write_all(&[dir.command_byte()]).await
    }
}

impl SnapshotReader {
    pub async fn recv_chunk(&mut self) -> std::io::Result<Option<String>> {
        recv_chunk_impl(&mut self.reader).await
    }
}

async fn recv_chunk_impl(reader: &mut OwnedReadHalf) -> std::io::Result<Option<String>> {
    let mut buf = [0u8; 1024];
    let n = reader.read(&mut buf).await?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf[..n]).into_owned()))
}
