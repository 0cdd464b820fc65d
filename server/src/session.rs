//! Per-connection session tasks.
//!
//! Each accepted player gets one task that owns its `TcpStream` and
//! interleaves two duties in a `select!` loop: draining command bytes from
//! the client, and relaying the snapshot the broadcaster published for the
//! current tick. After writing a snapshot the session acknowledges
//! consumption, which is what the broadcaster's per-tick barrier counts.
//!
//! A read of zero bytes or any I/O error closes the session; the task
//! reports [`SessionEvent::Closed`] so the barrier stops waiting for it.

use log::{debug, info, warn};
use shared::Direction;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

/// Player intents delivered to the world-owning tick loop. Intents are
/// idempotent last-write-wins, so the tick loop just drains the channel
/// and applies them in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    Turn { player: usize, direction: Direction },
}

/// Events a session reports back to the broadcaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// This tick's snapshot was written to the client.
    Consumed { player: usize },
    /// The connection ended; the barrier must exclude this session.
    Closed { player: usize },
}

/// Broadcaster-side handle to a running session task.
#[derive(Debug)]
pub struct SessionHandle {
    pub player: usize,
    pub snapshot_tx: mpsc::UnboundedSender<String>,
}

/// Spawns the task for an accepted connection and returns its handle.
pub fn spawn_session(
    stream: TcpStream,
    player: usize,
    command_tx: mpsc::UnboundedSender<GameCommand>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
) -> SessionHandle {
    let (snapshot_tx, snapshot_rx) = mpsc::unbounded_channel();
    tokio::spawn(run_session(stream, player, command_tx, event_tx, snapshot_rx));
    SessionHandle {
        player,
        snapshot_tx,
    }
}

async fn run_session(
    mut stream: TcpStream,
    player: usize,
    command_tx: mpsc::UnboundedSender<GameCommand>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
    mut snapshot_rx: mpsc::UnboundedReceiver<String>,
) {
    let mut buf = [0u8; 32];

    // Join handshake: the first message's content is unchecked, only
    // logged. No reply is sent before the first tick snapshot.
    match stream.read(&mut buf).await {
        Ok(0) | Err(_) => {
            info!("Session {} closed before joining", player);
            let _ = event_tx.send(SessionEvent::Closed { player });
            return;
        }
        Ok(n) => {
            info!(
                "Session {}: join message {:?}",
                player,
                String::from_utf8_lossy(&buf[..n])
            );
        }
    }

    loop {
        tokio::select! {
            read = stream.read(&mut buf) => {
                match read {
                    Ok(0) => {
                        info!("Session {} disconnected", player);
                        break;
                    }
                    Ok(n) => forward_commands(&buf[..n], player, &command_tx),
                    Err(e) => {
                        warn!("Session {} read error: {}", player, e);
                        break;
                    }
                }
            }
            snapshot = snapshot_rx.recv() => {
                // None means the broadcaster is gone; shut down quietly.
                let Some(snapshot) = snapshot else { break };
                if let Err(e) = stream.write_all(snapshot.as_bytes()).await {
                    warn!("Session {} write error: {}", player, e);
                    break;
                }
                if event_tx.send(SessionEvent::Consumed { player }).is_err() {
                    break;
                }
            }
        }
    }

    let _ = event_tx.send(SessionEvent::Closed { player });
}

/// Maps received bytes to turn commands. Unrecognized bytes are ignored;
/// line terminators from line-based clients are skipped without logging.
fn forward_commands(
    bytes: &[u8],
    player: usize,
    command_tx: &mpsc::UnboundedSender<GameCommand>,
) {
    for &byte in bytes {
        match Direction::from_command_byte(byte) {
            Some(direction) => {
                let _ = command_tx.send(GameCommand::Turn { player, direction });
            }
            None if byte.is_ascii_whitespace() => {}
            None => debug!("Session {}: ignoring command byte {:#04x}", player, byte),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    async fn connected_pair() -> (TcpStream, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpStream::connect(addr).await.unwrap();
        let (server_side, _) = listener.accept().await.unwrap();
        (client, server_side)
    }

    #[test]
    fn test_forward_commands_maps_bytes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        forward_commands(b"n", 3, &tx);
        assert_eq!(
            rx.try_recv().unwrap(),
            GameCommand::Turn {
                player: 3,
                direction: Direction::North
            }
        );
    }

    #[test]
    fn test_forward_commands_ignores_junk() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        forward_commands(b"xN \r\nq", 0, &tx);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_forward_commands_multiple_bytes_in_one_read() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        forward_commands(b"n\ns\n", 1, &tx);
        assert_eq!(
            rx.try_recv().unwrap(),
            GameCommand::Turn {
                player: 1,
                direction: Direction::North
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            GameCommand::Turn {
                player: 1,
                direction: Direction::South
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_session_relays_snapshot_and_acks() {
        let (mut client, server_side) = connected_pair().await;
        let (cmd_tx, _cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();

        let handle = spawn_session(server_side, 0, cmd_tx, event_tx);

        client.write_all(b"join").await.unwrap();

        handle.snapshot_tx.send("1,1,s;".to_string()).unwrap();

        let mut buf = [0u8; 6];
        client.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"1,1,s;");

        assert_eq!(
            event_rx.recv().await,
            Some(SessionEvent::Consumed { player: 0 })
        );
    }

    #[tokio::test]
    async fn test_session_forwards_turn_commands() {
        let (mut client, server_side) = connected_pair().await;
        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, _event_rx) = mpsc::unbounded_channel();

        let _handle = spawn_session(server_side, 2, cmd_tx, event_tx);

        client.write_all(b"join").await.unwrap();
        // Give the session time to consume the join, so the command byte
        // is not coalesced into the handshake read.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        client.write_all(b"w").await.unwrap();

        assert_eq!(
            cmd_rx.recv().await,
            Some(GameCommand::Turn {
                player: 2,
                direction: Direction::West
            })
        );
    }

    #[tokio::test]
    async fn test_session_reports_close_on_disconnect() {
        let (mut client, server_side) = connected_pair().await;
        let (cmd_tx, _cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();

        let _handle = spawn_session(server_side, 1, cmd_tx, event_tx);

        client.write_all(b"join").await.unwrap();
        drop(client);

        assert_eq!(
            event_rx.recv().await,
            Some(SessionEvent::Closed { player: 1 })
        );
    }

    #[tokio::test]
    async fn test_session_closed_before_join() {
        let (client, server_side) = connected_pair().await;
        let (cmd_tx, _cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();

        let _handle = spawn_session(server_side, 0, cmd_tx, event_tx);
        drop(client);

        assert_eq!(
            event_rx.recv().await,
            Some(SessionEvent::Closed { player: 0 })
        );
    }
}
